use crate::alerts::matcher::PriceChangeEvent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Fills the notification payload from the event data. The markup itself is
/// deliberately plain; the dispatcher only supplies data.
pub fn render(product_name: &str, event: &PriceChangeEvent, reason: &str) -> NotificationEmail {
    let diff = event.new_price - event.old_price;
    let percentage = percentage_change(event.old_price, event.new_price);
    let change_line = match percentage {
        Some(pct) => format!("{diff} ({pct}%)"),
        None => format!("{diff}"),
    };

    let subject = format!("Price alert: {product_name} {reason}");
    let text_body = format!(
        "The price of {product_name} {reason}.\n\
         Old price: {old}\n\
         New price: {new}\n\
         Change: {change_line}\n",
        old = event.old_price,
        new = event.new_price,
    );
    let html_body = format!(
        r#"<html>
<body>
    <p>The price of <strong>{product_name}</strong> {reason}.</p>
    <ul>
        <li>Old price: {old}</li>
        <li>New price: {new}</li>
        <li>Change: {change_line}</li>
    </ul>
    <p><small>You receive this email because you registered a price alert.</small></p>
</body>
</html>"#,
        old = event.old_price,
        new = event.new_price,
    );

    NotificationEmail {
        subject,
        text_body,
        html_body,
    }
}

fn percentage_change(old_price: Decimal, new_price: Decimal) -> Option<Decimal> {
    if old_price.is_zero() {
        return None;
    }
    Some(((new_price - old_price) / old_price * dec!(100)).round_dp(1))
}
