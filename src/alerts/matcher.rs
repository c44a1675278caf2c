use crate::db::{Alert, AlertType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Produced by the price-update path after a price write commits. Not
/// persisted by this subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChangeEvent {
    pub product_id: u32,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredAlert {
    pub alert: Alert,
    pub reason: String,
}

/// Decides which alerts a price change triggers. Pure: no clock, no IO,
/// same input gives the same output. Output keeps the input order.
pub fn evaluate(event: &PriceChangeEvent, alerts: &[Alert]) -> Vec<TriggeredAlert> {
    alerts
        .iter()
        .filter(|alert| alert.is_active)
        .filter_map(|alert| {
            trigger_reason(event, alert).map(|reason| TriggeredAlert {
                alert: alert.clone(),
                reason,
            })
        })
        .collect()
}

/// Crossing semantics: `below`/`above` fire only on the transition across
/// the target, inclusive on the new price and exclusive on the old one. An
/// old price sitting exactly on the target does not count as a crossing.
/// `change` compares exact decimal values, no tolerance.
fn trigger_reason(event: &PriceChangeEvent, alert: &Alert) -> Option<String> {
    match alert.alert_type {
        AlertType::Below => {
            let crossed_down =
                event.new_price <= alert.target_price && event.old_price > alert.target_price;
            crossed_down.then(|| format!("dropped below {}", alert.target_price))
        }
        AlertType::Above => {
            let crossed_up =
                event.new_price >= alert.target_price && event.old_price < alert.target_price;
            crossed_up.then(|| format!("rose above {}", alert.target_price))
        }
        AlertType::AnyChange => (event.new_price != event.old_price)
            .then(|| format!("changed from {} to {}", event.old_price, event.new_price)),
    }
}
