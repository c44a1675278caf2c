pub mod dispatcher;
pub mod email;
pub mod matcher;
pub mod templates;

use crate::db::Database;
use crate::errors::AppErrors;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub use dispatcher::{DispatchSummary, NotificationDispatcher};
pub use email::{EmailError, EmailSender};
pub use matcher::{PriceChangeEvent, TriggeredAlert};

/// Entry point of the alert subsystem, invoked synchronously from the
/// price-update path after the price write commits.
pub struct AlertEngine {
    sender: EmailSender,
}

impl AlertEngine {
    pub fn new(sender: EmailSender) -> Self {
        Self { sender }
    }

    /// Reads the active alerts for the product, matches them against the
    /// price change and dispatches notifications for the ones that fire.
    /// A store read failure is fatal for this evaluation pass; the caller
    /// decides what that means for the already-committed price write.
    pub async fn evaluate_and_notify(
        &self,
        db: &Database,
        product_id: u32,
        old_price: Decimal,
        new_price: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> Result<DispatchSummary, AppErrors> {
        let event = PriceChangeEvent {
            product_id,
            old_price,
            new_price,
            occurred_at,
        };
        let product = db.get_product_by(product_id).await?;
        let alerts = db.get_active_alerts_for_product(product_id).await?;
        let triggered = matcher::evaluate(&event, &alerts);
        if triggered.is_empty() {
            return Ok(DispatchSummary::default());
        }
        let summary = NotificationDispatcher::new(&self.sender)
            .dispatch(db, &product, &event, &triggered)
            .await?;
        Ok(summary)
    }
}
