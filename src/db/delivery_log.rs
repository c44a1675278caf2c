use crate::db::relational::entities;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Append-only record of one delivery attempt. Written by the dispatcher
/// after the send attempt; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLogEntry {
    pub alert_id: u32,
    pub triggered_at: DateTime<Utc>,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub email_sent: bool,
}

impl From<entities::deliverylog::Model> for DeliveryLogEntry {
    fn from(entry: entities::deliverylog::Model) -> Self {
        Self {
            alert_id: entry.alert_id as u32,
            triggered_at: entry.triggered_at,
            old_price: entry.old_price,
            new_price: entry.new_price,
            email_sent: entry.email_sent,
        }
    }
}
