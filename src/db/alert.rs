use crate::db::errors::DBError;
use crate::db::relational::entities;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Closed set of alert conditions. Persisted as `below` / `above` / `change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Below,
    Above,
    #[serde(rename = "change")]
    AnyChange,
}

impl Display for AlertType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::Below => write!(f, "below"),
            AlertType::Above => write!(f, "above"),
            AlertType::AnyChange => write!(f, "change"),
        }
    }
}

impl FromStr for AlertType {
    type Err = DBError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "below" => Ok(AlertType::Below),
            "above" => Ok(AlertType::Above),
            "change" => Ok(AlertType::AnyChange),
            other => Err(DBError::UnknownAlertType(other.to_string())),
        }
    }
}

/// A stored subscription. `target_price` is kept for `change` alerts too,
/// even though the matcher ignores it there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub email: String,
    pub product_id: u32,
    pub alert_type: AlertType,
    pub target_price: Decimal,
    pub is_active: bool,
    pub last_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<entities::alert::Model> for Alert {
    type Error = DBError;

    fn try_from(alert: entities::alert::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: alert.id as u32,
            email: alert.email,
            product_id: alert.product_id as u32,
            alert_type: alert.alert_type.parse()?,
            target_price: alert.target_price,
            is_active: alert.is_active,
            last_sent_at: alert.last_sent_at,
            created_at: alert.created_at,
            updated_at: alert.updated_at,
        })
    }
}

pub fn validate_non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Inbound subscription request. Duplicates are legal: every registered row
/// is matched and delivered independently.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PriceAlert {
    #[validate(range(min = 1))]
    pub product_id: u32,
    #[validate(email)]
    pub email: String,
    pub alert_type: AlertType,
    #[validate(custom(function = "validate_non_negative_price"))]
    pub target_price: Decimal,
}
