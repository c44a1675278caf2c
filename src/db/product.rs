use crate::db::alert::validate_non_negative_price;
use crate::db::relational::entities;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct DatabaseProduct {
    pub name: String,
    pub id: u32,
    pub price: Decimal,
}

impl From<entities::product::Model> for DatabaseProduct {
    fn from(prod: entities::product::Model) -> Self {
        Self {
            name: prod.name.to_string(),
            id: prod.id as u32,
            price: prod.price,
        }
    }
}

/// Body of a price write coming from the admin panel or the price feed.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PriceUpdate {
    #[validate(custom(function = "validate_non_negative_price"))]
    pub new_price: Decimal,
}
