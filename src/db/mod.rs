mod alert;
mod delivery_log;
mod errors;
pub mod in_memory;
mod message;
mod product;
mod product_filter;
mod relational;
mod search_filter;
mod search_query;
mod traits;

use crate::configuration::{DatabaseSettings, DatabaseType};
use crate::db::in_memory::InMemoryDB;
use crate::db::relational::RelationalDB;
use crate::errors::AppErrors;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::Database as SeaOrmDB;

pub use alert::{Alert, AlertType, PriceAlert};
pub use delivery_log::DeliveryLogEntry;
pub use errors::DBError as DatabaseError;
pub use message::Message;
pub use product::{DatabaseProduct, PriceUpdate};
pub use product_filter::ProductFilter;
pub use search_filter::SearchFilter;
pub use search_query::SearchQuery;

use errors::DBError;

#[derive(Debug)]
pub enum Database {
    InMemory(Box<InMemoryDB>),
    Relational(RelationalDB),
}

impl Database {
    pub async fn try_from(settings: &DatabaseSettings) -> Result<Self, AppErrors> {
        settings.check_if_valid()?;
        match settings.db_type {
            DatabaseType::InMemory => {
                let file_path = settings.path_unchecked();
                let db = InMemoryDB::try_from(file_path)?;
                Ok(Self::InMemory(Box::new(db)))
            }
            DatabaseType::Relational => {
                let connection_settings = settings.relational_connection_unchecked();
                let connection = SeaOrmDB::connect(connection_settings)
                    .await
                    .map_err(|e| AppErrors::DatabaseError(DBError::Relational(e)))?;
                let db = RelationalDB::init(connection);
                Ok(Self::Relational(db))
            }
        }
    }

    pub async fn all_products(&self) -> Result<Vec<DatabaseProduct>, DBError> {
        match self {
            Database::InMemory(db) => db.all_products(),
            Database::Relational(db) => db.all_products().await,
        }
    }

    pub async fn get_product_by(&self, id: u32) -> Result<DatabaseProduct, DBError> {
        match self {
            Database::InMemory(db) => db.get_product_by(id),
            Database::Relational(db) => db.get_product_by(id).await,
        }
    }

    pub async fn get_prices_for(
        &self,
        product: &DatabaseProduct,
    ) -> Result<Vec<(String, Decimal)>, DBError> {
        let prices = match self {
            Database::InMemory(db) => db.get_prices_for(product)?,
            Database::Relational(db) => db.get_prices_for(product).await?,
        };
        Ok(prices
            .into_iter()
            .map(|(date, price)| (date.to_string(), price))
            .collect())
    }

    /// Commits the price write and returns the replaced price. Alert
    /// evaluation happens after this call, on the caller's side.
    pub async fn update_price(&self, id: u32, new_price: Decimal) -> Result<Decimal, DBError> {
        match self {
            Database::InMemory(db) => db.update_price(id, new_price),
            Database::Relational(db) => db.update_price(id, new_price).await,
        }
    }

    pub async fn search_with_filter(
        &self,
        filter: SearchFilter,
    ) -> Result<Vec<DatabaseProduct>, DBError> {
        match self {
            Database::InMemory(db) => db.search_with_filter(filter),
            Database::Relational(db) => db.search_with_filter(filter).await,
        }
    }

    pub async fn get_search_filter(&self) -> Result<SearchFilter, DBError> {
        let product_filter = match self {
            Database::InMemory(db) => db.get_product_filter(),
            Database::Relational(db) => db.get_product_filter().await,
        }?;
        Ok(SearchFilter {
            product: Some(product_filter),
            ..Default::default()
        })
    }

    pub async fn register_message(&self, msg: Message) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.register_message(msg),
            Database::Relational(db) => db.register_message(msg).await,
        }
    }

    pub async fn register_alert(&self, alert: PriceAlert) -> Result<Alert, DBError> {
        match self {
            Database::InMemory(db) => db.register_alert(alert),
            Database::Relational(db) => db.register_alert(alert).await,
        }
    }

    pub async fn get_active_alerts_for_product(
        &self,
        product_id: u32,
    ) -> Result<Vec<Alert>, DBError> {
        match self {
            Database::InMemory(db) => db.get_active_alerts_for_product(product_id),
            Database::Relational(db) => db.get_active_alerts_for_product(product_id).await,
        }
    }

    pub async fn append_delivery_log(&self, entry: DeliveryLogEntry) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.append_delivery_log(entry),
            Database::Relational(db) => db.append_delivery_log(entry).await,
        }
    }

    pub async fn update_last_sent(
        &self,
        alert_id: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.update_last_sent(alert_id, timestamp),
            Database::Relational(db) => db.update_last_sent(alert_id, timestamp).await,
        }
    }

    pub async fn deactivate_alert(&self, alert_id: u32) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.deactivate_alert(alert_id),
            Database::Relational(db) => db.deactivate_alert(alert_id).await,
        }
    }

    pub async fn delivery_log_for(&self, alert_id: u32) -> Result<Vec<DeliveryLogEntry>, DBError> {
        match self {
            Database::InMemory(db) => db.delivery_log_for(alert_id),
            Database::Relational(db) => db.delivery_log_for(alert_id).await,
        }
    }
}
