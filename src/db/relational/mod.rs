pub mod entities;

use entities::{prelude::*, *};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::db::alert::{Alert as InnerAlert, PriceAlert};
use crate::db::delivery_log::DeliveryLogEntry;
use crate::db::errors::DBError;
use crate::db::message::Message as InnerMessage;
use crate::db::product::DatabaseProduct;
use crate::db::product_filter::ProductFilter;
use crate::db::search_filter::SearchFilter;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct RelationalDB {
    pub connection: DatabaseConnection,
}

impl RelationalDB {
    pub fn init(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    pub async fn all_products(&self) -> Result<Vec<DatabaseProduct>, DBError> {
        let products = Product::find().all(&self.connection).await?;
        Ok(products.into_iter().map(|prod| prod.into()).collect())
    }

    pub async fn get_product_by(&self, id: u32) -> Result<DatabaseProduct, DBError> {
        let product = Product::find_by_id(id as i32).one(&self.connection).await?;
        match product {
            None => Err(DBError::UnknownProduct),
            Some(prod) => Ok(prod.into()),
        }
    }

    pub async fn get_prices_for(
        &self,
        product: &DatabaseProduct,
    ) -> Result<Vec<(NaiveDate, Decimal)>, DBError> {
        let prices = Historicprice::find()
            .filter(historicprice::Column::ProductId.eq(product.id as i32))
            .order_by_asc(historicprice::Column::Date)
            .all(&self.connection)
            .await?;
        Ok(prices
            .into_iter()
            .map(|price| (price.date, price.avg_price.unwrap_or_default()))
            .collect())
    }

    /// Writes the new price and returns the price it replaced.
    pub async fn update_price(&self, id: u32, new_price: Decimal) -> Result<Decimal, DBError> {
        let product = Product::find_by_id(id as i32)
            .one(&self.connection)
            .await?
            .ok_or(DBError::UnknownProduct)?;
        let old_price = product.price;
        let mut active: product::ActiveModel = product.into();
        active.price = Set(new_price);
        active.update(&self.connection).await?;
        Ok(old_price)
    }

    pub async fn search_with_filter(
        &self,
        filter: SearchFilter,
    ) -> Result<Vec<DatabaseProduct>, DBError> {
        let mut query = Product::find();
        if let Some(product_filter) = &filter.product {
            if let Some(price_min) = product_filter.price_min {
                query = query.filter(product::Column::Price.gte(price_min));
            }
            if let Some(price_max) = product_filter.price_max {
                query = query.filter(product::Column::Price.lte(price_max));
            }
        }
        if let Ok(search_query) = filter.query() {
            query = query.filter(product::Column::Name.contains(&search_query.to_string()));
        }
        let products = query.all(&self.connection).await?;
        Ok(products.into_iter().map(|prod| prod.into()).collect())
    }

    pub async fn get_product_filter(&self) -> Result<ProductFilter, DBError> {
        let filter = Product::find()
            .select_only()
            .column_as(product::Column::Price.min(), "price_min")
            .column_as(product::Column::Price.max(), "price_max")
            .into_model::<ProductFilter>()
            .one(&self.connection)
            .await?;
        Ok(filter.unwrap_or_default())
    }

    pub async fn register_message(&self, msg: InnerMessage) -> Result<(), DBError> {
        let active = message::ActiveModel {
            id: NotSet,
            email: Set(msg.email),
            message: Set(msg.message),
            created_at: Set(Utc::now()),
        };
        active.insert(&self.connection).await?;
        Ok(())
    }

    pub async fn register_alert(&self, alert: PriceAlert) -> Result<InnerAlert, DBError> {
        let now = Utc::now();
        let active = alert::ActiveModel {
            id: NotSet,
            email: Set(alert.email),
            product_id: Set(alert.product_id as i32),
            alert_type: Set(alert.alert_type.to_string()),
            target_price: Set(alert.target_price),
            is_active: Set(true),
            last_sent_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&self.connection).await?;
        InnerAlert::try_from(model)
    }

    pub async fn get_active_alerts_for_product(
        &self,
        product_id: u32,
    ) -> Result<Vec<InnerAlert>, DBError> {
        let alerts = Alert::find()
            .filter(alert::Column::ProductId.eq(product_id as i32))
            .filter(alert::Column::IsActive.eq(true))
            .all(&self.connection)
            .await?;
        alerts.into_iter().map(InnerAlert::try_from).collect()
    }

    pub async fn append_delivery_log(&self, entry: DeliveryLogEntry) -> Result<(), DBError> {
        let active = deliverylog::ActiveModel {
            id: NotSet,
            alert_id: Set(entry.alert_id as i32),
            triggered_at: Set(entry.triggered_at),
            old_price: Set(entry.old_price),
            new_price: Set(entry.new_price),
            email_sent: Set(entry.email_sent),
        };
        active.insert(&self.connection).await?;
        Ok(())
    }

    /// Last-write-wins; no row locking, write frequency is one per crossing.
    pub async fn update_last_sent(
        &self,
        alert_id: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DBError> {
        let alert = Alert::find_by_id(alert_id as i32)
            .one(&self.connection)
            .await?
            .ok_or(DBError::UnknownAlert)?;
        let mut active: alert::ActiveModel = alert.into();
        active.last_sent_at = Set(Some(timestamp));
        active.updated_at = Set(Utc::now());
        active.update(&self.connection).await?;
        Ok(())
    }

    /// Soft delete. Alert rows are never removed, only flagged inactive.
    pub async fn deactivate_alert(&self, alert_id: u32) -> Result<(), DBError> {
        let alert = Alert::find_by_id(alert_id as i32)
            .one(&self.connection)
            .await?
            .ok_or(DBError::UnknownAlert)?;
        let mut active: alert::ActiveModel = alert.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.connection).await?;
        Ok(())
    }

    pub async fn delivery_log_for(&self, alert_id: u32) -> Result<Vec<DeliveryLogEntry>, DBError> {
        let entries = Deliverylog::find()
            .filter(deliverylog::Column::AlertId.eq(alert_id as i32))
            .order_by_asc(deliverylog::Column::Id)
            .all(&self.connection)
            .await?;
        Ok(entries.into_iter().map(|entry| entry.into()).collect())
    }
}
