use crate::db::alert::{Alert, PriceAlert};
use crate::db::delivery_log::DeliveryLogEntry;
use crate::db::errors::{DBError, InMemoryError};
use crate::db::message::Message;
use crate::db::product::DatabaseProduct;
use crate::db::product_filter::ProductFilter;
use crate::db::search_filter::SearchFilter;
use crate::db::search_query::SearchQuery;
use crate::db::traits::ExternalText;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileStructure {
    #[serde(default)]
    pub products: Vec<DatabaseProduct>,
    #[serde(default)]
    pub historic_prices: HashMap<u32, Vec<(NaiveDate, Decimal)>>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Default)]
pub struct InMemoryDB {
    pub products: RwLock<Vec<DatabaseProduct>>,
    pub historic_prices: RwLock<HashMap<u32, Vec<(NaiveDate, Decimal)>>>,
    pub alerts: RwLock<Vec<Alert>>,
    pub delivery_log: RwLock<Vec<DeliveryLogEntry>>,
    pub messages: RwLock<Vec<Message>>,
    pub next_alert_id: AtomicU32,
    pub price_range: PriceRange,
}

impl TryFrom<String> for InMemoryDB {
    type Error = DBError;

    fn try_from(file_path: String) -> Result<Self, Self::Error> {
        let data = fs::read_to_string(file_path)
            .map_err(|e| DBError::InMemoryError(InMemoryError::IoError(e)))?;
        let db: FileStructure = serde_json::from_str(&data)
            .map_err(|e| DBError::InMemoryError(InMemoryError::SerdeError(e)))?;
        let mut prices: Vec<_> = db.products.iter().map(|prod| prod.price).collect();
        prices.sort();
        let next_alert_id = db.alerts.iter().map(|alert| alert.id).max().unwrap_or(0) + 1;
        Ok(Self {
            products: RwLock::new(db.products),
            historic_prices: RwLock::new(db.historic_prices),
            alerts: RwLock::new(db.alerts),
            delivery_log: Default::default(),
            messages: Default::default(),
            next_alert_id: AtomicU32::new(next_alert_id),
            price_range: PriceRange {
                min: prices.first().copied().unwrap_or_default(),
                max: prices.last().copied().unwrap_or_default(),
            },
        })
    }
}

impl InMemoryDB {
    pub fn all_products(&self) -> Result<Vec<DatabaseProduct>, DBError> {
        let products = self.products.read().unwrap();
        Ok(products.clone())
    }

    pub fn get_product_by(&self, id: u32) -> Result<DatabaseProduct, DBError> {
        let products = self.products.read().unwrap();
        products
            .iter()
            .find(|prod| prod.id == id)
            .cloned()
            .ok_or(DBError::UnknownProduct)
    }

    pub fn get_prices_for(
        &self,
        product: &DatabaseProduct,
    ) -> Result<Vec<(NaiveDate, Decimal)>, DBError> {
        let prices = self.historic_prices.read().unwrap();
        Ok(prices.get(&product.id).cloned().unwrap_or_default())
    }

    pub fn update_price(&self, id: u32, new_price: Decimal) -> Result<Decimal, DBError> {
        let mut products = self.products.write().unwrap();
        let product = products
            .iter_mut()
            .find(|prod| prod.id == id)
            .ok_or(DBError::UnknownProduct)?;
        let old_price = product.price;
        product.price = new_price;
        Ok(old_price)
    }

    fn search(
        &self,
        products: Vec<DatabaseProduct>,
        filter: &Option<ProductFilter>,
        query: SearchQuery,
    ) -> Result<Vec<DatabaseProduct>, DBError> {
        let mut selected = vec![];
        for product in products.into_iter() {
            let above_min = filter
                .as_ref()
                .and_then(|prod| prod.price_min)
                .map_or(true, |min| product.price >= min);
            let below_max = filter
                .as_ref()
                .and_then(|prod| prod.price_max)
                .map_or(true, |max| product.price <= max);
            if above_min && below_max && product.name.to_lowercase().contains(&query.to_string()) {
                selected.push(product);
            }
        }
        Ok(selected)
    }

    pub fn search_with_filter(&self, filter: SearchFilter) -> Result<Vec<DatabaseProduct>, DBError> {
        let all_products = self.products.read().unwrap().to_owned();
        if !filter.contains_query() {
            return Ok(all_products);
        }
        let query = filter.query().expect("Query cannot be empty");
        self.search(all_products, &filter.product, query)
    }

    pub fn get_product_filter(&self) -> Result<ProductFilter, DBError> {
        Ok(self.price_range.into())
    }

    pub fn register_message(&self, msg: Message) -> Result<(), DBError> {
        let mut messages = self.messages.write().unwrap();
        messages.push(msg.cleaned());
        Ok(())
    }

    pub fn register_alert(&self, alert: PriceAlert) -> Result<Alert, DBError> {
        let now = Utc::now();
        let stored = Alert {
            id: self.next_alert_id.fetch_add(1, Ordering::SeqCst),
            email: alert.email,
            product_id: alert.product_id,
            alert_type: alert.alert_type,
            target_price: alert.target_price,
            is_active: true,
            last_sent_at: None,
            created_at: now,
            updated_at: now,
        };
        let mut alerts = self.alerts.write().unwrap();
        alerts.push(stored.clone());
        Ok(stored)
    }

    pub fn get_active_alerts_for_product(&self, product_id: u32) -> Result<Vec<Alert>, DBError> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .iter()
            .filter(|alert| alert.product_id == product_id && alert.is_active)
            .cloned()
            .collect())
    }

    pub fn append_delivery_log(&self, entry: DeliveryLogEntry) -> Result<(), DBError> {
        let mut log = self.delivery_log.write().unwrap();
        log.push(entry);
        Ok(())
    }

    pub fn update_last_sent(
        &self,
        alert_id: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DBError> {
        let mut alerts = self.alerts.write().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|alert| alert.id == alert_id)
            .ok_or(DBError::UnknownAlert)?;
        alert.last_sent_at = Some(timestamp);
        alert.updated_at = Utc::now();
        Ok(())
    }

    pub fn deactivate_alert(&self, alert_id: u32) -> Result<(), DBError> {
        let mut alerts = self.alerts.write().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|alert| alert.id == alert_id)
            .ok_or(DBError::UnknownAlert)?;
        alert.is_active = false;
        alert.updated_at = Utc::now();
        Ok(())
    }

    pub fn delivery_log_for(&self, alert_id: u32) -> Result<Vec<DeliveryLogEntry>, DBError> {
        let log = self.delivery_log.read().unwrap();
        Ok(log
            .iter()
            .filter(|entry| entry.alert_id == alert_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::alert::AlertType;
    use rust_decimal_macros::dec;

    fn create_test_product(id: u32, name: &str, price: Decimal) -> DatabaseProduct {
        DatabaseProduct {
            name: name.to_string(),
            id,
            price,
        }
    }

    fn create_test_subscription(product_id: u32) -> PriceAlert {
        PriceAlert {
            product_id,
            email: "test@test.com".to_string(),
            alert_type: AlertType::Below,
            target_price: dec!(10),
        }
    }

    #[test]
    fn register_alert_assigns_incrementing_ids() {
        let db = InMemoryDB::default();
        let first = db
            .register_alert(create_test_subscription(1))
            .expect("Failed to register alert");
        let second = db
            .register_alert(create_test_subscription(1))
            .expect("Failed to register alert");
        assert_eq!(second.id, first.id + 1);
        assert!(first.is_active);
        assert!(first.last_sent_at.is_none());
    }

    #[test]
    fn duplicate_alerts_are_kept_separately() {
        let db = InMemoryDB::default();
        db.register_alert(create_test_subscription(7)).unwrap();
        db.register_alert(create_test_subscription(7)).unwrap();
        let active = db
            .get_active_alerts_for_product(7)
            .expect("Failed to read alerts");
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn deactivated_alert_is_hidden_but_not_removed() {
        let db = InMemoryDB::default();
        let alert = db.register_alert(create_test_subscription(3)).unwrap();
        db.deactivate_alert(alert.id)
            .expect("Failed to deactivate alert");
        let active = db.get_active_alerts_for_product(3).unwrap();
        assert!(active.is_empty());
        let all = db.alerts.read().unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_active);
    }

    #[test]
    fn deactivate_unknown_alert_fails() {
        let db = InMemoryDB::default();
        assert!(db.deactivate_alert(99).is_err());
    }

    #[test]
    fn update_last_sent_works() {
        let db = InMemoryDB::default();
        let alert = db.register_alert(create_test_subscription(3)).unwrap();
        let timestamp = Utc::now();
        db.update_last_sent(alert.id, timestamp)
            .expect("Failed to update last sent");
        let alerts = db.alerts.read().unwrap();
        assert_eq!(alerts[0].last_sent_at, Some(timestamp));
    }

    #[test]
    fn delivery_log_is_append_only_per_alert() {
        let db = InMemoryDB::default();
        let entry = DeliveryLogEntry {
            alert_id: 1,
            triggered_at: Utc::now(),
            old_price: dec!(55),
            new_price: dec!(45),
            email_sent: true,
        };
        db.append_delivery_log(entry.clone()).unwrap();
        db.append_delivery_log(DeliveryLogEntry {
            alert_id: 2,
            ..entry.clone()
        })
        .unwrap();
        db.append_delivery_log(DeliveryLogEntry {
            email_sent: false,
            ..entry.clone()
        })
        .unwrap();

        let log = db.delivery_log_for(1).expect("Failed to read log");
        assert_eq!(log.len(), 2);
        assert!(log[0].email_sent);
        assert!(!log[1].email_sent);
    }

    #[test]
    fn update_price_returns_previous_price() {
        let db = InMemoryDB {
            products: RwLock::new(vec![create_test_product(1, "cherries", dec!(55))]),
            ..Default::default()
        };
        let old_price = db
            .update_price(1, dec!(45))
            .expect("Failed to update price");
        assert_eq!(old_price, dec!(55));
        assert_eq!(db.get_product_by(1).unwrap().price, dec!(45));
    }

    #[test]
    fn update_price_unknown_product_fails() {
        let db = InMemoryDB::default();
        assert!(db.update_price(42, dec!(1)).is_err());
    }

    #[test]
    fn search_with_query_matches_by_name() {
        let db = InMemoryDB {
            products: RwLock::new(vec![
                create_test_product(1, "Sweet cherries", dec!(5)),
                create_test_product(2, "Potatoes", dec!(2)),
            ]),
            ..Default::default()
        };
        let filter = SearchFilter {
            product: None,
            query: SearchQuery::new("cherries".to_string()),
        };
        let found = db.search_with_filter(filter).expect("Failed to search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn search_without_query_returns_everything() {
        let db = InMemoryDB {
            products: RwLock::new(vec![
                create_test_product(1, "a", dec!(5)),
                create_test_product(2, "b", dec!(2)),
            ]),
            ..Default::default()
        };
        let found = db
            .search_with_filter(SearchFilter::default())
            .expect("Failed to search");
        assert_eq!(found.len(), 2);
    }
}
