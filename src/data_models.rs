use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shape of the product page: current price plus the price history the
/// chart is drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub id: u32,
    pub price: Decimal,
    pub history_prices: Vec<(String, Decimal)>,
}

impl Product {
    pub fn dummy() -> Self {
        let mut rng = thread_rng();
        let rand_string: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();
        Self {
            name: rand_string,
            id: rng.gen(),
            price: Decimal::new(rng.gen_range(100..10_000), 2),
            history_prices: Default::default(),
        }
    }
}
