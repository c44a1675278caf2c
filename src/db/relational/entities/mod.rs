pub mod prelude;

pub mod alert;
pub mod deliverylog;
pub mod historicprice;
pub mod message;
pub mod product;
