pub use super::alert::Entity as Alert;
pub use super::deliverylog::Entity as Deliverylog;
pub use super::historicprice::Entity as Historicprice;
pub use super::message::Entity as Message;
pub use super::product::Entity as Product;
