use thiserror::Error;

#[derive(Error, Debug)]
pub enum DBError {
    #[error("transparent")]
    Relational(#[from] sea_orm::DbErr),
    #[error("transparent")]
    InMemoryError(#[from] InMemoryError),
    #[error("unknown product")]
    UnknownProduct,
    #[error("unknown alert")]
    UnknownAlert,
    #[error("unknown alert type: {0}")]
    UnknownAlertType(String),
    #[error("no historic prices found")]
    PricesNotFound,
    #[error("transparent")]
    PriceError(#[from] rust_decimal::Error),
}

#[derive(Error, Debug)]
pub enum InMemoryError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to read with serde: {0}")]
    SerdeError(#[from] serde_json::error::Error),
}
