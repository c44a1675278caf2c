use crate::db::DatabaseError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    AppErrors(#[from] AppErrors),
}

#[derive(Error, Debug)]
pub enum AppErrors {
    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown database type")]
    UnknownDatabaseType,
    #[error("data file not found")]
    DataFileNotFound,
    #[error("missing database settings")]
    MissingDatabaseSettings,
    #[error("unknown email mode")]
    UnknownEmailMode,
    #[error("missing email settings")]
    MissingEmailSettings,
}

impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        match self {
            AppErrors::ValidationError(err) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            AppErrors::DatabaseError(DatabaseError::UnknownProduct)
            | AppErrors::DatabaseError(DatabaseError::UnknownAlert) => {
                StatusCode::BAD_REQUEST.into_response()
            }
            other => {
                error!("request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
