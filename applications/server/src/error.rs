/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::StoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Failures outside the user domain: bootstrap, configuration and transport.
/// Domain failures are [`roster_core::UserError`] and never reach this type.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Log the details and return the message safe to show a client
    pub fn report(&self) -> &'static str {
        match self {
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error"
            }
            ServerError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "Storage error"
            }
            ServerError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Serialization error"
            }
            ServerError::Http(e) => {
                tracing::error!("HTTP error: {:?}", e);
                "HTTP error"
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                "IO error"
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.report(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
