//! Roster Server Library
//!
//! User CRUD API keyed by email. The same handlers run inside AWS Lambda
//! behind API Gateway and as a local axum server.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod lambda;
pub mod routes;
pub mod state;

// Re-export commonly used types for convenience
pub use api::{dispatch, ApiRequest, ApiResponse, ErrorBody};
pub use config::{ServerConfig, StorageBackend};
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use state::AppState;
