//! Request Handler Layer
//!
//! Handlers see a transport-neutral [`ApiRequest`] and produce an
//! [`ApiResponse`]. The Lambda runtime and the local axum server each
//! translate their own request type into these.

pub mod health;
pub mod users;

use crate::error::Result;
use axum::response::{IntoResponse, Response};
use http::{header, Method, StatusCode};
use roster_core::UserError;
use roster_storage::UserRecords;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inbound request: method, query string parameters and raw body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: String,
}

impl ApiRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: HashMap::new(),
            body: String::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Query parameter, treating an empty value as absent
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Outbound response. The body is always JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Serialize `value` as the response body
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_string(value)?,
        })
    }

    /// `{"error": "<message>"}` with the given status
    pub fn error(status: StatusCode, err: UserError) -> Result<Self> {
        Self::json(status, &ErrorBody::from(err))
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, Self::CONTENT_TYPE)],
            self.body,
        )
            .into_response()
    }
}

/// Error payload returned to clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<UserError> for ErrorBody {
    fn from(err: UserError) -> Self {
        Self {
            error: Some(err.to_string()),
        }
    }
}

/// Route a request to its handler by HTTP method
pub async fn dispatch(records: &UserRecords, request: &ApiRequest) -> Result<ApiResponse> {
    tracing::debug!(method = %request.method, "dispatching request");

    match request.method {
        Method::GET => users::get_user(records, request).await,
        Method::POST => users::create_user(records, request).await,
        Method::PUT => users::update_user(records, request).await,
        Method::DELETE => users::delete_user(records, request).await,
        _ => users::unhandled_method(),
    }
}
