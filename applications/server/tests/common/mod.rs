//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use roster_core::User;
use roster_server::{create_router, AppState, StorageBackend};
use roster_storage::{MemoryStore, UserRecords};
use std::sync::Arc;

/// Router over a fresh in-memory store, plus the store for inspection
pub fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(User::KEY_ATTRIBUTE));
    let state = AppState::new(UserRecords::new(store.clone()), StorageBackend::Memory);
    (create_router(state), store)
}

/// Build a request with an optional JSON body
pub fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test user fixtures
pub mod fixtures {
    pub const ADA_EMAIL: &str = "ada@example.com";
    pub const ADA_BODY: &str = r#"{"email":"ada@example.com","firstName":"Ada","lastName":"Lovelace"}"#;
}
