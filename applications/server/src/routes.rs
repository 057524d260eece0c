/// Local HTTP server routes
///
/// Mirrors an API Gateway proxy integration: apart from `/health`, every
/// path and method is handed to the dispatcher.
use crate::api::{self, ApiRequest};
use crate::error::Result;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::Method,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        .fallback(proxy)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn proxy(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Result<impl IntoResponse> {
    let request = ApiRequest {
        method,
        query,
        body,
    };
    api::dispatch(&state.records, &request).await
}
