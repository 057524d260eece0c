//! AWS Lambda adapter
//!
//! Translates API Gateway proxy events into [`ApiRequest`] and back.

use crate::api::{self, ApiRequest, ApiResponse};
use crate::error::{Result, ServerError};
use crate::state::AppState;
use lambda_http::http::{header, HeaderValue, StatusCode};
use lambda_http::{service_fn, Body, Request, RequestExt, Response};
use serde_json::json;
use std::collections::HashMap;

/// Build an [`ApiRequest`] from a Lambda event
///
/// Repeated query parameters keep their first value. Invalid UTF-8 in a
/// binary body is replaced, so it fails to parse as a user rather than
/// failing the invocation.
pub fn to_api_request(event: &Request) -> ApiRequest {
    let query = event
        .query_string_parameters()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .fold(HashMap::new(), |mut query, (name, value)| {
            query.entry(name).or_insert(value);
            query
        });

    let body = match event.body() {
        Body::Empty => String::new(),
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    };

    ApiRequest {
        method: event.method().clone(),
        query,
        body,
    }
}

/// Convert an [`ApiResponse`] into the Lambda response type
pub fn to_lambda_response(response: ApiResponse) -> Result<Response<Body>> {
    let response = Response::builder()
        .status(response.status)
        .header(header::CONTENT_TYPE, ApiResponse::CONTENT_TYPE)
        .body(Body::Text(response.body))?;

    Ok(response)
}

/// 500 with the same `{"error": ...}` body the local server sends
pub fn error_response(err: &ServerError) -> Response<Body> {
    let body = json!({ "error": err.report() }).to_string();

    let mut response = Response::new(Body::Text(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(ApiResponse::CONTENT_TYPE),
    );
    response
}

/// Handle one Lambda invocation. Always produces a response.
pub async fn handle(state: &AppState, event: Request) -> Response<Body> {
    let request = to_api_request(&event);
    api::dispatch(&state.records, &request)
        .await
        .and_then(to_lambda_response)
        .unwrap_or_else(|err| error_response(&err))
}

/// Run the Lambda runtime loop until the execution environment shuts down
pub async fn run_lambda(state: AppState) -> std::result::Result<(), lambda_http::Error> {
    tracing::info!("Starting Lambda runtime");

    lambda_http::run(service_fn(move |event: Request| {
        let state = state.clone();
        async move { Ok::<_, lambda_http::Error>(handle(&state, event).await) }
    }))
    .await
}
