/// User API handlers
///
/// Every domain failure becomes a 400 carrying the error's message. Only a
/// method with no handler gets a different status.
use super::{ApiRequest, ApiResponse};
use crate::error::Result;
use http::StatusCode;
use roster_core::UserError;
use roster_storage::UserRecords;

/// Body returned by a successful delete
pub const DELETED: &str = "Deleted Successfully";

const EMAIL_PARAM: &str = "email";

/// GET ?email= - Fetch one user
///
/// An unknown email answers 200 with an empty user.
pub async fn get_user(records: &UserRecords, request: &ApiRequest) -> Result<ApiResponse> {
    let Some(email) = request.query_param(EMAIL_PARAM) else {
        return bad_request(UserError::MissingEmailParameter);
    };

    match records.fetch_one(email).await {
        Ok(user) => ApiResponse::json(StatusCode::OK, &user),
        Err(err) => bad_request(err),
    }
}

/// POST - Create a user from the request body
pub async fn create_user(records: &UserRecords, request: &ApiRequest) -> Result<ApiResponse> {
    match records.create(&request.body).await {
        Ok(user) => ApiResponse::json(StatusCode::CREATED, &user),
        Err(err) => bad_request(err),
    }
}

/// PUT - Replace an existing user with the request body
pub async fn update_user(records: &UserRecords, request: &ApiRequest) -> Result<ApiResponse> {
    match records.update(&request.body).await {
        Ok(user) => ApiResponse::json(StatusCode::OK, &user),
        Err(err) => bad_request(err),
    }
}

/// DELETE ?email= - Remove a user
pub async fn delete_user(records: &UserRecords, request: &ApiRequest) -> Result<ApiResponse> {
    let Some(email) = request.query_param(EMAIL_PARAM) else {
        return bad_request(UserError::MissingEmailParameter);
    };

    match records.delete(email).await {
        Ok(()) => ApiResponse::json(StatusCode::OK, &DELETED),
        Err(err) => bad_request(err),
    }
}

/// Any other method
pub fn unhandled_method() -> Result<ApiResponse> {
    ApiResponse::error(StatusCode::BAD_GATEWAY, UserError::MethodNotAllowed)
}

fn bad_request(err: UserError) -> Result<ApiResponse> {
    ApiResponse::error(StatusCode::BAD_REQUEST, err)
}
