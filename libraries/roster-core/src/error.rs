/// Core error types for Roster
use thiserror::Error;

/// Result type alias using `UserError`
pub type Result<T> = std::result::Result<T, UserError>;

/// Result type alias for store adapters
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Domain errors surfaced to API clients.
///
/// The messages are part of the wire contract and must not change. Clients
/// match on the exact strings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    /// Request body does not parse as a user
    #[error("invalid user data")]
    InvalidUserData,

    /// Email fails syntax validation
    #[error("invalid email")]
    InvalidEmail,

    /// Create target email already present
    #[error("user.User already exist")]
    UserAlreadyExists,

    /// Update target email absent
    #[error("user.User does not exists")]
    UserDoesNotExist,

    /// Store read failed
    #[error("Failed to fetch data")]
    FetchFailed,

    /// Stored item could not be turned back into a user
    #[error("Failed to unmarshal record")]
    UnmarshalFailed,

    /// User could not be turned into a store item
    #[error("could not marshal item")]
    CouldNotMarshalItem,

    /// Store write failed
    #[error("could not update item")]
    CouldNotPutItem,

    /// Store delete failed
    #[error("could not delete item")]
    CouldNotDeleteItem,

    /// No handler mapped for the HTTP method
    #[error("method not allowed")]
    MethodNotAllowed,

    /// `email` query parameter absent or empty
    #[error("missing email parameter")]
    MissingEmailParameter,
}

/// Errors raised by `KeyedStore` implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store connection could not be established
    #[error("Store connection error: {0}")]
    Connection(String),

    /// The backing service rejected or failed the request
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Item has no usable value for the key attribute
    #[error("Item is missing key attribute `{0}`")]
    MissingKey(String),

    /// Item could not be converted to or from the store's native format
    #[error("Codec error: {0}")]
    Codec(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for SQL-backed stores)
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a codec error
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_contract() {
        let cases = [
            (UserError::InvalidUserData, "invalid user data"),
            (UserError::InvalidEmail, "invalid email"),
            (UserError::UserAlreadyExists, "user.User already exist"),
            (UserError::UserDoesNotExist, "user.User does not exists"),
            (UserError::FetchFailed, "Failed to fetch data"),
            (UserError::UnmarshalFailed, "Failed to unmarshal record"),
            (UserError::CouldNotMarshalItem, "could not marshal item"),
            (UserError::CouldNotPutItem, "could not update item"),
            (UserError::CouldNotDeleteItem, "could not delete item"),
            (UserError::MethodNotAllowed, "method not allowed"),
            (UserError::MissingEmailParameter, "missing email parameter"),
        ];

        for (error, message) in cases {
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn store_error_wraps_serde_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let store_err = StoreError::from(err);
        assert!(matches!(store_err, StoreError::Serialization(_)));
    }
}
