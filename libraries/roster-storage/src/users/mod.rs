//! User record access
//!
//! Each operation is a single round trip (or a fetch followed by a put) to
//! the keyed store. Nothing is cached; Create and Update re-fetch the target
//! before writing.
//!
//! Create's existence check and its put are two separate store calls, so two
//! concurrent creates for the same email can both succeed. The store offers
//! no conditional put here.

use roster_core::{is_email_valid, Item, KeyedStore, Result, StoreError, User, UserError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Record Access Layer over a keyed store
#[derive(Clone)]
pub struct UserRecords {
    store: Arc<dyn KeyedStore>,
}

impl UserRecords {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<dyn KeyedStore> {
        &self.store
    }

    /// Look up a user by email
    ///
    /// A miss is not an error: it returns an empty [`User`] whose email is
    /// the empty string. Check [`User::is_empty`] to tell the two apart.
    pub async fn fetch_one(&self, email: &str) -> Result<User> {
        let item = self.store.get_by_key(email).await.map_err(|err| {
            warn!(email, error = %err, "failed to fetch user");
            read_error(&err)
        })?;

        from_item(item.unwrap_or_default())
    }

    /// Read every user in the store
    ///
    /// Fails with `UnmarshalFailed` if any stored item is not a valid user.
    pub async fn fetch_all(&self) -> Result<Vec<User>> {
        let items = self.store.scan().await.map_err(|err| {
            warn!(error = %err, "failed to scan users");
            read_error(&err)
        })?;

        items.into_iter().map(from_item).collect()
    }

    /// Create a user from a JSON request body
    pub async fn create(&self, body: &str) -> Result<User> {
        let user = parse_body(body)?;

        if !is_email_valid(&user.email) {
            debug!(email = %user.email, "rejecting invalid email");
            return Err(UserError::InvalidEmail);
        }

        let current = self.fetch_one(&user.email).await?;
        if !current.is_empty() {
            return Err(UserError::UserAlreadyExists);
        }

        self.put(&user).await?;
        info!(email = %user.email, "user created");
        Ok(user)
    }

    /// Replace an existing user with the JSON request body
    ///
    /// Full overwrite: fields missing from `body` are dropped from the
    /// record. The email is not re-validated; an address that never passed
    /// Create cannot exist and fails with `UserDoesNotExist`.
    pub async fn update(&self, body: &str) -> Result<User> {
        let user = parse_body(body)?;

        // DynamoDB rejects an empty key outright
        if user.email.is_empty() {
            return Err(UserError::UserDoesNotExist);
        }

        let current = self.fetch_one(&user.email).await?;
        if current.is_empty() {
            return Err(UserError::UserDoesNotExist);
        }

        self.put(&user).await?;
        info!(email = %user.email, "user updated");
        Ok(user)
    }

    /// Delete a user by email
    ///
    /// Deleting an absent email succeeds.
    pub async fn delete(&self, email: &str) -> Result<()> {
        self.store.delete_by_key(email).await.map_err(|err| {
            warn!(email, error = %err, "failed to delete user");
            UserError::CouldNotDeleteItem
        })?;

        info!(email, "user deleted");
        Ok(())
    }

    async fn put(&self, user: &User) -> Result<()> {
        let item = to_item(user)?;
        self.store.put_item(item).await.map_err(|err| {
            warn!(email = %user.email, error = %err, "failed to put user");
            UserError::CouldNotPutItem
        })
    }
}

// The adapter read the item but could not decode it
fn read_error(err: &StoreError) -> UserError {
    match err {
        StoreError::Codec(_) | StoreError::Serialization(_) => UserError::UnmarshalFailed,
        _ => UserError::FetchFailed,
    }
}

fn parse_body(body: &str) -> Result<User> {
    serde_json::from_str(body).map_err(|err| {
        debug!(error = %err, "request body is not a user");
        UserError::InvalidUserData
    })
}

fn to_item(user: &User) -> Result<Item> {
    match serde_json::to_value(user) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => {
            warn!(kind = ?other, "user did not serialize to an object");
            Err(UserError::CouldNotMarshalItem)
        }
        Err(err) => {
            warn!(error = %err, "failed to marshal user");
            Err(UserError::CouldNotMarshalItem)
        }
    }
}

fn from_item(item: Item) -> Result<User> {
    serde_json::from_value(Value::Object(item)).map_err(|err| {
        warn!(error = %err, "failed to unmarshal user record");
        UserError::UnmarshalFailed
    })
}
