//! Roster Core
//!
//! Transport-agnostic core types, traits, and error handling for Roster.
//!
//! This crate provides the building blocks shared by the storage adapters
//! and the request handlers.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User` and the store-level `Item`
//! - **Core Traits**: `KeyedStore`, the get/put/scan/delete store capability
//! - **Validation**: `is_email_valid`
//! - **Error Handling**: the fixed `UserError` taxonomy and `StoreError`
//!
//! # Example
//!
//! ```rust
//! use roster_core::{is_email_valid, User};
//!
//! let user: User = serde_json::from_str(r#"{"email":"ada@example.com","name":"Ada"}"#).unwrap();
//! assert!(is_email_valid(&user.email));
//! assert_eq!(user.field("name"), Some(&serde_json::json!("Ada")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, StoreError, StoreResult, UserError};
pub use storage::{Item, KeyedStore};
pub use types::User;
pub use validation::is_email_valid;
