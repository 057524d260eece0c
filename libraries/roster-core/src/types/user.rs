/// User domain type
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User record, keyed by email
///
/// Only `email` has a fixed shape. Every other field of the JSON object is
/// kept in `profile` and round-trips through the store untouched.
///
/// A missing `email` deserializes to the empty string, so an empty store
/// item becomes an empty `User`. Callers tell "found" from "not found" with
/// [`User::is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    #[serde(default)]
    pub email: String,

    /// Free-form profile fields (`firstName`, `lastName`, `age`, ...)
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    /// Attribute that keys users in the store
    pub const KEY_ATTRIBUTE: &'static str = "email";

    /// Create a user with no profile fields
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            profile: Map::new(),
        }
    }

    /// Set a profile field, replacing any previous value
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(name.into(), value.into());
        self
    }

    /// Look up a profile field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.profile.get(name)
    }

    /// True when this is the empty user produced by a lookup miss
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
    }
}
