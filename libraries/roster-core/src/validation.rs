//! Input validation helpers

use regex::Regex;
use std::sync::OnceLock;

/// Shortest address the validator accepts (`a@b`)
pub const EMAIL_MIN_LEN: usize = 3;
/// Longest address the validator accepts (RFC 5321 path limit)
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // HTML5 / W3C address grammar: permissive local part, dot-separated
        // labels of at most 63 characters that neither start nor end with '-'.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Check whether `email` is a syntactically valid `local@domain` address.
///
/// Pure and infallible: anything that is not an address is simply `false`.
///
/// # Examples
///
/// ```rust
/// use roster_core::is_email_valid;
///
/// assert!(is_email_valid("ada@example.com"));
/// assert!(!is_email_valid("ada.example.com"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    (EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&email.len()) && email_regex().is_match(email)
}
