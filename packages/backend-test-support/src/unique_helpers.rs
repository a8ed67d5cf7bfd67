//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Lowercase `{prefix}-{ulid}@example.com`, already in the form the API
/// stores.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("test");
/// assert_ne!(a, unique_email("test"));
/// assert_eq!(a, a.to_lowercase());
/// assert!(a.ends_with("@example.com"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Ulid::new()).to_lowercase()
}
