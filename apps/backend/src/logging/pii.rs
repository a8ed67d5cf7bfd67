//! Masking of credentials and personal data before it reaches a log line.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

// Vetted literals; a failure here is a programming error caught by the tests below.
#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]+\b").unwrap());

/// Compact JWS: three base64url segments separated by dots.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

/// Modular crypt bcrypt hash, e.g. `$2b$12$<53 chars>`.
#[allow(clippy::unwrap_used)]
static BCRYPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$2[abxy]?\$\d{2}\$[./A-Za-z0-9]{53}").unwrap());

/// Long opaque runs (secrets, raw keys).
#[allow(clippy::unwrap_used)]
static OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{32,}={0,2}").unwrap());

/// Mask emails down to their first character and domain, and replace tokens,
/// password hashes and long opaque runs with placeholders.
pub fn redact(input: &str) -> String {
    let out = BCRYPT.replace_all(input, "[REDACTED_HASH]");
    let out = JWT.replace_all(&out, "[REDACTED_JWT]");
    let out = EMAIL.replace_all(&out, |caps: &Captures| mask_email(&caps[0]));
    OPAQUE.replace_all(&out, "[REDACTED_TOKEN]").into_owned()
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None => email.to_string(),
    }
}

/// Formats its contents through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
