use actix_web::http::header::{HeaderMap, AUTHORIZATION};

/// Token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, unreadable, uses another scheme,
/// or carries no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("Bearer") || parts.next().is_some() {
        return None;
    }
    Some(token)
}
