//! Structured security events. Each carries an `event` field so they can be
//! filtered out of the general request log.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Failed login. `reason` is internal only; clients always see the generic message.
pub fn login_failed(reason: &str, email: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        trace_id = %trace_ctx::trace_id(),
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

pub fn login_succeeded(user_id: &str, email: &str) {
    info!(
        event = "SECURITY_LOGIN_OK",
        trace_id = %trace_ctx::trace_id(),
        user_id,
        email = %Redacted(email),
        "User logged in"
    );
}

/// Bearer token rejected by strict identity.
pub fn token_rejected(reason: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        trace_id = %trace_ctx::trace_id(),
        reason,
        "Bearer token rejected"
    );
}

pub fn rate_limit_hit(endpoint: &str) {
    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        trace_id = %trace_ctx::trace_id(),
        endpoint,
        "Rate limit exceeded"
    );
}
