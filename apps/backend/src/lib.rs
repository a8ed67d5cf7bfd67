#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod validation;


pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use auth::RequestIdentity;
pub use config::app::{AppConfig, RuntimeEnv};
pub use config::db::DbKind;
pub use error::AppError;
pub use extractors::{CurrentUser, ValidJson, ValidPath};
pub use http::Envelope;
pub use infra::state::build_state;
pub use middleware::{
    cors_middleware, Identity, RateLimit, RequestTrace, SecurityHeaders, StructuredLogger,
    TraceSpan,
};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
