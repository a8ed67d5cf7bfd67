//! Per-IP fixed-window rate limiting.
//!
//! Two limiters are built from [`RateLimitSettings`]: a strict one wrapping
//! register and login, and a general one on the whole `/api/v1` scope. Both
//! key on the client's real IP and answer 429 with the standard envelope.

use std::future::{ready, Ready};

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::{SimpleInput, SimpleOutput};
use actix_extensible_rate_limit::RateLimiter;
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, ResponseError};

use crate::config::app::RateLimitSettings;
use crate::error::AppError;
use crate::logging::security;

/// A limiter's backing store plus its window; clone to share counters
/// between the workers of one server.
#[derive(Clone)]
pub struct RateLimit {
    backend: InMemoryBackend,
    settings: RateLimitSettings,
    label: &'static str,
}

type InputFn = Box<dyn Fn(&ServiceRequest) -> Ready<Result<SimpleInput, actix_web::Error>>>;

pub type IpRateLimiter = RateLimiter<InMemoryBackend, SimpleOutput, InputFn>;

impl RateLimit {
    pub fn new(settings: RateLimitSettings, label: &'static str) -> Self {
        Self {
            backend: InMemoryBackend::builder().build(),
            settings,
            label,
        }
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    /// Middleware instance sharing this limiter's counters.
    pub fn limiter(&self) -> IpRateLimiter {
        let settings = self.settings;
        let label = self.label;

        let input: InputFn = Box::new(move |req: &ServiceRequest| {
            ready(Ok(SimpleInput {
                interval: settings.window,
                max_requests: settings.max_requests,
                key: client_key(label, req),
            }))
        });

        RateLimiter::builder(self.backend.clone(), input)
            .add_headers()
            .request_denied_response(move |_| too_many_requests(label))
            .build()
    }
}

/// `<label>:<client ip>`; requests without a resolvable address share one bucket.
fn client_key(label: &str, req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let ip = info.realip_remote_addr().unwrap_or("unknown");
    format!("{label}:{ip}")
}

fn too_many_requests(label: &str) -> HttpResponse {
    security::rate_limit_hit(label);
    AppError::TooManyRequests.error_response()
}
