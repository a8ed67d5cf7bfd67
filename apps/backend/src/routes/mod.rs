use actix_web::web;

use crate::middleware::RateLimit;

pub mod auth;
pub mod health;
pub mod users;

/// Rate limiters applied by [`configure_with_limits`]. `None` disables one.
#[derive(Clone, Default)]
pub struct RouteLimits {
    /// register and login
    pub auth: Option<RateLimit>,
    /// the whole `/api/v1` scope
    pub api: Option<RateLimit>,
}

/// All routes, without rate limiting.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_with_limits(cfg, &RouteLimits::default());
}

/// All routes. The app's default service should be [`health::not_found`].
pub fn configure_with_limits(cfg: &mut web::ServiceConfig, limits: &RouteLimits) {
    cfg.configure(health::configure_routes);

    let auth_limit = limits.auth.as_ref();
    let api = |c: &mut web::ServiceConfig| {
        c.service(web::scope("/auth").configure(|c| auth::configure_routes(c, auth_limit)))
            .service(web::scope("/users").configure(users::configure_routes));
    };

    match &limits.api {
        Some(limit) => cfg.service(web::scope("/api/v1").wrap(limit.limiter()).configure(api)),
        None => cfg.service(web::scope("/api/v1").configure(api)),
    };
}
