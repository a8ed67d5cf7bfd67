use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::infra::db::ping;
use crate::state::app_state::AppState;

/// Liveness plus database reachability. Always 200.
pub async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::internal(format!("failed to format timestamp: {e}")))?;

    let database = match app_state.db() {
        None => "unavailable",
        Some(db) => match ping(db).await {
            Ok(()) => "ok",
            Err(_) => "error",
        },
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": timestamp,
        "environment": app_state.env.as_str(),
        "database": database,
    })))
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the Starter Kit API",
        "version": env!("CARGO_PKG_VERSION"),
        "documentation": "/api/v1",
    }))
}

/// Default service for unmatched routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Route not found",
        "path": req.uri().to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/", web::get().to(root));
}
