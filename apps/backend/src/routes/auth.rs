use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidJson};
use crate::http::Envelope;
use crate::middleware::{Identity, RateLimit};
use crate::services::auth as auth_service;
use crate::state::app_state::AppState;
use crate::validation::schemas::{LoginUser, RegisterUser};

async fn register(
    body: ValidJson<RegisterUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let payload = auth_service::register(db, &app_state.security, body.into_inner()).await?;
    Ok(HttpResponse::Created()
        .json(Envelope::ok(payload).with_message("User registered successfully")))
}

async fn login(
    body: ValidJson<LoginUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let payload = auth_service::login(db, &app_state.security, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(payload).with_message("Login successful")))
}

async fn profile(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(Envelope::ok(serde_json::json!({ "user": user.into_inner() }))))
}

/// `/register`, `/login` (behind `limit` when given) and `/profile`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limit: Option<&RateLimit>) {
    match limit {
        Some(limit) => {
            cfg.service(
                web::resource("/register")
                    .wrap(limit.limiter())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/login")
                    .wrap(limit.limiter())
                    .route(web::post().to(login)),
            );
        }
        None => {
            cfg.route("/register", web::post().to(register))
                .route("/login", web::post().to(login));
        }
    }

    cfg.service(
        web::resource("/profile")
            .wrap(Identity::strict())
            .route(web::get().to(profile)),
    );
}
