use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidJson, ValidPath};
use crate::http::Envelope;
use crate::middleware::Identity;
use crate::repos::users::Pagination;
use crate::services::users as user_service;
use crate::state::app_state::AppState;
use crate::validation::schemas::{UpdateProfile, UserIdPath};

/// Raw listing query. Values that do not parse fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
}

impl ListQuery {
    fn from_request(req: &HttpRequest) -> Self {
        web::Query::<ListQuery>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default()
    }

    fn pagination(&self) -> Pagination {
        let num = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<u64>().ok());
        Pagination::new(num(&self.page), num(&self.limit))
    }
}

async fn list(
    req: HttpRequest,
    viewer: Option<CurrentUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = ListQuery::from_request(&req);
    if let Some(viewer) = &viewer {
        debug!(viewer = %viewer.id(), "listing users");
    }

    let db = require_db(&app_state)?;
    let page = user_service::list_users(db, query.pagination(), query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(page)))
}

async fn get_one(
    path: ValidPath<UserIdPath>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = user_service::get_user(db, &path.into_inner().id).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(serde_json::json!({ "user": user }))))
}

async fn update_profile(
    user: CurrentUser,
    body: ValidJson<UpdateProfile>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let updated = user_service::update_profile(db, user.id(), body.into_inner().name).await?;
    Ok(HttpResponse::Ok().json(
        Envelope::ok(serde_json::json!({ "user": updated }))
            .with_message("Profile updated successfully"),
    ))
}

async fn delete_account(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    user_service::delete_account(db, user.id()).await?;
    Ok(HttpResponse::Ok().json(Envelope::done("Account deleted successfully")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments first so they are not taken as an id.
    cfg.service(
        web::resource("/profile")
            .wrap(Identity::strict())
            .route(web::put().to(update_profile)),
    )
    .service(
        web::resource("/account")
            .wrap(Identity::strict())
            .route(web::delete().to(delete_account)),
    )
    .service(
        web::resource("")
            .wrap(Identity::optional())
            .route(web::get().to(list)),
    )
    .route("/{id}", web::get().to(get_one));
}
