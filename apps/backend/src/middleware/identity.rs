//! Bearer-token identity middleware.
//!
//! Reads `Authorization: Bearer <token>`, verifies it, loads the subject and
//! stores a [`RequestIdentity`] in the request extensions for the
//! `CurrentUser` extractor.
//!
//! `Identity::strict()` answers 401 on any failure. `Identity::optional()`
//! never blocks: failures just leave the request without an identity.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::auth::{verify_access_token, RequestIdentity};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::bearer_token;
use crate::logging::security;
use crate::repos::users;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    Strict,
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct Identity {
    mode: IdentityMode,
}

impl Identity {
    pub fn strict() -> Self {
        Self {
            mode: IdentityMode::Strict,
        }
    }

    pub fn optional() -> Self {
        Self {
            mode: IdentityMode::Optional,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Identity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddleware {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

pub struct IdentityMiddleware<S> {
    service: Rc<S>,
    mode: IdentityMode,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;

        Box::pin(async move {
            match resolve_identity(&req).await {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                }
                Err(err) if mode == IdentityMode::Strict => {
                    security::token_rejected(err.code().as_str());
                    return Ok(req.error_response(err).map_into_right_body());
                }
                Err(err) => {
                    debug!(code = %err.code(), "continuing without identity");
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

async fn resolve_identity(req: &ServiceRequest) -> Result<RequestIdentity, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(AppError::unauthorized_missing_bearer)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_access_token(token, &state.security)?;

    let db = require_db(state)?;
    let user = users::find_user_by_id(db, &claims.sub)
        .await?
        .ok_or_else(AppError::unauthorized_user_not_found)?;

    Ok(RequestIdentity::from(user))
}
