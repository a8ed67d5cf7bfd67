use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::RequestIdentity;
use crate::error::AppError;

/// Identity attached by the identity middleware.
///
/// Use `Option<CurrentUser>` on routes behind optional identity.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestIdentity);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn into_inner(self) -> RequestIdentity {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<RequestIdentity>().cloned();
        ready(
            identity
                .map(CurrentUser)
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
