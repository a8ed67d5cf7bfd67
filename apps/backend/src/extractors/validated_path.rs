use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::validation::{validate_into, Validated};

/// Route parameters checked against the payload type's schema.
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

impl<T> ValidPath<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidPath<T>
where
    T: Validated + 'static,
{
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let params: Map<String, Value> = req
            .match_info()
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        ready(validate_into::<T>(&Value::Object(params)).map(ValidPath))
    }
}
