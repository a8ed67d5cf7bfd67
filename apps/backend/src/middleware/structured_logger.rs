use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;

/// Paths that are not access-logged.
const QUIET_PATHS: &[&str] = &["/health"];

/// One access-log line per request.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if QUIET_PATHS.contains(&req.path()) {
            return Box::pin(self.service.call(req));
        }

        let start = Instant::now();
        let method = req.method().to_string();
        let url = req.uri().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, content_length) = match &result {
                Ok(res) => (res.status(), response_length(res)),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            let duration_ms = start.elapsed().as_millis() as u64;
            let status_code = status.as_u16();
            let content_length = content_length.unwrap_or(0);

            if status.is_server_error() {
                error!(http.method = %method, url = %url, http.status_code = status_code, content_length, duration_ms, trace_id = %trace_id, "request completed");
            } else if status.is_client_error() {
                warn!(http.method = %method, url = %url, http.status_code = status_code, content_length, duration_ms, trace_id = %trace_id, "request completed");
            } else {
                info!(http.method = %method, url = %url, http.status_code = status_code, content_length, duration_ms, trace_id = %trace_id, "request completed");
            }

            result
        })
    }
}

fn response_length<B: MessageBody>(res: &ServiceResponse<B>) -> Option<u64> {
    if let Some(len) = res
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
    {
        return Some(len);
    }
    match res.response().body().size() {
        actix_web::body::BodySize::Sized(n) => Some(n),
        _ => None,
    }
}
