use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use backend::routes::{self, health, RouteLimits};
use backend::state::app_state::AppState;

type RouteConfigFn = Box<dyn FnOnce(&mut web::ServiceConfig)>;

/// Test service with the production middleware chain (minus CORS and
/// compression) and the production 404 handler.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// All routes, no rate limiting.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure));
        self
    }

    /// All routes behind the given limiters.
    pub fn with_limits(mut self, limits: RouteLimits) -> Self {
        self.route_config = Some(Box::new(move |cfg| {
            routes::configure_with_limits(cfg, &limits)
        }));
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(SecurityHeaders)
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = route_config {
                        config_fn(cfg);
                    }
                })
                .default_service(web::to(health::not_found)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
