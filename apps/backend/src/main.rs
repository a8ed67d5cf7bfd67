use std::process::ExitCode;

use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use backend::config::app::{install_runtime_env, AppConfig, RuntimeEnv};
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::middleware::{
    cors_middleware, RateLimit, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes::{self, health, RouteLimits};
use backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

/// Seconds in-flight requests get to finish after SIGINT/SIGTERM.
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

#[actix_web::main]
async fn main() -> ExitCode {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    let log_env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(RuntimeEnv::Development);
    telemetry::init_tracing(log_env);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    install_runtime_env(config.env);

    let app_state = match build_state()
        .with_env(config.env)
        .with_db(DbKind::Postgres)
        .with_security(SecurityConfig::from_config(&config))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            return ExitCode::FAILURE;
        }
    };

    let data = web::Data::new(app_state);
    let limits = RouteLimits {
        auth: Some(RateLimit::new(config.auth_rate_limit, "auth")),
        api: Some(RateLimit::new(config.api_rate_limit, "api")),
    };

    let server = HttpServer::new(move || {
        let limits = limits.clone();
        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(Compress::default())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(move |cfg| routes::configure_with_limits(cfg, &limits))
            .default_service(web::to(health::not_found))
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind((config.host.as_str(), config.port));

    let server = match server {
        Ok(server) => server,
        Err(e) => {
            error!(host = %config.host, port = config.port, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        environment = config.env.as_str(),
        "server listening"
    );

    match server.run().await {
        Ok(()) => {
            info!("server shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "server terminated with an error");
            ExitCode::FAILURE
        }
    }
}
