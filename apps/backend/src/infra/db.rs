//! Database connection bootstrap.

use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Connect, then apply pending migrations.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let started = Instant::now();

    let conn = retry_connection(
        || connect(kind, url.clone()),
        attempts_for(kind),
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;

    info!(
        db_kind = ?kind,
        url = %sanitize_db_url(&url),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "database ready"
    );
    Ok(conn)
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(conn: &DatabaseConnection) -> Result<(), AppError> {
    conn.execute_unprepared("SELECT 1").await?;
    Ok(())
}

fn attempts_for(kind: DbKind) -> u32 {
    match kind {
        DbKind::Postgres => CONNECT_ATTEMPTS,
        DbKind::SqliteMemory => 1,
    }
}

async fn connect(kind: DbKind, url: String) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url);
    match kind {
        DbKind::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
        // Every pooled connection to sqlite::memory: would be its own database.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
    }
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Strip the password from a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}
