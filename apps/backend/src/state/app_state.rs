use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::app::RuntimeEnv;

/// Shared, read-only application state handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when running without a database (some tests)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub env: RuntimeEnv,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, env: RuntimeEnv) -> Self {
        Self {
            db: Some(db),
            security,
            env,
        }
    }

    pub fn without_db(security: SecurityConfig, env: RuntimeEnv) -> Self {
        Self {
            db: None,
            security,
            env,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
