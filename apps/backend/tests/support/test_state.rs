use backend::config::app::RuntimeEnv;
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Test signing key and the cheapest bcrypt cost.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes()).with_bcrypt_cost(4)
}

/// Fresh, migrated in-memory SQLite database per call.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .build()
        .await
}

/// State with no database; any handler that reaches persistence fails.
pub async fn build_test_state_without_db() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_security(test_security())
        .build()
        .await
}
