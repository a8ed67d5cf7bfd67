use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use backend::config::app::RuntimeEnv;

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Install the global subscriber: JSON lines everywhere except development,
/// which gets the compact human format. `RUST_LOG` overrides the filter.
pub fn init_tracing(env: RuntimeEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if env == RuntimeEnv::Development {
        registry
            .with(fmt::layer().compact().with_target(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init();
    }
}
