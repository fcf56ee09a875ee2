//! Tracing initialization for the advisory service

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with a crate-targeted default filter.
///
/// `RUST_LOG` overrides the `--log-level` flag when set.
pub fn init_tracing(log_level: &str) {
    let default_filter = format!("agro_advisory={log_level},tower_http=warn,sqlx=warn,reqwest=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
