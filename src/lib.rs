pub mod accounts;
pub mod config;
pub mod db;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;

/// Installs the `tracing` subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn"));
    // a second call (tests, tools) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
