use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter that overrides the configured level.
pub const LOG_ENV: &str = "COLOPHON_LOG";

/// Installs the global stderr subscriber. Later calls are ignored.
pub fn init(level: &str) {
    let filter = build_filter(std::env::var(LOG_ENV).ok(), level);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_filter(from_env: Option<String>, level: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}
