use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `ASHTTP_LOG=debug`.
pub const LOG_ENV: &str = "ASHTTP_LOG";

/// Installs a stderr subscriber so stdout carries only the response.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
