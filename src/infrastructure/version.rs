pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set at build time, e.g. `ASHTTP_GIT_COMMIT=$(git rev-parse --short HEAD) cargo build`.
pub const GIT_COMMIT: &str = match option_env!("ASHTTP_GIT_COMMIT") {
    Some(commit) => commit,
    None => "n/a",
};

pub const BUILD_DATE: &str = match option_env!("ASHTTP_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

pub fn info() -> String {
    format!("ashttp {} (commit: {}, built: {})", VERSION, GIT_COMMIT, BUILD_DATE)
}
