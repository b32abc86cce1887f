use std::path::PathBuf;

/// Error kinds surfaced by a single invocation.
///
/// Every variant is terminal. `InvalidArgumentFormat` is the only one the CLI
/// treats differently: it shows usage instead of an `[error]` line.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid format: {0}")]
    InvalidArgumentFormat(String),

    #[error("unsupported http method '{method}', only {accepted} are supported")]
    UnsupportedMethod { method: String, accepted: String },

    #[error("no config found for {alias}, make sure it exists at {}", .path.display())]
    AliasNotFound { alias: String, path: PathBuf },

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create default config at {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header format: '{0}'. Use 'Key: Value'")]
    InvalidHeader(String),

    #[error("failed to build request: {0}")]
    RequestBuild(String),

    #[error("failed to execute request: {0}")]
    Network(String),
}

impl AppError {
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, AppError::InvalidArgumentFormat(_))
    }
}
