use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The application enumeration could not run. The catalog stays as loaded.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("application source unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed application list: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("malformed export: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save failed: {0}")]
    Platform(#[from] PlatformError),
}

/// Failure reported by a side-effecting platform capability.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}
