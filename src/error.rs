use std::path::PathBuf;

/// Drawing surface failures. The animator treats all of these as "stay idle
/// until the next resize", never as fatal.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("drawing context unavailable")]
    Unavailable,
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
