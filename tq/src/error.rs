//! Error types for tq commands.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid path {input:?}: {source}")]
    Path {
        input: String,
        #[source]
        source: terser::Error,
    },

    #[error("{failed} of {total} paths failed to parse")]
    CheckFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
