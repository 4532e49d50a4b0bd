use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading index documents from a local content root.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid index {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IndexError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        IndexError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Failure while loading an index document over HTTP.
///
/// Kept cloneable so it can sit in UI state and be rendered next to the
/// still-usable product list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed index {url}: {message}")]
    Parse { url: String, message: String },
}

impl LoadError {
    pub fn parse(url: &str, err: &serde_json::Error) -> Self {
        LoadError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
