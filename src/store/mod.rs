pub mod csv;
pub mod history;
pub mod tone;

pub use csv::*;
pub use history::*;
pub use tone::*;

use thiserror::Error;

/// Errors raised by the flat-file stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed log data: {reason}")]
    Malformed { reason: String },

    #[error("tone memory is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
