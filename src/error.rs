use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the layers around the query engine and distance estimator
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("client '{0}' must be saved before properties can be added")]
    UnsavedClient(String),

    #[error("client {0} not found")]
    ClientNotFound(i32),

    #[error("failed to read directory snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid directory snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
