use std::path::PathBuf;

use thiserror::Error;

/// Failures of the dataset → chart → report pipeline.
///
/// None of these is fatal: the controller turns each of them into an empty
/// or unchanged widget plus a status line.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("Dataset not found: {name}")]
    NotFound { name: String },

    #[error("Failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
