use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("invalid size '{0}', expected WIDTHxHEIGHT such as 100x36")]
    BadSize(String),

    #[error("no district at index {index} ({count} loaded)")]
    SnapshotIndex { index: usize, count: usize },

    #[error("no districts to show")]
    NoDistricts,
}
