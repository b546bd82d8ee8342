//! File-backed collaborators: session snapshots, the audit log and the
//! credential file.

pub mod audit;
pub mod auth;
pub mod snapshot;

use thiserror::Error;

/// Errors arising from reading or writing session files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data file: {0}")]
    Malformed(String),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
