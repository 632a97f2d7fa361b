// crates/tripglobe-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by the fallible edges of the crate (loading files,
/// parsing configuration).
///
/// The clustering state machine itself never fails: guard-rejected events,
/// unknown cluster ids and stale camera completions are logged no-ops.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
