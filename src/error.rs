//! Crate error types.

use thiserror::Error;

/// Failure while saving or loading an agent model snapshot.
///
/// Always non-fatal: a failed load is reported and leaves the agent's
/// in-memory state untouched.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("bad table key `{0}`")]
    Key(String),
}
