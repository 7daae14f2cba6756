//! Errors surfaced at the crate boundary
//!
//! The simulation step is total; only caller-facing hooks (phase jumps,
//! mode and settings parsing) can fail.

/// Boundary error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown game mode: '{0}'")]
    UnknownMode(String),
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
