//! Library error type.
//!
//! The scoring pipeline itself never fails; errors only come from the
//! edges that touch serialized records or the filesystem.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("schema record error: {0}")]
    Record(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
