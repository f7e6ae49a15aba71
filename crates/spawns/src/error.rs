//! Spawn tracking errors

use seq_core::SeqError;
use seq_protocol::DecodeError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad magic in {path:?}: {found:02x?}")]
    BadMagic { path: PathBuf, found: [u8; 4] },
}

impl From<SpawnError> for SeqError {
    fn from(err: SpawnError) -> Self {
        match err {
            SpawnError::Decode(e) => e.into(),
            SpawnError::Io(e) => SeqError::Io(e),
            other => SeqError::Persistence(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpawnError>;
