//! Error types for the zones crate

use seq_core::SeqError;
use seq_protocol::DecodeError;
use std::path::PathBuf;

/// Zone tracking errors
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    /// A zone record could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Zone state file could not be opened, read or written
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Zone state file does not start with the expected magic
    #[error("Bad magic in {path:?}: {found:02x?}")]
    BadMagic { path: PathBuf, found: [u8; 4] },
}

impl From<ZoneError> for SeqError {
    fn from(err: ZoneError) -> Self {
        match err {
            ZoneError::Decode(e) => e.into(),
            ZoneError::File(e) => SeqError::Io(e),
            other => SeqError::Persistence(other.to_string()),
        }
    }
}

/// Result type for zone operations
pub type Result<T> = std::result::Result<T, ZoneError>;
