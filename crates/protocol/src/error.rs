//! Decode errors for wire records

use seq_core::SeqError;

/// Wire decoding errors
///
/// Every variant aborts the record being decoded. Callers drop the
/// record and leave downstream state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// A read would run past the end of the buffer
    #[error("read of {wanted} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        available: usize,
    },

    /// A NUL-terminated string ran off the end of the buffer
    #[error("unterminated string starting at offset {offset}")]
    Unterminated { offset: usize },

    /// A polymorphic record carried a discriminant with no known variant
    #[error("{record}: unknown variant discriminant {value}")]
    UnknownVariant { record: &'static str, value: i64 },

    /// Trailing bytes do not divide into whole elements
    #[error("{record}: {extra} trailing bytes do not form a whole {element_len}-byte element")]
    PartialElement {
        record: &'static str,
        element_len: usize,
        extra: usize,
    },

    /// The buffer length matches none of the shapes a record can take
    #[error("{record}: unexpected length {len}")]
    UnexpectedLength { record: &'static str, len: usize },
}

impl From<DecodeError> for SeqError {
    fn from(err: DecodeError) -> Self {
        SeqError::Decode(err.to_string())
    }
}

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;
