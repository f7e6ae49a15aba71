//! Recorded record streams
//!
//! A capture file is the 4-byte magic `SEQR` followed by records until the
//! end of the file. Each record, little-endian:
//!
//! ```text
//! time i64 (seconds), direction u8 (1 client, 2 server), len u32,
//! data[len] (two opcode bytes, then the payload)
//! ```

use seq_core::Direction;
use seq_protocol::{DecodeError, NetStream, OpCode};

pub const CAPTURE_MAGIC: [u8; 4] = *b"SEQR";

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Not a capture file (magic {0:02x?})")]
    BadMagic([u8; 4]),

    #[error("Record {index}: bad direction {value}")]
    BadDirection { index: usize, value: u8 },

    #[error("Record {index}: {source}")]
    Truncated {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

/// One recorded record, borrowing the capture buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRecord<'a> {
    pub time: i64,
    pub direction: Direction,
    /// Opcode bytes and payload
    pub data: &'a [u8],
}

impl CaptureRecord<'_> {
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_prefix(self.data)
    }
}

/// Split a capture buffer into records
pub fn parse(data: &[u8]) -> Result<Vec<CaptureRecord<'_>>, CaptureError> {
    let mut s = NetStream::new(data);
    let magic: [u8; 4] = s
        .read_array()
        .map_err(|source| CaptureError::Truncated { index: 0, source })?;
    if magic != CAPTURE_MAGIC {
        return Err(CaptureError::BadMagic(magic));
    }

    let mut records = Vec::new();
    while !s.at_end() {
        let index = records.len();
        let truncated = |source| CaptureError::Truncated { index, source };

        let time = s.read_i64().map_err(truncated)?;
        let value = s.read_u8().map_err(truncated)?;
        let direction =
            Direction::from_u8(value).ok_or(CaptureError::BadDirection { index, value })?;
        let len = s.read_u32().map_err(truncated)? as usize;
        let data = s.read_bytes(len).map_err(truncated)?;

        records.push(CaptureRecord {
            time,
            direction,
            data,
        });
    }
    Ok(records)
}
