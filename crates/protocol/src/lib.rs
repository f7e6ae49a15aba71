//! # SEQ Protocol Library
//!
//! Decoding of the game's zone and spawn messages as they are observed on
//! the wire. Nothing here sends anything; every type is built from bytes
//! that were already captured.
//!
//! ## Architecture
//!
//! ### 1. Stream Reader ([`netstream`])
//! A bounds-checked little-endian cursor over one message payload. Every
//! read returns a [`DecodeError`] instead of running past the end.
//!
//! ### 2. Opcodes ([`opcodes`])
//! The two-byte message prefix and the [`MessageKind`] table that maps
//! each understood message to its opcode.
//!
//! ### 3. Typed Records ([`records`], [`spawn_records`], [`items`])
//! Fixed-layout records with one struct per message. Each implements
//! [`WireRecord`] so it can be decoded from and encoded to its exact wire
//! size.
//!
//! ### 4. Struct Layout Catalog ([`catalog`])
//! A static description of every record: field names, offsets, widths,
//! unions and trailing groups. Used by diagnostics and by anything that
//! needs to read one field without decoding the whole record.
//!
//! ### 5. Profile Decoder ([`profile`])
//! The variable-length player profile, walked group by group.
//!
//! ## Usage Example
//!
//! ```rust
//! use seq_protocol::{DeleteSpawn, MessageKind, WireRecord};
//!
//! let bytes = DeleteSpawn { spawn_id: 1234 }.encode();
//! let decoded = DeleteSpawn::decode(&bytes).unwrap();
//!
//! assert_eq!(DeleteSpawn::KIND, MessageKind::DeleteSpawn);
//! assert_eq!(decoded.spawn_id, 1234);
//! ```
//!
//! ## Conventions
//!
//! - All multi-byte values are little-endian
//! - Offsets exclude the two opcode bytes
//! - Text buffers are Latin-1 and end at the first NUL

pub mod catalog;
pub mod error;
pub mod items;
pub mod netstream;
pub mod opcodes;
pub mod packed;
pub mod profile;
pub mod records;
pub mod spawn_records;
pub mod text;

// Re-export commonly used items
pub use error::{DecodeError, Result};
pub use items::*;
pub use netstream::NetStream;
pub use opcodes::{MessageKind, OpCode};
pub use packed::PackedDeltas;
pub use profile::{
    decode_profile, encode_profile, LengthMismatch, PlayerProfile, ProfileDecode, ProfileLayout,
};
pub use records::*;
pub use spawn_records::*;
