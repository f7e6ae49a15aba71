//! Zone-state file
//!
//! Layout: the 4-byte magic `zon2`, then the long name and the short name,
//! each as a little-endian `u32` byte count followed by the text.

use crate::error::{Result, ZoneError};
use bytes::{BufMut, BytesMut};
use seq_protocol::text::put_prefixed_text;
use seq_protocol::NetStream;
use std::fs;
use std::path::Path;

/// File magic
pub const ZONE_STATE_MAGIC: [u8; 4] = *b"zon2";

/// Names recovered from a zone-state file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedZone {
    pub long_name: String,
    pub short_name: String,
}

/// Write the zone-state file, replacing any previous one
pub fn save_zone_state(path: &Path, long_name: &str, short_name: &str) -> Result<()> {
    let mut buf = BytesMut::with_capacity(16 + long_name.len() + short_name.len());
    buf.put_slice(&ZONE_STATE_MAGIC);
    put_prefixed_text(&mut buf, long_name);
    put_prefixed_text(&mut buf, short_name);

    fs::write(path, &buf)?;
    tracing::trace!("Saved zone state to {:?}", path);
    Ok(())
}

/// Read and validate a zone-state file
pub fn restore_zone_state(path: &Path) -> Result<SavedZone> {
    let data = fs::read(path)?;
    let mut s = NetStream::new(&data);

    let found: [u8; 4] = s.read_array()?;
    if found != ZONE_STATE_MAGIC {
        return Err(ZoneError::BadMagic {
            path: path.to_path_buf(),
            found,
        });
    }

    let long_name = s.read_prefixed_text()?;
    let short_name = s.read_prefixed_text()?;
    Ok(SavedZone {
        long_name,
        short_name,
    })
}
