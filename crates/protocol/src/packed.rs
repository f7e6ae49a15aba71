//! Packed velocity deltas
//!
//! Spawn and player movement records carry three signed 10-bit velocity
//! components in one little-endian `u32`:
//!
//! ```text
//!  31        22 21 20        11 10 9          0
//! +------------+--+------------+--+------------+
//! |  delta X   |sp|  delta Z   |sp|  delta Y   |
//! +------------+--+------------+--+------------+
//! ```
//!
//! The spacer bits carry nothing and are written as zero.

use serde::{Deserialize, Serialize};

const FIELD_BITS: u32 = 10;
const FIELD_MASK: u32 = (1 << FIELD_BITS) - 1;

const DELTA_Y_SHIFT: u32 = 0;
const DELTA_Z_SHIFT: u32 = 11;
const DELTA_X_SHIFT: u32 = 22;

/// Smallest value a 10-bit signed field holds
pub const DELTA_MIN: i16 = -512;

/// Largest value a 10-bit signed field holds
pub const DELTA_MAX: i16 = 511;

/// Three signed velocity components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedDeltas {
    pub delta_y: i16,
    pub delta_z: i16,
    pub delta_x: i16,
}

impl PackedDeltas {
    #[inline]
    pub const fn new(delta_x: i16, delta_y: i16, delta_z: i16) -> Self {
        Self {
            delta_y,
            delta_z,
            delta_x,
        }
    }

    /// Extract all three components from a packed word
    pub const fn unpack(word: u32) -> Self {
        Self {
            delta_y: extract(word, DELTA_Y_SHIFT),
            delta_z: extract(word, DELTA_Z_SHIFT),
            delta_x: extract(word, DELTA_X_SHIFT),
        }
    }

    /// Pack the components into a word
    ///
    /// Values outside `DELTA_MIN..=DELTA_MAX` keep only their low 10 bits.
    pub const fn pack(self) -> u32 {
        insert(self.delta_y, DELTA_Y_SHIFT)
            | insert(self.delta_z, DELTA_Z_SHIFT)
            | insert(self.delta_x, DELTA_X_SHIFT)
    }
}

/// Sign-extend the 10-bit field starting at `shift`
#[inline]
const fn extract(word: u32, shift: u32) -> i16 {
    let raw = (word >> shift) & FIELD_MASK;
    (((raw << (32 - FIELD_BITS)) as i32) >> (32 - FIELD_BITS)) as i16
}

#[inline]
const fn insert(value: i16, shift: u32) -> u32 {
    ((value as i32 as u32) & FIELD_MASK) << shift
}
