//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spawn ID as carried on the wire (widened to 32 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnId(pub u32);

impl SpawnId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u16> for SpawnId {
    fn from(id: u16) -> Self {
        Self(id as u32)
    }
}

impl From<u32> for SpawnId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for SpawnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric zone ID (index into the static zone table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u16);

impl ZoneId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl From<u16> for ZoneId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the connection a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sent by the game client
    Client = 1,
    /// Sent by the game server
    Server = 2,
}

impl Direction {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Client),
            2 => Some(Self::Server),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_wire_values() {
        assert_eq!(Direction::from_u8(1), Some(Direction::Client));
        assert_eq!(Direction::from_u8(2), Some(Direction::Server));
        assert_eq!(Direction::from_u8(0), None);
        assert_eq!(Direction::Server.as_u8(), 2);
    }

    #[test]
    fn test_spawn_id_widening() {
        let id = SpawnId::from(0xBEEFu16);
        assert_eq!(id.get(), 0xBEEF);
        assert_eq!(id.to_string(), "48879");
    }
}
