//! # Opcodes
//!
//! Every record on the wire is introduced by two bytes: a message code and
//! a version byte. The pair selects the record's layout. The version byte
//! changes when the server patches a layout, so the same code with a new
//! version is a different record as far as decoding is concerned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-byte record selector (`code`, `version`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpCode {
    pub code: u8,
    pub version: u8,
}

impl OpCode {
    #[inline]
    pub const fn new(code: u8, version: u8) -> Self {
        Self { code, version }
    }

    /// Build from the first two bytes of a raw record
    pub fn from_prefix(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [code, version, ..] => Some(Self::new(*code, *version)),
            _ => None,
        }
    }

    /// Combined little-endian value as it appears on the wire
    #[inline]
    pub const fn as_u16(self) -> u16 {
        (self.code as u16) | ((self.version as u16) << 8)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}", self.code, self.version)
    }
}

/// Records this decoder understands
///
/// Each kind maps to exactly one [`OpCode`]. Dispatch from raw opcodes goes
/// through [`MessageKind::from_opcode`], which returns `None` for anything
/// not catalogued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Zone entry; the client sends the short form, the server the long one
    ZoneEntry,

    /// Full player profile
    CharProfile,

    /// Zone environment (names, safe point, fog, clip planes)
    NewZone,

    /// Zone change request or confirmation
    ZoneChange,

    /// Zone line trigger list
    ZonePoints,

    /// Dynamic zone entry point switch
    DzSwitch,

    /// Dynamic zone (expedition) information
    DzInfo,

    /// One spawn leaving the zone
    DeleteSpawn,

    /// One spawn entering the zone
    NewSpawn,

    /// Spawn died
    NewCorpse,

    /// Batch of spawns sent on zone-in
    ZoneSpawns,

    /// Player movement update
    PlayerPos,

    /// Game clock
    TimeOfDay,

    /// Hit point update for a spawn
    HpUpdate,

    /// Corpse location query answer
    CorpseLoc,

    /// Merchant item (polymorphic)
    ItemInShop,

    /// Inventory item
    PlayerItem,

    /// Inventory book
    PlayerBook,

    /// Inventory container
    PlayerContainer,
}

impl MessageKind {
    /// All known kinds in catalog order
    pub const ALL: [MessageKind; 19] = [
        MessageKind::ZoneEntry,
        MessageKind::CharProfile,
        MessageKind::NewZone,
        MessageKind::ZoneChange,
        MessageKind::ZonePoints,
        MessageKind::DzSwitch,
        MessageKind::DzInfo,
        MessageKind::DeleteSpawn,
        MessageKind::NewSpawn,
        MessageKind::NewCorpse,
        MessageKind::ZoneSpawns,
        MessageKind::PlayerPos,
        MessageKind::TimeOfDay,
        MessageKind::HpUpdate,
        MessageKind::CorpseLoc,
        MessageKind::ItemInShop,
        MessageKind::PlayerItem,
        MessageKind::PlayerBook,
        MessageKind::PlayerContainer,
    ];

    /// Wire opcode for this kind
    ///
    /// # Example
    /// ```rust
    /// use seq_protocol::{MessageKind, OpCode};
    ///
    /// assert_eq!(MessageKind::NewZone.opcode(), OpCode::new(0x5b, 0x20));
    /// ```
    pub const fn opcode(self) -> OpCode {
        match self {
            //=== Zoning ===//
            MessageKind::ZoneEntry => OpCode::new(0x29, 0x20),
            MessageKind::CharProfile => OpCode::new(0x36, 0x20),
            MessageKind::NewZone => OpCode::new(0x5b, 0x20),
            MessageKind::ZoneChange => OpCode::new(0xa3, 0x20),
            MessageKind::ZonePoints => OpCode::new(0xb4, 0x21),
            MessageKind::DzSwitch => OpCode::new(0x8e, 0x22),
            MessageKind::DzInfo => OpCode::new(0x8f, 0x22),
            //=== Spawns ===//
            MessageKind::DeleteSpawn => OpCode::new(0x2a, 0x20),
            MessageKind::NewSpawn => OpCode::new(0x49, 0x21),
            MessageKind::NewCorpse => OpCode::new(0x42, 0x00),
            MessageKind::ZoneSpawns => OpCode::new(0x61, 0x21),
            MessageKind::PlayerPos => OpCode::new(0xf3, 0x20),
            MessageKind::HpUpdate => OpCode::new(0xb6, 0x00),
            MessageKind::CorpseLoc => OpCode::new(0x21, 0x20),
            //=== World ===//
            MessageKind::TimeOfDay => OpCode::new(0xf2, 0x20),
            //=== Items ===//
            MessageKind::ItemInShop => OpCode::new(0x0c, 0x20),
            MessageKind::PlayerItem => OpCode::new(0x64, 0x21),
            MessageKind::PlayerBook => OpCode::new(0x65, 0x21),
            MessageKind::PlayerContainer => OpCode::new(0x66, 0x21),
        }
    }

    /// Look up the kind for a raw opcode
    ///
    /// Returns `None` for opcodes with no catalogued layout, including a
    /// known code carrying an unexpected version byte.
    pub fn from_opcode(opcode: OpCode) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.opcode() == opcode)
    }

    /// Short name for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKind::ZoneEntry => "ZoneEntry",
            MessageKind::CharProfile => "CharProfile",
            MessageKind::NewZone => "NewZone",
            MessageKind::ZoneChange => "ZoneChange",
            MessageKind::ZonePoints => "ZonePoints",
            MessageKind::DzSwitch => "DzSwitch",
            MessageKind::DzInfo => "DzInfo",
            MessageKind::DeleteSpawn => "DeleteSpawn",
            MessageKind::NewSpawn => "NewSpawn",
            MessageKind::NewCorpse => "NewCorpse",
            MessageKind::ZoneSpawns => "ZoneSpawns",
            MessageKind::PlayerPos => "PlayerPos",
            MessageKind::TimeOfDay => "TimeOfDay",
            MessageKind::HpUpdate => "HpUpdate",
            MessageKind::CorpseLoc => "CorpseLoc",
            MessageKind::ItemInShop => "ItemInShop",
            MessageKind::PlayerItem => "PlayerItem",
            MessageKind::PlayerBook => "PlayerBook",
            MessageKind::PlayerContainer => "PlayerContainer",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
