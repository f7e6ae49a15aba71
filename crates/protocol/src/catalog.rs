//! # Struct Layout Catalog
//!
//! Declarative byte layouts for every record this crate understands.
//!
//! A [`RecordLayout`] names the record's opcode, the direction it travels
//! in (when one opcode carries different shapes per direction), the length
//! of its fixed prefix, the fields inside that prefix, an optional
//! discriminant selecting between payload variants, and an optional
//! trailing section.
//!
//! Layouts are static data. [`layout`] looks one up for an opcode and
//! direction and returns `None` for anything not catalogued. A layout can
//! then [`view`](RecordLayout::view) a payload, giving bounds-checked
//! access to fields by name without a typed decoder.
//!
//! ```
//! use seq_core::Direction;
//! use seq_protocol::catalog::{layout, FieldValue};
//! use seq_protocol::{MessageKind, OpCode};
//!
//! let rec = layout(MessageKind::DeleteSpawn.opcode(), Direction::Server).unwrap();
//! let view = rec.view(&[0x2a, 0x01, 0x00, 0x00]).unwrap();
//! assert_eq!(view.field("spawn_id"), Some(FieldValue::Unsigned(0x12a)));
//!
//! assert!(layout(OpCode::new(0xee, 0xee), Direction::Server).is_none());
//! ```
//!
//! The typed decoders in [`records`](crate::records),
//! [`spawn_records`](crate::spawn_records) and [`items`](crate::items)
//! follow these tables exactly; the tests below hold them together.

use crate::error::{DecodeError, Result};
use crate::netstream::NetStream;
use crate::opcodes::{MessageKind, OpCode};
use crate::packed::PackedDeltas;
use seq_core::Direction;
use serde::Serialize;

/// Width and interpretation of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    /// Fixed character buffer of the given capacity
    Text(usize),
    /// Uninterpreted bytes
    Raw(usize),
    /// Three packed 10-bit velocity deltas in a `u32`
    Deltas,
}

impl FieldKind {
    /// Bytes occupied on the wire
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::I8 => 1,
            FieldKind::U16 | FieldKind::I16 => 2,
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 | FieldKind::Deltas => 4,
            FieldKind::Text(n) | FieldKind::Raw(n) => n,
        }
    }
}

/// A named field at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

impl FieldLayout {
    /// Offset one past the field's last byte
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.kind.width()
    }
}

const fn at(name: &'static str, offset: usize, kind: FieldKind) -> FieldLayout {
    FieldLayout { name, offset, kind }
}

/// Fields whose offsets are relative to `base`
///
/// Lets a sub-structure's table be reused wherever it is embedded.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub base: usize,
    pub fields: &'static [FieldLayout],
}

/// One payload variant of a polymorphic record
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub value: i64,
    pub name: &'static str,
    pub groups: &'static [FieldGroup],
}

/// Where a polymorphic record keeps its discriminant
#[derive(Debug, Clone, Copy)]
pub struct Discriminant {
    /// Name of a field in the record's own groups
    pub field: &'static str,
    pub variants: &'static [Variant],
}

/// Layout of one element of a trailing array
#[derive(Debug, Clone, Copy)]
pub struct ElementLayout {
    pub name: &'static str,
    pub len: usize,
    pub groups: &'static [FieldGroup],
}

/// What follows the fixed prefix
#[derive(Debug, Clone, Copy)]
pub enum Trailing {
    None,
    /// Exactly `count_field` elements
    Counted {
        count_field: &'static str,
        element: &'static ElementLayout,
    },
    /// As many elements as fit; the remainder must divide evenly
    Repeated { element: &'static ElementLayout },
    /// Count-prefixed groups walked by a dedicated decoder
    Walked,
}

/// Byte layout of one record
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    pub name: &'static str,
    pub kind: MessageKind,
    /// `None` when the layout applies in both directions
    pub direction: Option<Direction>,
    pub fixed_len: usize,
    /// Length of a shorter shape that carries no fields
    pub alternate_len: Option<usize>,
    pub groups: &'static [FieldGroup],
    pub discriminant: Option<&'static Discriminant>,
    pub trailing: Trailing,
}

impl RecordLayout {
    /// Defaults for struct-update syntax in the tables below
    const EMPTY: RecordLayout = RecordLayout {
        name: "",
        kind: MessageKind::ZoneEntry,
        direction: None,
        fixed_len: 0,
        alternate_len: None,
        groups: &[],
        discriminant: None,
        trailing: Trailing::None,
    };

    #[inline]
    pub const fn opcode(&self) -> OpCode {
        self.kind.opcode()
    }

    /// True for the catalogued direction, or any direction if unrestricted
    pub fn applies_to(&self, direction: Direction) -> bool {
        self.direction.map_or(true, |d| d == direction)
    }

    /// Iterate every field in the fixed prefix with absolute offsets
    pub fn fields(&self) -> impl Iterator<Item = FieldLayout> + '_ {
        absolute(self.groups)
    }

    /// Wrap a payload for field access
    ///
    /// Fails when the payload is shorter than the fixed prefix, unless it
    /// is exactly the alternate shape's length.
    pub fn view<'a>(&'static self, payload: &'a [u8]) -> Result<RecordView<'a>> {
        let alternate = self.alternate_len == Some(payload.len());
        if payload.len() < self.fixed_len && !alternate {
            return Err(DecodeError::OutOfBounds {
                offset: 0,
                wanted: self.fixed_len,
                available: payload.len(),
            });
        }
        Ok(RecordView {
            layout: self,
            data: payload,
            alternate,
        })
    }
}

fn absolute(groups: &'static [FieldGroup]) -> impl Iterator<Item = FieldLayout> {
    groups.iter().flat_map(|g| {
        g.fields.iter().map(move |f| FieldLayout {
            offset: g.base + f.offset,
            ..*f
        })
    })
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Float(f32),
    Text(String),
    Raw(Vec<u8>),
    Deltas(PackedDeltas),
}

impl FieldValue {
    /// Integer value regardless of signedness
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Unsigned(v) => i64::try_from(v).ok(),
            FieldValue::Signed(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn read_field(data: &[u8], field: &FieldLayout) -> Result<FieldValue> {
    let mut s = NetStream::new(data);
    s.seek(field.offset)?;

    Ok(match field.kind {
        FieldKind::U8 => FieldValue::Unsigned(s.read_u8()?.into()),
        FieldKind::I8 => FieldValue::Signed(s.read_i8()?.into()),
        FieldKind::U16 => FieldValue::Unsigned(s.read_u16()?.into()),
        FieldKind::I16 => FieldValue::Signed(s.read_i16()?.into()),
        FieldKind::U32 => FieldValue::Unsigned(s.read_u32()?.into()),
        FieldKind::I32 => FieldValue::Signed(s.read_i32()?.into()),
        FieldKind::F32 => FieldValue::Float(s.read_f32()?),
        FieldKind::Text(n) => FieldValue::Text(s.read_fixed_text(n)?),
        FieldKind::Raw(n) => FieldValue::Raw(s.read_bytes(n)?.to_vec()),
        FieldKind::Deltas => FieldValue::Deltas(PackedDeltas::unpack(s.read_u32()?)),
    })
}

fn find_field(groups: &'static [FieldGroup], name: &str) -> Option<FieldLayout> {
    absolute(groups).find(|f| f.name == name)
}

/// Bounds-checked, by-name access to a payload
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    layout: &'static RecordLayout,
    data: &'a [u8],
    alternate: bool,
}

impl<'a> RecordView<'a> {
    #[inline]
    pub fn layout(&self) -> &'static RecordLayout {
        self.layout
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// True when the payload is the field-less alternate shape
    #[inline]
    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    /// Look up a field in the fixed prefix or the active variant
    ///
    /// Returns `None` for unknown names, for the alternate shape, and when
    /// the variant cannot be resolved.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        if self.alternate {
            return None;
        }

        let field = match find_field(self.layout.groups, name) {
            Some(field) => field,
            None => {
                let variant = self.variant().ok().flatten()?;
                find_field(variant.groups, name)?
            }
        };
        read_field(self.data, &field).ok()
    }

    /// Resolve the active variant of a polymorphic record
    ///
    /// `Ok(None)` for records without a discriminant.
    pub fn variant(&self) -> Result<Option<&'static Variant>> {
        let Some(disc) = self.layout.discriminant else {
            return Ok(None);
        };

        let field = find_field(self.layout.groups, disc.field).ok_or(
            DecodeError::UnknownVariant {
                record: self.layout.name,
                value: -1,
            },
        )?;
        let value = read_field(self.data, &field)?
            .as_i64()
            .unwrap_or(i64::MIN);

        disc.variants
            .iter()
            .find(|v| v.value == value)
            .map(Some)
            .ok_or(DecodeError::UnknownVariant {
                record: self.layout.name,
                value,
            })
    }

    /// Number of elements in the trailing section
    ///
    /// Counted sections fail when the count claims more elements than the
    /// payload holds.
    pub fn trailing_count(&self) -> Result<usize> {
        let remaining = self.data.len().saturating_sub(self.layout.fixed_len);
        match self.layout.trailing {
            Trailing::None | Trailing::Walked => Ok(0),
            Trailing::Counted {
                count_field,
                element,
            } => {
                let count = find_field(self.layout.groups, count_field)
                    .and_then(|f| read_field(self.data, &f).ok())
                    .and_then(|v| v.as_i64())
                    .and_then(|v| usize::try_from(v).ok())
                    .unwrap_or(0);

                let needed = count.checked_mul(element.len).unwrap_or(usize::MAX);
                if needed > remaining {
                    return Err(DecodeError::OutOfBounds {
                        offset: self.layout.fixed_len,
                        wanted: needed,
                        available: self.data.len(),
                    });
                }
                Ok(count)
            }
            Trailing::Repeated { element } => {
                let extra = remaining % element.len;
                if extra != 0 {
                    return Err(DecodeError::PartialElement {
                        record: self.layout.name,
                        element_len: element.len,
                        extra,
                    });
                }
                Ok(remaining / element.len)
            }
        }
    }

    /// View the `index`th trailing element
    pub fn element(&self, index: usize) -> Result<ElementView<'a>> {
        let element = match self.layout.trailing {
            Trailing::Counted { element, .. } | Trailing::Repeated { element } => element,
            Trailing::None | Trailing::Walked => {
                return Err(DecodeError::OutOfBounds {
                    offset: self.layout.fixed_len,
                    wanted: 0,
                    available: self.data.len(),
                })
            }
        };

        let count = self.trailing_count()?;
        if index >= count {
            return Err(DecodeError::OutOfBounds {
                offset: index
                    .saturating_mul(element.len)
                    .saturating_add(self.layout.fixed_len),
                wanted: element.len,
                available: self.data.len(),
            });
        }
        let start = self.layout.fixed_len + index * element.len;

        Ok(ElementView {
            element,
            data: &self.data[start..start + element.len],
        })
    }
}

/// By-name access to one trailing element
#[derive(Debug, Clone)]
pub struct ElementView<'a> {
    element: &'static ElementLayout,
    data: &'a [u8],
}

impl ElementView<'_> {
    pub fn name(&self) -> &'static str {
        self.element.name
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let field = find_field(self.element.groups, name)?;
        read_field(self.data, &field).ok()
    }
}

//=== Shared sub-structure tables ===//

use self::FieldKind::*;

const SPAWN_FIELDS: &[FieldLayout] = &[
    at("pet_owner_id", 0, I32),
    at("deltas", 4, Deltas),
    at("y", 8, I16),
    at("x", 10, I16),
    at("z", 12, I16),
    at("animation", 14, I8),
    at("delta_heading", 15, I8),
    at("heading", 16, I8),
    at("light", 52, U8),
    at("spawn_id", 68, U16),
    at("guild_id", 72, I32),
    at("typeflag", 76, U32),
    at("cur_hp", 80, I32),
    at("armor_graphic", 87, U8),
    at("helm_graphic", 88, U8),
    at("max_hp", 92, I32),
    at("race", 96, I32),
    at("npc", 100, U8),
    at("class", 101, U8),
    at("gender", 102, U8),
    at("level", 103, U8),
    at("name", 113, Text(64)),
    at("equipment", 180, Raw(36)),
    at("last_name", 216, Text(20)),
    at("deity", 248, I16),
];

const ITEM_BASE_FIELDS: &[FieldLayout] = &[
    at("name", 0, Text(64)),
    at("lore", 64, Text(80)),
    at("id_file", 144, Text(30)),
    at("weight", 174, U8),
    at("no_save", 175, I8),
    at("no_drop", 176, I8),
    at("size", 177, U8),
    at("item_class", 178, U8),
    at("item_nr", 180, U32),
    at("icon_nr", 184, U32),
    at("equip_slot", 188, I16),
    at("equipable_slots", 192, U32),
    at("cost", 196, I32),
];

const ITEM_STATS_FIELDS: &[FieldLayout] = &[
    at("str", 240, I8),
    at("sta", 241, I8),
    at("cha", 242, I8),
    at("dex", 243, I8),
    at("int", 244, I8),
    at("agi", 245, I8),
    at("wis", 246, I8),
    at("mr", 247, I8),
    at("fr", 248, I8),
    at("cr", 249, I8),
    at("dr", 250, I8),
    at("pr", 251, I8),
    at("hp", 252, I32),
    at("mana", 256, I32),
    at("ac", 260, I32),
    at("max_charges", 264, I8),
    at("light", 266, U8),
    at("delay", 267, U8),
    at("damage", 268, U8),
    at("range", 270, U8),
    at("skill", 271, U8),
    at("magic", 272, I8),
    at("cast_level", 273, I8),
    at("material", 274, U8),
    at("color", 276, U32),
    at("spell_id0", 284, U32),
    at("classes", 288, U32),
    at("races", 292, U32),
    at("stackable", 296, I8),
    at("level", 297, U8),
    at("charges", 298, I8),
    at("effect_type", 299, I8),
    at("spell_id", 300, U32),
    at("cast_time", 316, U32),
    at("skill_mod_id", 336, U32),
    at("skill_mod_percent", 340, I32),
];

const CONTAINER_FIELDS: &[FieldLayout] = &[
    at("num_slots", 281, U8),
    at("size_capacity", 283, I8),
    at("weight_reduction", 284, U8),
];

const BOOK_FIELDS: &[FieldLayout] = &[at("file", 243, Text(15))];

//=== Zoning ===//

const CLIENT_ZONE_ENTRY_FIELDS: &[FieldLayout] = &[
    at("checksum", 0, U32),
    at("name", 4, Text(32)),
    at("flags", 64, U32),
];

pub static CLIENT_ZONE_ENTRY: RecordLayout = RecordLayout {
    name: "ClientZoneEntry",
    kind: MessageKind::ZoneEntry,
    direction: Some(Direction::Client),
    fixed_len: 68,
    groups: &[FieldGroup { base: 0, fields: CLIENT_ZONE_ENTRY_FIELDS }],
    ..RecordLayout::EMPTY
};

const SERVER_ZONE_ENTRY_FIELDS: &[FieldLayout] = &[
    at("checksum", 0, U32),
    at("name", 5, Text(64)),
    at("zone_id", 72, U32),
    at("y", 76, F32),
    at("x", 80, F32),
    at("z", 84, F32),
    at("heading", 88, F32),
    at("guild_id", 168, U32),
    at("class", 177, U8),
    at("race", 180, U32),
    at("gender", 184, U8),
    at("level", 185, U32),
    at("walk_speed", 272, F32),
    at("run_speed", 276, F32),
    at("anon", 300, U8),
    at("last_name", 332, Text(20)),
    at("deity", 368, U32),
];

pub static SERVER_ZONE_ENTRY: RecordLayout = RecordLayout {
    name: "ServerZoneEntry",
    kind: MessageKind::ZoneEntry,
    direction: Some(Direction::Server),
    fixed_len: 388,
    groups: &[FieldGroup { base: 0, fields: SERVER_ZONE_ENTRY_FIELDS }],
    ..RecordLayout::EMPTY
};

const CHAR_PROFILE_FIELDS: &[FieldLayout] = &[
    at("checksum", 0, U32),
    at("gender", 4, U16),
    at("race", 6, U32),
    at("class", 10, U32),
    at("level", 58, U8),
    at("level1", 59, U8),
];

/// The profile's leading fixed fields; the rest is walked by
/// [`decode_profile`](crate::profile::decode_profile)
pub static CHAR_PROFILE: RecordLayout = RecordLayout {
    name: "CharProfile",
    kind: MessageKind::CharProfile,
    fixed_len: 60,
    groups: &[FieldGroup { base: 0, fields: CHAR_PROFILE_FIELDS }],
    trailing: Trailing::Walked,
    ..RecordLayout::EMPTY
};

const NEW_ZONE_FIELDS: &[FieldLayout] = &[
    at("char_name", 0, Text(64)),
    at("short_name", 64, Text(32)),
    at("long_name", 192, Text(278)),
    at("zone_type", 470, U8),
    at("fog_red", 471, Raw(4)),
    at("fog_green", 475, Raw(4)),
    at("fog_blue", 479, Raw(4)),
    at("sky", 570, U8),
    at("zone_exp_multiplier", 584, F32),
    at("safe_y", 588, F32),
    at("safe_x", 592, F32),
    at("safe_z", 596, F32),
    at("underworld", 608, F32),
    at("min_clip", 612, F32),
    at("max_clip", 616, F32),
    at("zone_file", 704, Text(64)),
];

pub static NEW_ZONE: RecordLayout = RecordLayout {
    name: "NewZone",
    kind: MessageKind::NewZone,
    fixed_len: 840,
    groups: &[FieldGroup { base: 0, fields: NEW_ZONE_FIELDS }],
    ..RecordLayout::EMPTY
};

const ZONE_CHANGE_FIELDS: &[FieldLayout] = &[
    at("name", 0, Text(64)),
    at("zone_id", 64, U16),
    at("zone_instance", 66, U16),
];

pub static ZONE_CHANGE: RecordLayout = RecordLayout {
    name: "ZoneChange",
    kind: MessageKind::ZoneChange,
    fixed_len: 76,
    groups: &[FieldGroup { base: 0, fields: ZONE_CHANGE_FIELDS }],
    ..RecordLayout::EMPTY
};

const ZONE_POINT_FIELDS: &[FieldLayout] = &[
    at("trigger", 0, U32),
    at("y", 4, F32),
    at("x", 8, F32),
    at("z", 12, F32),
    at("heading", 16, F32),
    at("zone_id", 20, U16),
    at("zone_instance", 22, U16),
];

static ZONE_POINT_ENTRY: ElementLayout = ElementLayout {
    name: "ZonePointEntry",
    len: 24,
    groups: &[FieldGroup { base: 0, fields: ZONE_POINT_FIELDS }],
};

const ZONE_POINTS_FIELDS: &[FieldLayout] = &[at("count", 0, U32)];

pub static ZONE_POINTS: RecordLayout = RecordLayout {
    name: "ZonePoints",
    kind: MessageKind::ZonePoints,
    fixed_len: 4,
    groups: &[FieldGroup { base: 0, fields: ZONE_POINTS_FIELDS }],
    trailing: Trailing::Counted {
        count_field: "count",
        element: &ZONE_POINT_ENTRY,
    },
    ..RecordLayout::EMPTY
};

const DZ_SWITCH_FIELDS: &[FieldLayout] = &[
    at("y", 16, F32),
    at("x", 20, F32),
    at("z", 24, F32),
    at("zone_id", 28, U32),
    at("type", 32, U32),
];

pub static DZ_SWITCH: RecordLayout = RecordLayout {
    name: "DzSwitch",
    kind: MessageKind::DzSwitch,
    fixed_len: 40,
    alternate_len: Some(8),
    groups: &[FieldGroup { base: 0, fields: DZ_SWITCH_FIELDS }],
    ..RecordLayout::EMPTY
};

const DZ_INFO_FIELDS: &[FieldLayout] = &[
    at("new_dz", 8, U8),
    at("max_players", 12, U32),
    at("dz_name", 16, Text(128)),
    at("leader", 144, Text(64)),
];

pub static DZ_INFO: RecordLayout = RecordLayout {
    name: "DzInfo",
    kind: MessageKind::DzInfo,
    fixed_len: 208,
    groups: &[FieldGroup { base: 0, fields: DZ_INFO_FIELDS }],
    ..RecordLayout::EMPTY
};

//=== Spawns ===//

const DELETE_SPAWN_FIELDS: &[FieldLayout] = &[at("spawn_id", 0, U32)];

pub static DELETE_SPAWN: RecordLayout = RecordLayout {
    name: "DeleteSpawn",
    kind: MessageKind::DeleteSpawn,
    fixed_len: 4,
    groups: &[FieldGroup { base: 0, fields: DELETE_SPAWN_FIELDS }],
    ..RecordLayout::EMPTY
};

pub static NEW_SPAWN: RecordLayout = RecordLayout {
    name: "NewSpawn",
    kind: MessageKind::NewSpawn,
    fixed_len: 264,
    groups: &[FieldGroup { base: 4, fields: SPAWN_FIELDS }],
    ..RecordLayout::EMPTY
};

static ZONE_SPAWN_ENTRY: ElementLayout = ElementLayout {
    name: "ZoneSpawn",
    len: 264,
    groups: &[FieldGroup { base: 4, fields: SPAWN_FIELDS }],
};

pub static ZONE_SPAWNS: RecordLayout = RecordLayout {
    name: "ZoneSpawns",
    kind: MessageKind::ZoneSpawns,
    fixed_len: 0,
    trailing: Trailing::Repeated {
        element: &ZONE_SPAWN_ENTRY,
    },
    ..RecordLayout::EMPTY
};

const NEW_CORPSE_FIELDS: &[FieldLayout] = &[
    at("spawn_id", 0, U32),
    at("killer_id", 4, U32),
    at("spell_id", 16, U32),
    at("type", 20, I8),
    at("damage", 21, U32),
];

pub static NEW_CORPSE: RecordLayout = RecordLayout {
    name: "NewCorpse",
    kind: MessageKind::NewCorpse,
    fixed_len: 32,
    groups: &[FieldGroup { base: 0, fields: NEW_CORPSE_FIELDS }],
    ..RecordLayout::EMPTY
};

const PLAYER_POS_FIELDS: &[FieldLayout] = &[
    at("spawn_id", 0, U16),
    at("deltas", 2, Deltas),
    at("y", 6, I16),
    at("x", 8, I16),
    at("z", 10, I16),
    at("animation", 12, I8),
    at("delta_heading", 13, I8),
    at("heading", 14, I8),
];

pub static PLAYER_POS: RecordLayout = RecordLayout {
    name: "PlayerPos",
    kind: MessageKind::PlayerPos,
    fixed_len: 15,
    groups: &[FieldGroup { base: 0, fields: PLAYER_POS_FIELDS }],
    ..RecordLayout::EMPTY
};

const HP_UPDATE_FIELDS: &[FieldLayout] = &[
    at("max_hp", 0, I16),
    at("cur_hp", 2, I16),
    at("spawn_id", 4, U16),
];

pub static HP_UPDATE: RecordLayout = RecordLayout {
    name: "HpUpdate",
    kind: MessageKind::HpUpdate,
    fixed_len: 6,
    groups: &[FieldGroup { base: 0, fields: HP_UPDATE_FIELDS }],
    ..RecordLayout::EMPTY
};

const CORPSE_LOC_FIELDS: &[FieldLayout] = &[
    at("spawn_id", 0, U32),
    at("x", 4, F32),
    at("y", 8, F32),
    at("z", 12, F32),
];

pub static CORPSE_LOC: RecordLayout = RecordLayout {
    name: "CorpseLoc",
    kind: MessageKind::CorpseLoc,
    fixed_len: 16,
    groups: &[FieldGroup { base: 0, fields: CORPSE_LOC_FIELDS }],
    ..RecordLayout::EMPTY
};

//=== World ===//

const TIME_OF_DAY_FIELDS: &[FieldLayout] = &[
    at("hour", 0, U8),
    at("minute", 1, U8),
    at("day", 2, U8),
    at("month", 3, U8),
    at("year", 4, U16),
];

pub static TIME_OF_DAY: RecordLayout = RecordLayout {
    name: "TimeOfDay",
    kind: MessageKind::TimeOfDay,
    fixed_len: 8,
    groups: &[FieldGroup { base: 0, fields: TIME_OF_DAY_FIELDS }],
    ..RecordLayout::EMPTY
};

//=== Items ===//

const ITEM_TYPE_FIELDS: &[FieldLayout] = &[at("item_type", 0, I16)];

static ITEM_UNION: Discriminant = Discriminant {
    field: "item_type",
    variants: &[
        Variant {
            value: 0,
            name: "item",
            groups: &[
                FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
                FieldGroup { base: 2, fields: ITEM_STATS_FIELDS },
            ],
        },
        Variant {
            value: 1,
            name: "container",
            groups: &[
                FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
                FieldGroup { base: 2, fields: CONTAINER_FIELDS },
            ],
        },
        Variant {
            value: 2,
            name: "book",
            groups: &[
                FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
                FieldGroup { base: 2, fields: BOOK_FIELDS },
            ],
        },
    ],
};

pub static ITEM_IN_SHOP: RecordLayout = RecordLayout {
    name: "ItemInShop",
    kind: MessageKind::ItemInShop,
    fixed_len: 434,
    groups: &[FieldGroup { base: 0, fields: ITEM_TYPE_FIELDS }],
    discriminant: Some(&ITEM_UNION),
    ..RecordLayout::EMPTY
};

pub static PLAYER_ITEM: RecordLayout = RecordLayout {
    name: "PlayerItem",
    kind: MessageKind::PlayerItem,
    fixed_len: 434,
    groups: &[
        FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
        FieldGroup { base: 2, fields: ITEM_STATS_FIELDS },
    ],
    ..RecordLayout::EMPTY
};

pub static PLAYER_BOOK: RecordLayout = RecordLayout {
    name: "PlayerBook",
    kind: MessageKind::PlayerBook,
    fixed_len: 278,
    groups: &[
        FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
        FieldGroup { base: 2, fields: BOOK_FIELDS },
    ],
    ..RecordLayout::EMPTY
};

pub static PLAYER_CONTAINER: RecordLayout = RecordLayout {
    name: "PlayerContainer",
    kind: MessageKind::PlayerContainer,
    fixed_len: 290,
    groups: &[
        FieldGroup { base: 2, fields: ITEM_BASE_FIELDS },
        FieldGroup { base: 2, fields: CONTAINER_FIELDS },
    ],
    ..RecordLayout::EMPTY
};

/// Every catalogued layout
pub static CATALOG: &[&RecordLayout] = &[
    &CLIENT_ZONE_ENTRY,
    &SERVER_ZONE_ENTRY,
    &CHAR_PROFILE,
    &NEW_ZONE,
    &ZONE_CHANGE,
    &ZONE_POINTS,
    &DZ_SWITCH,
    &DZ_INFO,
    &DELETE_SPAWN,
    &NEW_SPAWN,
    &ZONE_SPAWNS,
    &NEW_CORPSE,
    &PLAYER_POS,
    &HP_UPDATE,
    &CORPSE_LOC,
    &TIME_OF_DAY,
    &ITEM_IN_SHOP,
    &PLAYER_ITEM,
    &PLAYER_BOOK,
    &PLAYER_CONTAINER,
];

/// Find the layout for an opcode travelling in `direction`
///
/// Returns `None` when the opcode/version pair is not catalogued.
pub fn layout(opcode: OpCode, direction: Direction) -> Option<&'static RecordLayout> {
    CATALOG
        .iter()
        .copied()
        .find(|rec| rec.opcode() == opcode && rec.applies_to(direction))
}
