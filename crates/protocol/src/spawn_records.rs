//! Spawn lifecycle and movement records

use crate::error::{DecodeError, Result};
use crate::netstream::NetStream;
use crate::opcodes::MessageKind;
use crate::packed::PackedDeltas;
use crate::records::{put_reserved, WireRecord};
use crate::text::put_fixed_text;
use bytes::{BufMut, BytesMut};
use seq_core::{Point3, SpawnId};
use serde::{Deserialize, Serialize};

/// Values of the spawn struct's `npc` byte
pub mod spawn_type {
    pub const PLAYER: u8 = 0;
    pub const NPC: u8 = 1;
    pub const PLAYER_CORPSE: u8 = 2;
    pub const NPC_CORPSE: u8 = 3;
    pub const UNKNOWN: u8 = 5;
    pub const MYSELF: u8 = 10;
}

/// Number of equipment slots carried per spawn
pub const SPAWN_EQUIPMENT_SLOTS: usize = 9;

/// Generic spawn description shared by several records
///
/// Length: 260 bytes. Position is stored on the wire as `y, x, z`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnInfo {
    /// Owner's spawn id for pets, 0 otherwise
    pub pet_owner_id: i32,
    pub deltas: PackedDeltas,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub animation: i8,
    pub delta_heading: i8,
    pub heading: i8,
    pub light: u8,
    pub spawn_id: u16,
    pub guild_id: i32,
    /// Body type
    pub typeflag: u32,
    pub cur_hp: i32,
    /// 0xff for players
    pub armor_graphic: u8,
    pub helm_graphic: u8,
    pub max_hp: i32,
    pub race: i32,
    /// See [`spawn_type`]
    pub npc: u8,
    pub class: u8,
    pub gender: u8,
    pub level: u8,
    pub name: String,
    /// helm, chest, arm, bracer, hand, leg, boot, primary, secondary
    pub equipment: [i32; SPAWN_EQUIPMENT_SLOTS],
    pub last_name: String,
    pub deity: i16,
}

impl SpawnInfo {
    pub const LEN: usize = 260;

    pub fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let pet_owner_id = s.read_i32()?;
        let deltas = PackedDeltas::unpack(s.read_u32()?);
        let y = s.read_i16()?;
        let x = s.read_i16()?;
        let z = s.read_i16()?;
        let animation = s.read_i8()?;
        let delta_heading = s.read_i8()?;
        let heading = s.read_i8()?;
        s.skip(35)?;
        let light = s.read_u8()?;
        s.skip(15)?;
        let spawn_id = s.read_u16()?;
        s.skip(2)?;
        let guild_id = s.read_i32()?;
        let typeflag = s.read_u32()?;
        let cur_hp = s.read_i32()?;
        s.skip(3)?;
        let armor_graphic = s.read_u8()?;
        let helm_graphic = s.read_u8()?;
        s.skip(3)?;
        let max_hp = s.read_i32()?;
        let race = s.read_i32()?;
        let npc = s.read_u8()?;
        let class = s.read_u8()?;
        let gender = s.read_u8()?;
        let level = s.read_u8()?;
        s.skip(9)?;
        let name = s.read_fixed_text(64)?;
        s.skip(3)?;
        let mut equipment = [0i32; SPAWN_EQUIPMENT_SLOTS];
        for slot in equipment.iter_mut() {
            *slot = s.read_i32()?;
        }
        let last_name = s.read_fixed_text(20)?;
        s.skip(12)?;
        let deity = s.read_i16()?;
        s.skip(10)?;

        Ok(Self {
            pet_owner_id,
            deltas,
            x,
            y,
            z,
            animation,
            delta_heading,
            heading,
            light,
            spawn_id,
            guild_id,
            typeflag,
            cur_hp,
            armor_graphic,
            helm_graphic,
            max_hp,
            race,
            npc,
            class,
            gender,
            level,
            name,
            equipment,
            last_name,
            deity,
        })
    }

    pub fn write(&self, buf: &mut BytesMut) {
        buf.put_i32_le(self.pet_owner_id);
        buf.put_u32_le(self.deltas.pack());
        buf.put_i16_le(self.y);
        buf.put_i16_le(self.x);
        buf.put_i16_le(self.z);
        buf.put_i8(self.animation);
        buf.put_i8(self.delta_heading);
        buf.put_i8(self.heading);
        put_reserved(buf, 35);
        buf.put_u8(self.light);
        put_reserved(buf, 15);
        buf.put_u16_le(self.spawn_id);
        put_reserved(buf, 2);
        buf.put_i32_le(self.guild_id);
        buf.put_u32_le(self.typeflag);
        buf.put_i32_le(self.cur_hp);
        put_reserved(buf, 3);
        buf.put_u8(self.armor_graphic);
        buf.put_u8(self.helm_graphic);
        put_reserved(buf, 3);
        buf.put_i32_le(self.max_hp);
        buf.put_i32_le(self.race);
        buf.put_u8(self.npc);
        buf.put_u8(self.class);
        buf.put_u8(self.gender);
        buf.put_u8(self.level);
        put_reserved(buf, 9);
        put_fixed_text(buf, &self.name, 64);
        put_reserved(buf, 3);
        for slot in &self.equipment {
            buf.put_i32_le(*slot);
        }
        put_fixed_text(buf, &self.last_name, 20);
        put_reserved(buf, 12);
        buf.put_i16_le(self.deity);
        put_reserved(buf, 10);
    }

    #[inline]
    pub fn id(&self) -> SpawnId {
        SpawnId::from(self.spawn_id)
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        Point3::new(self.x.into(), self.y.into(), self.z.into())
    }

    #[inline]
    pub fn is_npc(&self) -> bool {
        self.npc == spawn_type::NPC
    }

    #[inline]
    pub fn is_pet(&self) -> bool {
        self.pet_owner_id != 0
    }
}

/// A single spawn entering the zone
///
/// Length: 264 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSpawn {
    pub spawn: SpawnInfo,
}

impl WireRecord for NewSpawn {
    const KIND: MessageKind = MessageKind::NewSpawn;
    const FIXED_LEN: usize = 4 + SpawnInfo::LEN;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(4)?;
        Ok(Self {
            spawn: SpawnInfo::read(s)?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 4);
        self.spawn.write(buf);
    }
}

/// Every spawn in the zone, sent on zone-in
///
/// The payload is a bare array of 264-byte elements (4 reserved bytes and
/// a [`SpawnInfo`]). Its length must be an exact multiple of the element
/// size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpawns {
    pub spawns: Vec<SpawnInfo>,
}

impl ZoneSpawns {
    pub const ELEMENT_LEN: usize = 4 + SpawnInfo::LEN;
}

impl WireRecord for ZoneSpawns {
    const KIND: MessageKind = MessageKind::ZoneSpawns;
    const FIXED_LEN: usize = 0;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let extra = s.remaining() % Self::ELEMENT_LEN;
        if extra != 0 {
            return Err(DecodeError::PartialElement {
                record: "ZoneSpawns",
                element_len: Self::ELEMENT_LEN,
                extra,
            });
        }

        let mut spawns = Vec::with_capacity(s.remaining() / Self::ELEMENT_LEN);
        while !s.at_end() {
            s.skip(4)?;
            spawns.push(SpawnInfo::read(s)?);
        }
        Ok(Self { spawns })
    }

    fn write(&self, buf: &mut BytesMut) {
        for spawn in &self.spawns {
            put_reserved(buf, 4);
            spawn.write(buf);
        }
    }
}

/// A spawn leaving the zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSpawn {
    pub spawn_id: u32,
}

impl WireRecord for DeleteSpawn {
    const KIND: MessageKind = MessageKind::DeleteSpawn;
    const FIXED_LEN: usize = 4;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        Ok(Self {
            spawn_id: s.read_u32()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.spawn_id);
    }
}

/// A spawn died
///
/// Length: 32 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCorpse {
    pub spawn_id: u32,
    pub killer_id: u32,
    pub spell_id: u32,
    /// Spell, bash, hit, ...
    pub kind: i8,
    pub damage: u32,
}

impl WireRecord for NewCorpse {
    const KIND: MessageKind = MessageKind::NewCorpse;
    const FIXED_LEN: usize = 32;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let spawn_id = s.read_u32()?;
        let killer_id = s.read_u32()?;
        s.skip(8)?;
        let spell_id = s.read_u32()?;
        let kind = s.read_i8()?;
        let damage = s.read_u32()?;
        s.skip(7)?;
        Ok(Self {
            spawn_id,
            killer_id,
            spell_id,
            kind,
            damage,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.spawn_id);
        buf.put_u32_le(self.killer_id);
        put_reserved(buf, 8);
        buf.put_u32_le(self.spell_id);
        buf.put_i8(self.kind);
        buf.put_u32_le(self.damage);
        put_reserved(buf, 7);
    }
}

/// Player movement update
///
/// Length: 15 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPos {
    pub spawn_id: u16,
    pub deltas: PackedDeltas,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub animation: i8,
    pub delta_heading: i8,
    pub heading: i8,
}

impl WireRecord for PlayerPos {
    const KIND: MessageKind = MessageKind::PlayerPos;
    const FIXED_LEN: usize = 15;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let spawn_id = s.read_u16()?;
        let deltas = PackedDeltas::unpack(s.read_u32()?);
        let y = s.read_i16()?;
        let x = s.read_i16()?;
        let z = s.read_i16()?;
        let animation = s.read_i8()?;
        let delta_heading = s.read_i8()?;
        let heading = s.read_i8()?;
        Ok(Self {
            spawn_id,
            deltas,
            x,
            y,
            z,
            animation,
            delta_heading,
            heading,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u16_le(self.spawn_id);
        buf.put_u32_le(self.deltas.pack());
        buf.put_i16_le(self.y);
        buf.put_i16_le(self.x);
        buf.put_i16_le(self.z);
        buf.put_i8(self.animation);
        buf.put_i8(self.delta_heading);
        buf.put_i8(self.heading);
    }
}

/// Hit point update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpUpdate {
    pub max_hp: i16,
    pub cur_hp: i16,
    pub spawn_id: u16,
}

impl WireRecord for HpUpdate {
    const KIND: MessageKind = MessageKind::HpUpdate;
    const FIXED_LEN: usize = 6;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        Ok(Self {
            max_hp: s.read_i16()?,
            cur_hp: s.read_i16()?,
            spawn_id: s.read_u16()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_i16_le(self.max_hp);
        buf.put_i16_le(self.cur_hp);
        buf.put_u16_le(self.spawn_id);
    }
}

/// Corpse location answer; note the `x, y, z` order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpseLoc {
    pub spawn_id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WireRecord for CorpseLoc {
    const KIND: MessageKind = MessageKind::CorpseLoc;
    const FIXED_LEN: usize = 16;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        Ok(Self {
            spawn_id: s.read_u32()?,
            x: s.read_f32()?,
            y: s.read_f32()?,
            z: s.read_f32()?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.spawn_id);
        buf.put_f32_le(self.x);
        buf.put_f32_le(self.y);
        buf.put_f32_le(self.z);
    }
}
