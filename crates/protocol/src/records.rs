//! # Fixed Wire Records
//!
//! Typed views of the zoning records. Each type implements [`WireRecord`],
//! whose `decode` reads exactly the catalogued layout through a
//! [`NetStream`] and whose `encode` writes it back byte for byte.
//! Reserved spans are skipped on decode and written as zeros on encode.
//!
//! All offsets are relative to the payload, which starts after the two
//! opcode bytes.

use crate::error::{DecodeError, Result};
use crate::netstream::NetStream;
use crate::opcodes::MessageKind;
use crate::text::put_fixed_text;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// A record with a fixed-length prefix
///
/// `FIXED_LEN` is the length of the fixed prefix. For records without a
/// trailing section it is the whole record.
pub trait WireRecord: Sized {
    /// Message this record is carried by
    const KIND: MessageKind;

    /// Length of the fixed prefix in bytes
    const FIXED_LEN: usize;

    /// Read the record starting at the stream's cursor
    fn read(stream: &mut NetStream<'_>) -> Result<Self>;

    /// Append the record's wire form
    fn write(&self, buf: &mut BytesMut);

    /// Decode a record from a payload
    ///
    /// Fails up front with [`DecodeError::OutOfBounds`] when the payload is
    /// shorter than the fixed prefix. Bytes past the record are ignored.
    fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < Self::FIXED_LEN {
            return Err(DecodeError::OutOfBounds {
                offset: 0,
                wanted: Self::FIXED_LEN,
                available: payload.len(),
            });
        }
        Self::read(&mut NetStream::new(payload))
    }

    /// Encode into a fresh buffer
    fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::FIXED_LEN);
        self.write(&mut buf);
        buf
    }
}

/// Write `n` zero bytes for a reserved span
#[inline]
pub(crate) fn put_reserved(buf: &mut BytesMut, n: usize) {
    buf.put_bytes(0, n);
}

/// Three float coordinates as they appear in zone records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Client half of the zone entry handshake
///
/// Length: 68 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientZoneEntry {
    pub checksum: u32,
    /// Player first name
    pub name: String,
    pub flags: u32,
}

impl WireRecord for ClientZoneEntry {
    const KIND: MessageKind = MessageKind::ZoneEntry;
    const FIXED_LEN: usize = 68;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let checksum = s.read_u32()?;
        let name = s.read_fixed_text(32)?;
        s.skip(28)?;
        let flags = s.read_u32()?;
        Ok(Self {
            checksum,
            name,
            flags,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.checksum);
        put_fixed_text(buf, &self.name, 32);
        put_reserved(buf, 28);
        buf.put_u32_le(self.flags);
    }
}

/// Server half of the zone entry handshake
///
/// Length: 388 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerZoneEntry {
    pub checksum: u32,
    pub name: String,
    pub zone_id: u32,
    pub position: WorldPoint,
    pub heading: f32,
    pub guild_id: u32,
    pub class: u8,
    pub race: u32,
    pub gender: u8,
    pub level: u32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub anon: u8,
    pub last_name: String,
    pub deity: u32,
}

impl WireRecord for ServerZoneEntry {
    const KIND: MessageKind = MessageKind::ZoneEntry;
    const FIXED_LEN: usize = 388;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let checksum = s.read_u32()?;
        s.skip(1)?;
        let name = s.read_fixed_text(64)?;
        s.skip(3)?;
        let zone_id = s.read_u32()?;
        let y = s.read_f32()?;
        let x = s.read_f32()?;
        let z = s.read_f32()?;
        let heading = s.read_f32()?;
        s.skip(76)?;
        let guild_id = s.read_u32()?;
        s.skip(5)?;
        let class = s.read_u8()?;
        s.skip(2)?;
        let race = s.read_u32()?;
        let gender = s.read_u8()?;
        let level = s.read_u32()?;
        s.skip(83)?;
        let walk_speed = s.read_f32()?;
        let run_speed = s.read_f32()?;
        s.skip(20)?;
        let anon = s.read_u8()?;
        s.skip(31)?;
        let last_name = s.read_fixed_text(20)?;
        s.skip(16)?;
        let deity = s.read_u32()?;
        s.skip(16)?;

        Ok(Self {
            checksum,
            name,
            zone_id,
            position: WorldPoint::new(x, y, z),
            heading,
            guild_id,
            class,
            race,
            gender,
            level,
            walk_speed,
            run_speed,
            anon,
            last_name,
            deity,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.checksum);
        put_reserved(buf, 1);
        put_fixed_text(buf, &self.name, 64);
        put_reserved(buf, 3);
        buf.put_u32_le(self.zone_id);
        buf.put_f32_le(self.position.y);
        buf.put_f32_le(self.position.x);
        buf.put_f32_le(self.position.z);
        buf.put_f32_le(self.heading);
        put_reserved(buf, 76);
        buf.put_u32_le(self.guild_id);
        put_reserved(buf, 5);
        buf.put_u8(self.class);
        put_reserved(buf, 2);
        buf.put_u32_le(self.race);
        buf.put_u8(self.gender);
        buf.put_u32_le(self.level);
        put_reserved(buf, 83);
        buf.put_f32_le(self.walk_speed);
        buf.put_f32_le(self.run_speed);
        put_reserved(buf, 20);
        buf.put_u8(self.anon);
        put_reserved(buf, 31);
        put_fixed_text(buf, &self.last_name, 20);
        put_reserved(buf, 16);
        buf.put_u32_le(self.deity);
        put_reserved(buf, 16);
    }
}

/// Zone environment sent once the client is in the new zone
///
/// Length: 840 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewZone {
    /// Character name
    pub char_name: String,
    /// Zone short name; localized on some clients
    pub short_name: String,
    pub long_name: String,
    pub zone_type: u8,
    pub fog_red: [u8; 4],
    pub fog_green: [u8; 4],
    pub fog_blue: [u8; 4],
    pub sky: u8,
    pub zone_exp_multiplier: f32,
    pub safe_point: WorldPoint,
    pub underworld: f32,
    pub min_clip: f32,
    pub max_clip: f32,
    /// Zone geometry file base name
    pub zone_file: String,
}

impl WireRecord for NewZone {
    const KIND: MessageKind = MessageKind::NewZone;
    const FIXED_LEN: usize = 840;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let char_name = s.read_fixed_text(64)?;
        let short_name = s.read_fixed_text(32)?;
        s.skip(96)?;
        let long_name = s.read_fixed_text(278)?;
        let zone_type = s.read_u8()?;
        let fog_red = s.read_array()?;
        let fog_green = s.read_array()?;
        let fog_blue = s.read_array()?;
        s.skip(87)?;
        let sky = s.read_u8()?;
        s.skip(13)?;
        let zone_exp_multiplier = s.read_f32()?;
        let safe_y = s.read_f32()?;
        let safe_x = s.read_f32()?;
        let safe_z = s.read_f32()?;
        s.skip(8)?;
        let underworld = s.read_f32()?;
        let min_clip = s.read_f32()?;
        let max_clip = s.read_f32()?;
        s.skip(84)?;
        let zone_file = s.read_fixed_text(64)?;
        s.skip(72)?;

        Ok(Self {
            char_name,
            short_name,
            long_name,
            zone_type,
            fog_red,
            fog_green,
            fog_blue,
            sky,
            zone_exp_multiplier,
            safe_point: WorldPoint::new(safe_x, safe_y, safe_z),
            underworld,
            min_clip,
            max_clip,
            zone_file,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_fixed_text(buf, &self.char_name, 64);
        put_fixed_text(buf, &self.short_name, 32);
        put_reserved(buf, 96);
        put_fixed_text(buf, &self.long_name, 278);
        buf.put_u8(self.zone_type);
        buf.put_slice(&self.fog_red);
        buf.put_slice(&self.fog_green);
        buf.put_slice(&self.fog_blue);
        put_reserved(buf, 87);
        buf.put_u8(self.sky);
        put_reserved(buf, 13);
        buf.put_f32_le(self.zone_exp_multiplier);
        buf.put_f32_le(self.safe_point.y);
        buf.put_f32_le(self.safe_point.x);
        buf.put_f32_le(self.safe_point.z);
        put_reserved(buf, 8);
        buf.put_f32_le(self.underworld);
        buf.put_f32_le(self.min_clip);
        buf.put_f32_le(self.max_clip);
        put_reserved(buf, 84);
        put_fixed_text(buf, &self.zone_file, 64);
        put_reserved(buf, 72);
    }
}

/// Zone change request (client) or confirmation (server)
///
/// Length: 76 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneChange {
    /// Character name
    pub name: String,
    pub zone_id: u16,
    pub zone_instance: u16,
}

impl WireRecord for ZoneChange {
    const KIND: MessageKind = MessageKind::ZoneChange;
    const FIXED_LEN: usize = 76;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let name = s.read_fixed_text(64)?;
        let zone_id = s.read_u16()?;
        let zone_instance = s.read_u16()?;
        s.skip(8)?;
        Ok(Self {
            name,
            zone_id,
            zone_instance,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_fixed_text(buf, &self.name, 64);
        buf.put_u16_le(self.zone_id);
        buf.put_u16_le(self.zone_instance);
        put_reserved(buf, 8);
    }
}

/// One zone line: stepping on `trigger` sends the player to the target
///
/// Length: 24 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonePointEntry {
    pub trigger: u32,
    pub target: WorldPoint,
    pub heading: f32,
    pub zone_id: u16,
    pub zone_instance: u16,
}

impl ZonePointEntry {
    pub const LEN: usize = 24;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let trigger = s.read_u32()?;
        let y = s.read_f32()?;
        let x = s.read_f32()?;
        let z = s.read_f32()?;
        let heading = s.read_f32()?;
        let zone_id = s.read_u16()?;
        let zone_instance = s.read_u16()?;
        Ok(Self {
            trigger,
            target: WorldPoint::new(x, y, z),
            heading,
            zone_id,
            zone_instance,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.trigger);
        buf.put_f32_le(self.target.y);
        buf.put_f32_le(self.target.x);
        buf.put_f32_le(self.target.z);
        buf.put_f32_le(self.heading);
        buf.put_u16_le(self.zone_id);
        buf.put_u16_le(self.zone_instance);
    }
}

/// Zone line list
///
/// A `u32` count followed by exactly that many [`ZonePointEntry`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonePoints {
    pub points: Vec<ZonePointEntry>,
}

impl WireRecord for ZonePoints {
    const KIND: MessageKind = MessageKind::ZonePoints;
    const FIXED_LEN: usize = 4;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let (count, hint) = s.read_count(ZonePointEntry::LEN)?;
        let mut points = Vec::with_capacity(hint);
        for _ in 0..count {
            points.push(ZonePointEntry::read(s)?);
        }
        Ok(Self { points })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.points.len() as u32);
        for point in &self.points {
            point.write(buf);
        }
    }
}

/// Active dynamic zone entry point
///
/// Length: 40 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DzSwitchInfo {
    pub entry: WorldPoint,
    pub zone_id: u32,
    /// Raw type code; see [`DzSwitchInfo::is_favourable`]
    pub kind: u32,
}

impl DzSwitchInfo {
    /// Type codes 3 through 5 mark a favourable instance
    pub fn is_favourable(&self) -> bool {
        (3..=5).contains(&self.kind)
    }
}

impl WireRecord for DzSwitchInfo {
    const KIND: MessageKind = MessageKind::DzSwitch;
    const FIXED_LEN: usize = 40;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(16)?;
        let y = s.read_f32()?;
        let x = s.read_f32()?;
        let z = s.read_f32()?;
        let zone_id = s.read_u32()?;
        let kind = s.read_u32()?;
        s.skip(4)?;
        Ok(Self {
            entry: WorldPoint::new(x, y, z),
            zone_id,
            kind,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 16);
        buf.put_f32_le(self.entry.y);
        buf.put_f32_le(self.entry.x);
        buf.put_f32_le(self.entry.z);
        buf.put_u32_le(self.zone_id);
        buf.put_u32_le(self.kind);
        put_reserved(buf, 4);
    }
}

/// The two shapes a dynamic zone switch record takes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DzSwitch {
    /// The player has an active instance
    Active(DzSwitchInfo),
    /// The player left their instance
    Left,
}

impl DzSwitch {
    /// Payload length of the "instance left" shape
    pub const LEFT_LEN: usize = 8;

    /// Select the shape by exact payload length
    pub fn decode(payload: &[u8]) -> Result<Self> {
        match payload.len() {
            len if len == DzSwitchInfo::FIXED_LEN => {
                DzSwitchInfo::decode(payload).map(DzSwitch::Active)
            }
            len if len == Self::LEFT_LEN => Ok(DzSwitch::Left),
            len => Err(DecodeError::UnexpectedLength {
                record: "DzSwitch",
                len,
            }),
        }
    }
}

/// Dynamic zone (expedition) details
///
/// Length: 208 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DzInfo {
    /// Zero when the player no longer has an expedition
    pub new_dz: u8,
    pub max_players: u32,
    pub dz_name: String,
    /// Expedition leader
    pub leader: String,
}

impl WireRecord for DzInfo {
    const KIND: MessageKind = MessageKind::DzInfo;
    const FIXED_LEN: usize = 208;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(8)?;
        let new_dz = s.read_u8()?;
        s.skip(3)?;
        let max_players = s.read_u32()?;
        let dz_name = s.read_fixed_text(128)?;
        let leader = s.read_fixed_text(64)?;
        Ok(Self {
            new_dz,
            max_players,
            dz_name,
            leader,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 8);
        buf.put_u8(self.new_dz);
        put_reserved(buf, 3);
        buf.put_u32_le(self.max_players);
        put_fixed_text(buf, &self.dz_name, 128);
        put_fixed_text(buf, &self.leader, 64);
    }
}

/// Game clock
///
/// Length: 8 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// 1..=24
    pub hour: u8,
    pub minute: u8,
    /// 1..=28
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl WireRecord for TimeOfDay {
    const KIND: MessageKind = MessageKind::TimeOfDay;
    const FIXED_LEN: usize = 8;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let hour = s.read_u8()?;
        let minute = s.read_u8()?;
        let day = s.read_u8()?;
        let month = s.read_u8()?;
        let year = s.read_u16()?;
        s.skip(2)?;
        Ok(Self {
            hour,
            minute,
            day,
            month,
            year,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_u8(self.hour);
        buf.put_u8(self.minute);
        buf.put_u8(self.day);
        buf.put_u8(self.month);
        buf.put_u16_le(self.year);
        put_reserved(buf, 2);
    }
}
