//! # Profile Decoder
//!
//! The player profile is the one large record whose layout is not fixed.
//! It is a sequence of scalars interleaved with count-prefixed repeating
//! groups: a `u32` element count followed by exactly that many elements.
//! Every group must be consumed exactly, or every later field lands on the
//! wrong bytes.
//!
//! Between sections sit reserved spans of known size. Those sizes move
//! whenever the server patches the record, so they live in a
//! [`ProfileLayout`] selected by tag rather than in the walk itself.
//!
//! After the walk the consumed length is compared with the payload length.
//! Trailing data past the zone id is not decoded, so a mismatch is logged
//! at debug level and reported in [`ProfileDecode::mismatch`] while the
//! profile is still returned.

use crate::error::Result;
use crate::netstream::NetStream;
use crate::records::put_reserved;
use crate::text::{put_fixed_text, put_prefixed_text, truncate_to_capacity};
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Reserved span sizes and element widths for one protocol revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLayout {
    /// Name used to select this revision in configuration
    pub tag: &'static str,
    pub bind_len: usize,
    pub equipment_len: usize,
    pub buff_len: usize,
    pub skip_after_class: usize,
    pub skip_after_beard_color: usize,
    pub skip_after_beard: usize,
    pub skip_after_wisdom: usize,
    pub skip_after_face: usize,
    pub skip_after_innate_skills: usize,
    pub skip_after_hunger: usize,
    pub skip_after_aa_spent: usize,
    pub skip_after_aa_assigned: usize,
    pub skip_after_potion_belt: usize,
    pub skip_after_last_name: usize,
    pub skip_after_time_played: usize,
    pub skip_after_guild_status: usize,
    pub skip_after_exp: usize,
    pub skip_after_shared_platinum: usize,
    pub skip_after_expansions: usize,
    pub skip_after_autosplit: usize,
}

impl ProfileLayout {
    /// The revision this decoder was last validated against
    pub const CURRENT: ProfileLayout = ProfileLayout {
        tag: "current",
        bind_len: 20,
        equipment_len: 20,
        buff_len: 80,
        skip_after_class: 44,
        skip_after_beard_color: 6,
        skip_after_beard: 11,
        skip_after_wisdom: 28,
        skip_after_face: 221,
        skip_after_innate_skills: 16,
        skip_after_hunger: 20,
        skip_after_aa_spent: 4,
        skip_after_aa_assigned: 22,
        skip_after_potion_belt: 96,
        skip_after_last_name: 8,
        skip_after_time_played: 4,
        skip_after_guild_status: 14,
        skip_after_exp: 8,
        skip_after_shared_platinum: 12,
        skip_after_expansions: 11,
        skip_after_autosplit: 14,
    };

    /// Every known revision, newest first
    pub const KNOWN: &'static [ProfileLayout] = &[ProfileLayout::CURRENT];

    /// Look up a revision by tag
    pub fn by_tag(tag: &str) -> Option<&'static ProfileLayout> {
        Self::KNOWN.iter().find(|layout| layout.tag == tag)
    }
}

impl Default for ProfileLayout {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Capacity of a bandolier set name
pub const BANDOLIER_NAME_CAPACITY: usize = 32;

/// Capacity of an item name inside a bandolier or potion belt slot
pub const ITEM_NAME_CAPACITY: usize = 64;

/// Raw width of the character name buffer
pub const NAME_LEN: usize = 64;

/// Raw width of the last name buffer
pub const LAST_NAME_LEN: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BindPoint {
    pub zone_id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub heading: f32,
}

/// One worn equipment slot; only the item id is understood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlot {
    pub words: [u32; 5],
}

impl EquipmentSlot {
    #[inline]
    pub fn item_id(&self) -> u32 {
        self.words[2]
    }
}

/// Alternate advancement ability and its rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaEntry {
    pub aa: u32,
    pub value: u32,
    pub unknown: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub str: u32,
    pub sta: u32,
    pub cha: u32,
    pub dex: u32,
    pub int: u32,
    pub agi: u32,
    pub wis: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins {
    pub platinum: u32,
    pub gold: u32,
    pub silver: u32,
    pub copper: u32,
}

impl Coins {
    /// Total value in copper
    pub fn in_copper(&self) -> u64 {
        u64::from(self.platinum) * 1000
            + u64::from(self.gold) * 100
            + u64::from(self.silver) * 10
            + u64::from(self.copper)
    }
}

/// An item reference inside a bandolier or potion belt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltItem {
    pub item_name: String,
    pub item_id: u32,
    pub icon: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bandolier {
    pub name: String,
    pub main_hand: BeltItem,
    pub off_hand: BeltItem,
    pub range: BeltItem,
    pub ammo: BeltItem,
}

/// Normalized player profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub checksum: u32,
    pub gender: u16,
    pub race: u32,
    pub class: u32,
    pub level: u8,
    pub level1: u8,
    pub binds: Vec<BindPoint>,
    pub deity: u32,
    pub intoxication: u32,
    pub spell_slot_refresh: Vec<u32>,
    pub hair_color: u8,
    pub beard_color: u8,
    pub eye_color1: u8,
    pub eye_color2: u8,
    pub hair_style: u8,
    pub beard: u8,
    pub equipment: Vec<EquipmentSlot>,
    pub item_tints: Vec<u32>,
    pub aa: Vec<AaEntry>,
    pub points: u32,
    pub mana: u32,
    pub cur_hp: u32,
    pub attributes: Attributes,
    pub face: u32,
    pub spell_book: Vec<i32>,
    pub mem_spells: Vec<i32>,
    /// Number of coin denominations announced; always read as 4 below
    pub coin_kinds: u8,
    pub coin: Coins,
    pub cursor_coin: Coins,
    pub skills: Vec<u32>,
    pub innate_skills: Vec<u32>,
    pub toxicity: u32,
    pub thirst: u32,
    pub hunger: u32,
    /// Buff slots are skipped; only their number is kept
    pub buff_count: u32,
    pub disciplines: Vec<u32>,
    pub recast_timers: Vec<u32>,
    pub unnamed_a: Vec<u32>,
    pub unnamed_b: Vec<u32>,
    pub endurance: u32,
    pub aa_spent: u32,
    pub aa_assigned: u32,
    pub bandoliers: Vec<Bandolier>,
    pub potion_belt: Vec<BeltItem>,
    pub name: String,
    pub last_name: String,
    pub guild_id: i32,
    pub birthday: u32,
    pub last_save: u32,
    pub time_played_min: u32,
    pub pvp: u8,
    pub anon: u8,
    pub gm: u8,
    pub guild_status: i8,
    pub exp: u32,
    pub languages: Vec<u8>,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub heading: f32,
    pub stand_state: u8,
    pub bank: Coins,
    pub platinum_shared: u32,
    pub unnamed_pairs: Vec<(u32, u32)>,
    pub unnamed_bytes: Vec<u8>,
    pub expansions: u32,
    pub autosplit: u8,
    pub zone_id: u16,
    pub zone_instance: u16,
}

/// Consumed and declared lengths disagreed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    pub declared: usize,
    pub consumed: usize,
}

/// Result of a profile walk
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDecode {
    pub profile: PlayerProfile,
    /// Bytes the walk consumed
    pub consumed: usize,
    /// Length of the payload handed in
    pub declared: usize,
    pub mismatch: Option<LengthMismatch>,
}

/// Read a count-prefixed group of elements
fn read_group<'a, T>(
    s: &mut NetStream<'a>,
    min_element_len: usize,
    mut read: impl FnMut(&mut NetStream<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let (count, hint) = s.read_count(min_element_len)?;
    let mut out = Vec::with_capacity(hint);
    for _ in 0..count {
        out.push(read(s)?);
    }
    Ok(out)
}

fn read_belt_item(s: &mut NetStream<'_>) -> Result<BeltItem> {
    let item_name = truncate_to_capacity(&s.read_prefixed_text()?, ITEM_NAME_CAPACITY);
    let item_id = s.read_u32()?;
    let icon = s.read_u32()?;
    Ok(BeltItem {
        item_name,
        item_id,
        icon,
    })
}

fn read_coins(s: &mut NetStream<'_>) -> Result<Coins> {
    Ok(Coins {
        platinum: s.read_u32()?,
        gold: s.read_u32()?,
        silver: s.read_u32()?,
        copper: s.read_u32()?,
    })
}

/// Walk a profile payload
///
/// # Arguments
/// * `payload` - The record body after the opcode bytes; its length is the
///   declared length the walk is checked against
/// * `layout` - Reserved span sizes for the protocol revision in use
///
/// # Returns
/// The decoded profile with the consumed length, or a decode error if any
/// read ran past the end of the payload.
pub fn decode_profile(payload: &[u8], layout: &ProfileLayout) -> Result<ProfileDecode> {
    let mut s = NetStream::new(payload);
    let s = &mut s;
    let mut p = PlayerProfile {
        checksum: s.read_u32()?,
        gender: s.read_u16()?,
        race: s.read_u32()?,
        class: s.read_u32()?,
        ..Default::default()
    };
    s.skip(layout.skip_after_class)?;
    p.level = s.read_u8()?;
    p.level1 = s.read_u8()?;

    p.binds = read_group(s, layout.bind_len, |s| {
        let start = s.pos();
        let bind = BindPoint {
            zone_id: s.read_u32()?,
            x: s.read_f32()?,
            y: s.read_f32()?,
            z: s.read_f32()?,
            heading: s.read_f32()?,
        };
        s.seek(start + layout.bind_len)?;
        Ok(bind)
    })?;

    p.deity = s.read_u32()?;
    p.intoxication = s.read_u32()?;
    p.spell_slot_refresh = read_group(s, 4, |s| s.read_u32())?;

    p.hair_color = s.read_u8()?;
    p.beard_color = s.read_u8()?;
    s.skip(layout.skip_after_beard_color)?;
    p.eye_color1 = s.read_u8()?;
    p.eye_color2 = s.read_u8()?;
    p.hair_style = s.read_u8()?;
    p.beard = s.read_u8()?;
    s.skip(layout.skip_after_beard)?;

    p.equipment = read_group(s, layout.equipment_len, |s| {
        let start = s.pos();
        let mut words = [0u32; 5];
        for word in words.iter_mut() {
            *word = s.read_u32()?;
        }
        s.seek(start + layout.equipment_len)?;
        Ok(EquipmentSlot { words })
    })?;
    p.item_tints = read_group(s, 4, |s| s.read_u32())?;
    p.aa = read_group(s, 12, |s| {
        Ok(AaEntry {
            aa: s.read_u32()?,
            value: s.read_u32()?,
            unknown: s.read_u32()?,
        })
    })?;

    p.points = s.read_u32()?;
    p.mana = s.read_u32()?;
    p.cur_hp = s.read_u32()?;
    p.attributes = Attributes {
        str: s.read_u32()?,
        sta: s.read_u32()?,
        cha: s.read_u32()?,
        dex: s.read_u32()?,
        int: s.read_u32()?,
        agi: s.read_u32()?,
        wis: s.read_u32()?,
    };
    s.skip(layout.skip_after_wisdom)?;
    p.face = s.read_u32()?;
    s.skip(layout.skip_after_face)?;

    p.spell_book = read_group(s, 4, |s| s.read_i32())?;
    p.mem_spells = read_group(s, 4, |s| s.read_i32())?;

    p.coin_kinds = s.read_u8()?;
    p.coin = read_coins(s)?;
    p.cursor_coin = read_coins(s)?;

    p.skills = read_group(s, 4, |s| s.read_u32())?;
    p.innate_skills = read_group(s, 4, |s| s.read_u32())?;
    s.skip(layout.skip_after_innate_skills)?;

    p.toxicity = s.read_u32()?;
    p.thirst = s.read_u32()?;
    p.hunger = s.read_u32()?;
    s.skip(layout.skip_after_hunger)?;

    let (buffs, _) = s.read_count(layout.buff_len)?;
    for _ in 0..buffs {
        s.skip(layout.buff_len)?;
    }
    p.buff_count = buffs as u32;

    p.disciplines = read_group(s, 4, |s| s.read_u32())?;
    p.recast_timers = read_group(s, 4, |s| s.read_u32())?;
    p.unnamed_a = read_group(s, 4, |s| s.read_u32())?;
    p.unnamed_b = read_group(s, 4, |s| s.read_u32())?;

    p.endurance = s.read_u32()?;
    p.aa_spent = s.read_u32()?;
    s.skip(layout.skip_after_aa_spent)?;
    p.aa_assigned = s.read_u32()?;
    s.skip(layout.skip_after_aa_assigned)?;

    // name + 4 slots, each at least a 4-byte text prefix and two u32s
    p.bandoliers = read_group(s, 4 + 4 * 12, |s| {
        let name = truncate_to_capacity(&s.read_prefixed_text()?, BANDOLIER_NAME_CAPACITY);
        Ok(Bandolier {
            name,
            main_hand: read_belt_item(s)?,
            off_hand: read_belt_item(s)?,
            range: read_belt_item(s)?,
            ammo: read_belt_item(s)?,
        })
    })?;
    p.potion_belt = read_group(s, 12, read_belt_item)?;
    s.skip(layout.skip_after_potion_belt)?;

    p.name = s.read_fixed_text(NAME_LEN)?;
    p.last_name = s.read_fixed_text(LAST_NAME_LEN)?;
    s.skip(layout.skip_after_last_name)?;

    p.guild_id = s.read_i32()?;
    p.birthday = s.read_u32()?;
    p.last_save = s.read_u32()?;
    p.time_played_min = s.read_u32()?;
    s.skip(layout.skip_after_time_played)?;

    p.pvp = s.read_u8()?;
    p.anon = s.read_u8()?;
    p.gm = s.read_u8()?;
    p.guild_status = s.read_i8()?;
    s.skip(layout.skip_after_guild_status)?;

    p.exp = s.read_u32()?;
    s.skip(layout.skip_after_exp)?;

    p.languages = read_group(s, 1, |s| s.read_u8())?;

    p.x = s.read_f32()?;
    p.y = s.read_f32()?;
    p.z = s.read_f32()?;
    p.heading = s.read_f32()?;

    p.stand_state = s.read_u8()?;
    p.bank = read_coins(s)?;
    p.platinum_shared = s.read_u32()?;
    s.skip(layout.skip_after_shared_platinum)?;

    p.unnamed_pairs = read_group(s, 8, |s| Ok((s.read_u32()?, s.read_u32()?)))?;
    p.unnamed_bytes = read_group(s, 1, |s| s.read_u8())?;

    p.expansions = s.read_u32()?;
    s.skip(layout.skip_after_expansions)?;
    p.autosplit = s.read_u8()?;
    s.skip(layout.skip_after_autosplit)?;

    p.zone_id = s.read_u16()?;
    p.zone_instance = s.read_u16()?;

    let consumed = s.pos();
    let declared = payload.len();
    let mismatch = (consumed != declared).then(|| {
        tracing::debug!(
            "Profile length mismatch for '{}': expected {}, read {}",
            p.name,
            declared,
            consumed
        );
        LengthMismatch { declared, consumed }
    });

    Ok(ProfileDecode {
        profile: p,
        consumed,
        declared,
        mismatch,
    })
}

fn put_coins(buf: &mut BytesMut, coins: &Coins) {
    buf.put_u32_le(coins.platinum);
    buf.put_u32_le(coins.gold);
    buf.put_u32_le(coins.silver);
    buf.put_u32_le(coins.copper);
}

fn put_belt_item(buf: &mut BytesMut, item: &BeltItem) {
    put_prefixed_text(buf, &item.item_name);
    buf.put_u32_le(item.item_id);
    buf.put_u32_le(item.icon);
}

fn put_u32_group(buf: &mut BytesMut, values: &[u32]) {
    buf.put_u32_le(values.len() as u32);
    for v in values {
        buf.put_u32_le(*v);
    }
}

fn put_i32_group(buf: &mut BytesMut, values: &[i32]) {
    buf.put_u32_le(values.len() as u32);
    for v in values {
        buf.put_i32_le(*v);
    }
}

/// Write a profile in the wire form [`decode_profile`] reads
///
/// Reserved spans and skipped buffs are written as zeros.
pub fn encode_profile(p: &PlayerProfile, layout: &ProfileLayout) -> BytesMut {
    let mut buf = BytesMut::with_capacity(4096);
    let b = &mut buf;

    b.put_u32_le(p.checksum);
    b.put_u16_le(p.gender);
    b.put_u32_le(p.race);
    b.put_u32_le(p.class);
    put_reserved(b, layout.skip_after_class);
    b.put_u8(p.level);
    b.put_u8(p.level1);

    b.put_u32_le(p.binds.len() as u32);
    for bind in &p.binds {
        b.put_u32_le(bind.zone_id);
        b.put_f32_le(bind.x);
        b.put_f32_le(bind.y);
        b.put_f32_le(bind.z);
        b.put_f32_le(bind.heading);
        put_reserved(b, layout.bind_len.saturating_sub(20));
    }

    b.put_u32_le(p.deity);
    b.put_u32_le(p.intoxication);
    put_u32_group(b, &p.spell_slot_refresh);

    b.put_u8(p.hair_color);
    b.put_u8(p.beard_color);
    put_reserved(b, layout.skip_after_beard_color);
    b.put_u8(p.eye_color1);
    b.put_u8(p.eye_color2);
    b.put_u8(p.hair_style);
    b.put_u8(p.beard);
    put_reserved(b, layout.skip_after_beard);

    b.put_u32_le(p.equipment.len() as u32);
    for slot in &p.equipment {
        for word in &slot.words {
            b.put_u32_le(*word);
        }
        put_reserved(b, layout.equipment_len.saturating_sub(20));
    }
    put_u32_group(b, &p.item_tints);
    b.put_u32_le(p.aa.len() as u32);
    for aa in &p.aa {
        b.put_u32_le(aa.aa);
        b.put_u32_le(aa.value);
        b.put_u32_le(aa.unknown);
    }

    b.put_u32_le(p.points);
    b.put_u32_le(p.mana);
    b.put_u32_le(p.cur_hp);
    let a = &p.attributes;
    for stat in [a.str, a.sta, a.cha, a.dex, a.int, a.agi, a.wis] {
        b.put_u32_le(stat);
    }
    put_reserved(b, layout.skip_after_wisdom);
    b.put_u32_le(p.face);
    put_reserved(b, layout.skip_after_face);

    put_i32_group(b, &p.spell_book);
    put_i32_group(b, &p.mem_spells);

    b.put_u8(p.coin_kinds);
    put_coins(b, &p.coin);
    put_coins(b, &p.cursor_coin);

    put_u32_group(b, &p.skills);
    put_u32_group(b, &p.innate_skills);
    put_reserved(b, layout.skip_after_innate_skills);

    b.put_u32_le(p.toxicity);
    b.put_u32_le(p.thirst);
    b.put_u32_le(p.hunger);
    put_reserved(b, layout.skip_after_hunger);

    b.put_u32_le(p.buff_count);
    put_reserved(b, p.buff_count as usize * layout.buff_len);

    put_u32_group(b, &p.disciplines);
    put_u32_group(b, &p.recast_timers);
    put_u32_group(b, &p.unnamed_a);
    put_u32_group(b, &p.unnamed_b);

    b.put_u32_le(p.endurance);
    b.put_u32_le(p.aa_spent);
    put_reserved(b, layout.skip_after_aa_spent);
    b.put_u32_le(p.aa_assigned);
    put_reserved(b, layout.skip_after_aa_assigned);

    b.put_u32_le(p.bandoliers.len() as u32);
    for set in &p.bandoliers {
        put_prefixed_text(b, &set.name);
        for item in [&set.main_hand, &set.off_hand, &set.range, &set.ammo] {
            put_belt_item(b, item);
        }
    }
    b.put_u32_le(p.potion_belt.len() as u32);
    for item in &p.potion_belt {
        put_belt_item(b, item);
    }
    put_reserved(b, layout.skip_after_potion_belt);

    put_fixed_text(b, &p.name, NAME_LEN);
    put_fixed_text(b, &p.last_name, LAST_NAME_LEN);
    put_reserved(b, layout.skip_after_last_name);

    b.put_i32_le(p.guild_id);
    b.put_u32_le(p.birthday);
    b.put_u32_le(p.last_save);
    b.put_u32_le(p.time_played_min);
    put_reserved(b, layout.skip_after_time_played);

    b.put_u8(p.pvp);
    b.put_u8(p.anon);
    b.put_u8(p.gm);
    b.put_i8(p.guild_status);
    put_reserved(b, layout.skip_after_guild_status);

    b.put_u32_le(p.exp);
    put_reserved(b, layout.skip_after_exp);

    b.put_u32_le(p.languages.len() as u32);
    b.put_slice(&p.languages);

    b.put_f32_le(p.x);
    b.put_f32_le(p.y);
    b.put_f32_le(p.z);
    b.put_f32_le(p.heading);

    b.put_u8(p.stand_state);
    put_coins(b, &p.bank);
    b.put_u32_le(p.platinum_shared);
    put_reserved(b, layout.skip_after_shared_platinum);

    b.put_u32_le(p.unnamed_pairs.len() as u32);
    for (first, second) in &p.unnamed_pairs {
        b.put_u32_le(*first);
        b.put_u32_le(*second);
    }
    b.put_u32_le(p.unnamed_bytes.len() as u32);
    b.put_slice(&p.unnamed_bytes);

    b.put_u32_le(p.expansions);
    put_reserved(b, layout.skip_after_expansions);
    b.put_u8(p.autosplit);
    put_reserved(b, layout.skip_after_autosplit);

    b.put_u16_le(p.zone_id);
    b.put_u16_le(p.zone_instance);

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn sample() -> PlayerProfile {
        PlayerProfile {
            checksum: 0xdead_beef,
            gender: 1,
            race: 6,
            class: 11,
            level: 45,
            level1: 45,
            binds: vec![
                BindPoint {
                    zone_id: 2,
                    x: 10.0,
                    y: -20.0,
                    z: 3.5,
                    heading: 128.0,
                },
                BindPoint::default(),
            ],
            deity: 206,
            spell_slot_refresh: vec![0; 9],
            hair_color: 3,
            equipment: vec![
                EquipmentSlot {
                    words: [0, 0, 1001, 0, 0],
                };
                9
            ],
            item_tints: vec![0xff00ff; 9],
            aa: vec![AaEntry {
                aa: 12,
                value: 3,
                unknown: 0,
            }],
            mana: 1800,
            cur_hp: 920,
            attributes: Attributes {
                str: 60,
                sta: 80,
                cha: 75,
                dex: 90,
                int: 150,
                agi: 95,
                wis: 70,
            },
            spell_book: vec![-1, 93, 288, -1],
            mem_spells: vec![93, -1, -1, -1, -1, -1, -1, -1],
            coin_kinds: 4,
            coin: Coins {
                platinum: 120,
                gold: 4,
                silver: 9,
                copper: 2,
            },
            skills: (0..75).collect(),
            innate_skills: vec![255; 25],
            buff_count: 2,
            disciplines: vec![0; 10],
            recast_timers: vec![0; 5],
            unnamed_a: vec![1, 2],
            unnamed_b: vec![],
            endurance: 400,
            bandoliers: vec![Bandolier {
                name: "Melee".into(),
                main_hand: BeltItem {
                    item_name: "Fine Steel Long Sword".into(),
                    item_id: 5024,
                    icon: 593,
                },
                ..Default::default()
            }],
            potion_belt: vec![BeltItem {
                item_name: "Healing Potion".into(),
                item_id: 14001,
                icon: 800,
            }],
            name: "Soandso".into(),
            last_name: "Smith".into(),
            guild_id: -1,
            exp: 12345,
            languages: vec![100, 25, 0, 0],
            x: 150.0,
            y: -75.5,
            z: 3.0,
            heading: 256.0,
            bank: Coins {
                platinum: 5000,
                ..Default::default()
            },
            unnamed_pairs: vec![(1, 2), (3, 4)],
            unnamed_bytes: vec![7; 5],
            expansions: 0x3ff,
            autosplit: 1,
            zone_id: 2,
            zone_instance: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_length_decode() {
        let layout = ProfileLayout::CURRENT;
        let bytes = encode_profile(&sample(), &layout);

        let result = decode_profile(&bytes, &layout).unwrap();
        assert_eq!(result.consumed, bytes.len());
        assert_eq!(result.declared, bytes.len());
        assert_eq!(result.mismatch, None);
        assert_eq!(result.profile, sample());
    }

    #[test]
    fn test_trailing_bytes_reported_as_mismatch() {
        let layout = ProfileLayout::CURRENT;
        let mut bytes = encode_profile(&sample(), &layout).to_vec();
        let exact = bytes.len();
        bytes.extend_from_slice(&[0u8; 64]);

        let result = decode_profile(&bytes, &layout).unwrap();
        assert_eq!(result.profile.zone_id, 2);
        assert_eq!(
            result.mismatch,
            Some(LengthMismatch {
                declared: exact + 64,
                consumed: exact
            })
        );
    }

    #[test]
    fn test_truncated_profile_fails() {
        let layout = ProfileLayout::CURRENT;
        let bytes = encode_profile(&sample(), &layout);
        for cut in [0, 10, 59, bytes.len() / 2, bytes.len() - 1] {
            assert!(
                matches!(
                    decode_profile(&bytes[..cut], &layout),
                    Err(DecodeError::OutOfBounds { .. })
                ),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_hostile_count_does_not_allocate() {
        let layout = ProfileLayout::CURRENT;
        let mut bytes = vec![0u8; 14 + layout.skip_after_class + 2];
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(decode_profile(&bytes, &layout).is_err());
    }

    #[test]
    fn test_group_counts_shift_following_fields() {
        let layout = ProfileLayout::CURRENT;
        let mut profile = sample();
        profile.skills.truncate(3);
        profile.bandoliers.clear();
        let bytes = encode_profile(&profile, &layout);

        let decoded = decode_profile(&bytes, &layout).unwrap().profile;
        assert_eq!(decoded.skills, vec![0, 1, 2]);
        assert_eq!(decoded.name, "Soandso");
        assert_eq!(decoded.bank.platinum, 5000);
    }

    #[test]
    fn test_long_belt_names_truncated() {
        let layout = ProfileLayout::CURRENT;
        let mut profile = sample();
        profile.bandoliers[0].name = "x".repeat(40);
        profile.potion_belt[0].item_name = "y".repeat(100);
        let bytes = encode_profile(&profile, &layout);

        let decoded = decode_profile(&bytes, &layout).unwrap();
        assert_eq!(decoded.mismatch, None);
        assert_eq!(decoded.profile.bandoliers[0].name.len(), BANDOLIER_NAME_CAPACITY);
        assert_eq!(decoded.profile.potion_belt[0].item_name.len(), ITEM_NAME_CAPACITY);
    }

    #[test]
    fn test_layout_by_tag() {
        assert_eq!(ProfileLayout::by_tag("current"), Some(&ProfileLayout::CURRENT));
        assert_eq!(ProfileLayout::by_tag("nonsense"), None);
    }

    #[test]
    fn test_coins_in_copper() {
        let coins = Coins {
            platinum: 1,
            gold: 2,
            silver: 3,
            copper: 4,
        };
        assert_eq!(coins.in_copper(), 1234);
    }
}
