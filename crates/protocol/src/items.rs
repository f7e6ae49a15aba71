//! # Item Records
//!
//! Items share a 240-byte base. What follows the base depends on the kind
//! of item: ordinary items carry stats, containers carry slot data and
//! books carry a text file name. Merchant records select the kind with an
//! `i16` discriminant in front of a union sized for the largest variant.
//!
//! The union is modelled as [`ItemPayload`], one variant per kind, each
//! holding only its own fields.

use crate::error::{DecodeError, Result};
use crate::netstream::NetStream;
use crate::opcodes::MessageKind;
use crate::records::{put_reserved, WireRecord};
use crate::text::put_fixed_text;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Discriminant values for [`ItemPayload`]
pub mod item_type {
    pub const ITEM: i16 = 0;
    pub const CONTAINER: i16 = 1;
    pub const BOOK: i16 = 2;
}

/// Fields common to every item
///
/// Length: 240 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    pub name: String,
    pub lore: String,
    /// 3D model file
    pub id_file: String,
    pub weight: u8,
    /// 1 normal, 0 no-save
    pub no_save: i8,
    /// 1 normal, 0 no-drop
    pub no_drop: i8,
    pub size: u8,
    /// 0 generic, 1 container, 2 book
    pub item_class: u8,
    pub item_nr: u32,
    pub icon_nr: u32,
    pub equip_slot: i16,
    pub equipable_slots: u32,
    /// Price in copper
    pub cost: i32,
}

impl ItemBase {
    pub const LEN: usize = 240;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let name = s.read_fixed_text(64)?;
        let lore = s.read_fixed_text(80)?;
        let id_file = s.read_fixed_text(30)?;
        let weight = s.read_u8()?;
        let no_save = s.read_i8()?;
        let no_drop = s.read_i8()?;
        let size = s.read_u8()?;
        let item_class = s.read_u8()?;
        s.skip(1)?;
        let item_nr = s.read_u32()?;
        let icon_nr = s.read_u32()?;
        let equip_slot = s.read_i16()?;
        s.skip(2)?;
        let equipable_slots = s.read_u32()?;
        let cost = s.read_i32()?;
        s.skip(40)?;

        Ok(Self {
            name,
            lore,
            id_file,
            weight,
            no_save,
            no_drop,
            size,
            item_class,
            item_nr,
            icon_nr,
            equip_slot,
            equipable_slots,
            cost,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_fixed_text(buf, &self.name, 64);
        put_fixed_text(buf, &self.lore, 80);
        put_fixed_text(buf, &self.id_file, 30);
        buf.put_u8(self.weight);
        buf.put_i8(self.no_save);
        buf.put_i8(self.no_drop);
        buf.put_u8(self.size);
        buf.put_u8(self.item_class);
        put_reserved(buf, 1);
        buf.put_u32_le(self.item_nr);
        buf.put_u32_le(self.icon_nr);
        buf.put_i16_le(self.equip_slot);
        put_reserved(buf, 2);
        buf.put_u32_le(self.equipable_slots);
        buf.put_i32_le(self.cost);
        put_reserved(buf, 40);
    }
}

/// Stat block of an ordinary item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    pub str: i8,
    pub sta: i8,
    pub cha: i8,
    pub dex: i8,
    pub int: i8,
    pub agi: i8,
    pub wis: i8,
    pub mr: i8,
    pub fr: i8,
    pub cr: i8,
    pub dr: i8,
    pub pr: i8,
    pub hp: i32,
    pub mana: i32,
    pub ac: i32,
    pub max_charges: i8,
    pub light: u8,
    pub delay: u8,
    pub damage: u8,
    pub range: u8,
    pub skill: u8,
    pub magic: i8,
    pub cast_level: i8,
    pub material: u8,
    /// Packed RGB tint
    pub color: u32,
    pub spell_id0: u32,
    /// Bitmask of classes allowed to use the item
    pub classes: u32,
    /// Bitmask of races allowed to use the item
    pub races: u32,
    /// 1 stackable, 3 normal
    pub stackable: i8,
    pub level: u8,
    /// Stack size for stackables, charges otherwise (-1 unlimited)
    pub charges: i8,
    pub effect_type: i8,
    pub spell_id: u32,
    /// Milliseconds
    pub cast_time: u32,
    pub skill_mod_id: u32,
    pub skill_mod_percent: i32,
}

/// An ordinary item: base plus stats
///
/// Length: 432 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonItem {
    pub base: ItemBase,
    pub stats: ItemStats,
}

impl CommonItem {
    pub const LEN: usize = 432;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let base = ItemBase::read(s)?;

        let str = s.read_i8()?;
        let sta = s.read_i8()?;
        let cha = s.read_i8()?;
        let dex = s.read_i8()?;
        let int = s.read_i8()?;
        let agi = s.read_i8()?;
        let wis = s.read_i8()?;
        let mr = s.read_i8()?;
        let fr = s.read_i8()?;
        let cr = s.read_i8()?;
        let dr = s.read_i8()?;
        let pr = s.read_i8()?;
        let hp = s.read_i32()?;
        let mana = s.read_i32()?;
        let ac = s.read_i32()?;
        let max_charges = s.read_i8()?;
        s.skip(1)?;
        let light = s.read_u8()?;
        let delay = s.read_u8()?;
        let damage = s.read_u8()?;
        s.skip(1)?;
        let range = s.read_u8()?;
        let skill = s.read_u8()?;
        let magic = s.read_i8()?;
        let cast_level = s.read_i8()?;
        let material = s.read_u8()?;
        s.skip(1)?;
        let color = s.read_u32()?;
        s.skip(4)?;
        let spell_id0 = s.read_u32()?;
        let classes = s.read_u32()?;
        let races = s.read_u32()?;
        let stackable = s.read_i8()?;
        let level = s.read_u8()?;
        let charges = s.read_i8()?;
        let effect_type = s.read_i8()?;
        let spell_id = s.read_u32()?;
        s.skip(12)?;
        let cast_time = s.read_u32()?;
        s.skip(16)?;
        let skill_mod_id = s.read_u32()?;
        let skill_mod_percent = s.read_i32()?;
        s.skip(88)?;

        Ok(Self {
            base,
            stats: ItemStats {
                str,
                sta,
                cha,
                dex,
                int,
                agi,
                wis,
                mr,
                fr,
                cr,
                dr,
                pr,
                hp,
                mana,
                ac,
                max_charges,
                light,
                delay,
                damage,
                range,
                skill,
                magic,
                cast_level,
                material,
                color,
                spell_id0,
                classes,
                races,
                stackable,
                level,
                charges,
                effect_type,
                spell_id,
                cast_time,
                skill_mod_id,
                skill_mod_percent,
            },
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        let st = &self.stats;
        self.base.write(buf);

        for stat in [
            st.str, st.sta, st.cha, st.dex, st.int, st.agi, st.wis, st.mr, st.fr, st.cr, st.dr,
            st.pr,
        ] {
            buf.put_i8(stat);
        }
        buf.put_i32_le(st.hp);
        buf.put_i32_le(st.mana);
        buf.put_i32_le(st.ac);
        buf.put_i8(st.max_charges);
        put_reserved(buf, 1);
        buf.put_u8(st.light);
        buf.put_u8(st.delay);
        buf.put_u8(st.damage);
        put_reserved(buf, 1);
        buf.put_u8(st.range);
        buf.put_u8(st.skill);
        buf.put_i8(st.magic);
        buf.put_i8(st.cast_level);
        buf.put_u8(st.material);
        put_reserved(buf, 1);
        buf.put_u32_le(st.color);
        put_reserved(buf, 4);
        buf.put_u32_le(st.spell_id0);
        buf.put_u32_le(st.classes);
        buf.put_u32_le(st.races);
        buf.put_i8(st.stackable);
        buf.put_u8(st.level);
        buf.put_i8(st.charges);
        buf.put_i8(st.effect_type);
        buf.put_u32_le(st.spell_id);
        put_reserved(buf, 12);
        buf.put_u32_le(st.cast_time);
        put_reserved(buf, 16);
        buf.put_u32_le(st.skill_mod_id);
        buf.put_i32_le(st.skill_mod_percent);
        put_reserved(buf, 88);
    }
}

/// A bag or box
///
/// Length: 288 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerItem {
    pub base: ItemBase,
    pub num_slots: u8,
    /// Largest item size that fits
    pub size_capacity: i8,
    /// Percent
    pub weight_reduction: u8,
}

impl ContainerItem {
    pub const LEN: usize = 288;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let base = ItemBase::read(s)?;
        s.skip(41)?;
        let num_slots = s.read_u8()?;
        s.skip(1)?;
        let size_capacity = s.read_i8()?;
        let weight_reduction = s.read_u8()?;
        s.skip(3)?;
        Ok(Self {
            base,
            num_slots,
            size_capacity,
            weight_reduction,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        self.base.write(buf);
        put_reserved(buf, 41);
        buf.put_u8(self.num_slots);
        put_reserved(buf, 1);
        buf.put_i8(self.size_capacity);
        buf.put_u8(self.weight_reduction);
        put_reserved(buf, 3);
    }
}

/// A readable book or note
///
/// Length: 276 bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookItem {
    pub base: ItemBase,
    /// Server-side text file
    pub file: String,
}

impl BookItem {
    pub const LEN: usize = 276;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let base = ItemBase::read(s)?;
        s.skip(3)?;
        let file = s.read_fixed_text(15)?;
        s.skip(18)?;
        Ok(Self { base, file })
    }

    fn write(&self, buf: &mut BytesMut) {
        self.base.write(buf);
        put_reserved(buf, 3);
        put_fixed_text(buf, &self.file, 15);
        put_reserved(buf, 18);
    }
}

/// One item of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemPayload {
    Item(CommonItem),
    Container(ContainerItem),
    Book(BookItem),
}

impl ItemPayload {
    /// Size of the union the payload is carried in
    pub const UNION_LEN: usize = CommonItem::LEN;

    /// Discriminant written in front of the union
    pub fn item_type(&self) -> i16 {
        match self {
            ItemPayload::Item(_) => item_type::ITEM,
            ItemPayload::Container(_) => item_type::CONTAINER,
            ItemPayload::Book(_) => item_type::BOOK,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            ItemPayload::Item(item) => &item.base,
            ItemPayload::Container(container) => &container.base,
            ItemPayload::Book(book) => &book.base,
        }
    }

    /// Read the variant selected by `discriminant`, then skip union padding
    fn read_union(s: &mut NetStream<'_>, discriminant: i16, record: &'static str) -> Result<Self> {
        let start = s.pos();
        let payload = match discriminant {
            item_type::ITEM => ItemPayload::Item(CommonItem::read(s)?),
            item_type::CONTAINER => ItemPayload::Container(ContainerItem::read(s)?),
            item_type::BOOK => ItemPayload::Book(BookItem::read(s)?),
            other => {
                return Err(DecodeError::UnknownVariant {
                    record,
                    value: other.into(),
                })
            }
        };
        s.skip(Self::UNION_LEN - (s.pos() - start))?;
        Ok(payload)
    }

    fn write_union(&self, buf: &mut BytesMut) {
        let used = match self {
            ItemPayload::Item(item) => {
                item.write(buf);
                CommonItem::LEN
            }
            ItemPayload::Container(container) => {
                container.write(buf);
                ContainerItem::LEN
            }
            ItemPayload::Book(book) => {
                book.write(buf);
                BookItem::LEN
            }
        };
        put_reserved(buf, Self::UNION_LEN - used);
    }
}

/// Merchant item, any kind
///
/// Length: 434 bytes (`i16` discriminant and a 432-byte union)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInShop {
    pub item: ItemPayload,
}

impl WireRecord for ItemInShop {
    const KIND: MessageKind = MessageKind::ItemInShop;
    const FIXED_LEN: usize = 2 + ItemPayload::UNION_LEN;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        let discriminant = s.read_i16()?;
        let item = ItemPayload::read_union(s, discriminant, "ItemInShop")?;
        Ok(Self { item })
    }

    fn write(&self, buf: &mut BytesMut) {
        buf.put_i16_le(self.item.item_type());
        self.item.write_union(buf);
    }
}

/// Inventory item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerItem {
    pub item: CommonItem,
}

impl WireRecord for PlayerItem {
    const KIND: MessageKind = MessageKind::PlayerItem;
    const FIXED_LEN: usize = 2 + CommonItem::LEN;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(2)?;
        Ok(Self {
            item: CommonItem::read(s)?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 2);
        self.item.write(buf);
    }
}

/// Inventory book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBook {
    pub book: BookItem,
}

impl WireRecord for PlayerBook {
    const KIND: MessageKind = MessageKind::PlayerBook;
    const FIXED_LEN: usize = 2 + BookItem::LEN;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(2)?;
        Ok(Self {
            book: BookItem::read(s)?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 2);
        self.book.write(buf);
    }
}

/// Inventory container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerContainer {
    pub container: ContainerItem,
}

impl WireRecord for PlayerContainer {
    const KIND: MessageKind = MessageKind::PlayerContainer;
    const FIXED_LEN: usize = 2 + ContainerItem::LEN;

    fn read(s: &mut NetStream<'_>) -> Result<Self> {
        s.skip(2)?;
        Ok(Self {
            container: ContainerItem::read(s)?,
        })
    }

    fn write(&self, buf: &mut BytesMut) {
        put_reserved(buf, 2);
        self.container.write(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(name: &str, class: u8) -> ItemBase {
        ItemBase {
            name: name.into(),
            lore: name.into(),
            id_file: "IT63".into(),
            weight: 25,
            no_save: 1,
            no_drop: 1,
            size: 2,
            item_class: class,
            item_nr: 5019,
            icon_nr: 592,
            equip_slot: 13,
            equipable_slots: 1 << 13,
            cost: 1500,
        }
    }

    fn sword() -> CommonItem {
        CommonItem {
            base: base("Rusty Short Sword", 0),
            stats: ItemStats {
                str: 1,
                pr: -2,
                hp: 5,
                ac: 3,
                delay: 28,
                damage: 6,
                skill: 1,
                classes: 0x7fff,
                races: 0x3fff,
                stackable: 3,
                charges: -1,
                spell_id: 0xffff,
                skill_mod_percent: -5,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_variant_lengths() {
        let mut buf = BytesMut::new();
        sword().write(&mut buf);
        assert_eq!(buf.len(), CommonItem::LEN);

        let mut buf = BytesMut::new();
        ContainerItem::default().write(&mut buf);
        assert_eq!(buf.len(), ContainerItem::LEN);

        let mut buf = BytesMut::new();
        BookItem::default().write(&mut buf);
        assert_eq!(buf.len(), BookItem::LEN);
    }

    #[test]
    fn test_stat_offsets() {
        let mut buf = BytesMut::new();
        sword().write(&mut buf);
        assert_eq!(&buf[180..184], &5019u32.to_le_bytes());
        assert_eq!(buf[240], 1);
        assert_eq!(buf[251] as i8, -2);
        assert_eq!(&buf[252..256], &5i32.to_le_bytes());
        assert_eq!(buf[267], 28);
        assert_eq!(buf[298] as i8, -1);
        assert_eq!(&buf[300..304], &0xffffu32.to_le_bytes());
        assert_eq!(&buf[340..344], &(-5i32).to_le_bytes());
    }

    #[test]
    fn test_shop_item_variants() {
        let bag = ContainerItem {
            base: base("Large Sewn Sack", 1),
            num_slots: 8,
            size_capacity: 3,
            weight_reduction: 0,
        };
        let note = BookItem {
            base: base("Tattered Note", 2),
            file: "CRBook1".into(),
        };

        for item in [
            ItemPayload::Item(sword()),
            ItemPayload::Container(bag),
            ItemPayload::Book(note),
        ] {
            let record = ItemInShop { item };
            let bytes = record.encode();
            assert_eq!(bytes.len(), ItemInShop::FIXED_LEN);
            assert_eq!(&bytes[..2], &record.item.item_type().to_le_bytes());
            assert_eq!(ItemInShop::decode(&bytes).unwrap(), record);
        }
    }

    #[test]
    fn test_container_fields() {
        let bag = ContainerItem {
            base: base("Backpack", 1),
            num_slots: 8,
            size_capacity: 3,
            weight_reduction: 50,
        };
        let bytes = PlayerContainer {
            container: bag.clone(),
        }
        .encode();
        // Two reserved bytes precede the item
        assert_eq!(bytes[2 + 281], 8);
        assert_eq!(bytes[2 + 284], 50);
        assert_eq!(PlayerContainer::decode(&bytes).unwrap().container, bag);
    }

    #[test]
    fn test_unknown_discriminant() {
        let mut bytes = ItemInShop {
            item: ItemPayload::Item(sword()),
        }
        .encode();
        bytes[0] = 9;

        assert_eq!(
            ItemInShop::decode(&bytes).unwrap_err(),
            DecodeError::UnknownVariant {
                record: "ItemInShop",
                value: 9
            }
        );
    }

    #[test]
    fn test_book_file_name() {
        let record = PlayerBook {
            book: BookItem {
                base: base("A Worn Journal", 2),
                file: "journal_of_a_very_long_name".into(),
            },
        };
        let decoded = PlayerBook::decode(&record.encode()).unwrap();
        // 15-byte buffer keeps 14 characters and the terminator
        assert_eq!(decoded.book.file, "journal_of_a_v");
    }
}
