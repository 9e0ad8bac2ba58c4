//! Wakforge version 1 build codes.
//!
//! The payload is one flat positional array of 66 values:
//!
//! ```text
//! [version=1, class (-1 when empty), level,
//!  29 allocated stat points, 14 item slots, 12 actives, 6 passives,
//!  epic sublimation, relic sublimation]
//! ```
//!
//! An item slot is `[]` when empty, otherwise
//! `[item_id, elements, [[effect_id, color, level], ...], sublimation]`.

use std::fmt;

use bitflags::bitflags;
use gear_core::{ClassName, EquipableItem, ItemSlot};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildCodeError;
use crate::stats::AllocatedStats;
use crate::{base2048, deflate};

pub const VERSION: u8 = 1;
pub const ITEM_SLOTS: usize = 14;
pub const ACTIVE_SLOTS: usize = 12;
pub const PASSIVE_SLOTS: usize = 6;

const PAYLOAD_LEN: usize =
    3 + AllocatedStats::FIELD_COUNT + ITEM_SLOTS + ACTIVE_SLOTS + PASSIVE_SLOTS + 2;

/// Position of each item slot. Rings appear twice.
pub const SLOT_ORDER: [ItemSlot; ITEM_SLOTS] = [
    ItemSlot::Accessory,
    ItemSlot::Back,
    ItemSlot::Belt,
    ItemSlot::Chest,
    ItemSlot::FirstWeapon,
    ItemSlot::Head,
    ItemSlot::LeftHand,
    ItemSlot::Legs,
    ItemSlot::Mount,
    ItemSlot::Neck,
    ItemSlot::Pet,
    ItemSlot::LeftHand,
    ItemSlot::SecondWeapon,
    ItemSlot::Shoulders,
];

bitflags! {
    /// Element choice for random-element items, in Wakforge bit order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct WakforgeElements: u8 {
        const FIRE  = 1 << 0;
        const EARTH = 1 << 1;
        const WATER = 1 << 2;
        const AIR   = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rune {
    pub effect_id: i32,
    pub color: i32,
    pub level: i32,
}

impl Default for Rune {
    fn default() -> Self {
        Self {
            effect_id: -1,
            color: -1,
            level: -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquippedItem {
    pub item_id: u32,
    pub elements: WakforgeElements,
    pub runes: Vec<Rune>,
    pub sublimation: i32,
}

impl EquippedItem {
    pub fn new(item_id: u32, elements: WakforgeElements) -> Self {
        Self {
            item_id,
            elements,
            runes: Vec::new(),
            sublimation: -1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Equipped(EquippedItem),
}

impl Slot {
    pub fn item(&self) -> Option<&EquippedItem> {
        match self {
            Self::Empty => None,
            Self::Equipped(item) => Some(item),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buildv1 {
    pub class: Option<ClassName>,
    pub level: u16,
    pub stats: AllocatedStats,
    pub slots: [Slot; ITEM_SLOTS],
    pub actives: [i32; ACTIVE_SLOTS],
    pub passives: [i32; PASSIVE_SLOTS],
    pub epic_sublimation: i32,
    pub relic_sublimation: i32,
}

impl Default for Buildv1 {
    fn default() -> Self {
        Self::with_level(230)
    }
}

impl Buildv1 {
    pub fn with_level(level: u16) -> Self {
        Self {
            class: None,
            level,
            stats: AllocatedStats::default(),
            slots: Default::default(),
            actives: [-1; ACTIVE_SLOTS],
            passives: [-1; PASSIVE_SLOTS],
            epic_sublimation: -1,
            relic_sublimation: -1,
        }
    }

    /// Puts `item` in the first free slot of its position.
    pub fn add_item(
        &mut self,
        item: &EquipableItem,
        elements: WakforgeElements,
    ) -> Result<(), BuildCodeError> {
        let free = SLOT_ORDER
            .iter()
            .zip(self.slots.iter_mut())
            .find(|(slot, held)| **slot == item.slot && held.is_empty())
            .map(|(_, held)| held)
            .ok_or(BuildCodeError::NoFreeSlot {
                slot: item.slot,
                item_id: item.id,
            })?;
        *free = Slot::Equipped(EquippedItem::new(item.id, elements));
        Ok(())
    }

    /// Sets the elements of the first equipped item with `item_id`.
    pub fn add_elements_to_item(&mut self, item_id: u32, elements: WakforgeElements) {
        if let Some(item) = self.slots.iter_mut().find_map(|slot| match slot {
            Slot::Equipped(item) if item.item_id == item_id => Some(item),
            _ => None,
        }) {
            item.elements = elements;
        }
    }

    pub fn clear_items(&mut self) {
        self.slots = Default::default();
    }

    /// Equipped items in slot order.
    pub fn items(&self) -> Vec<&EquippedItem> {
        self.slots.iter().filter_map(Slot::item).collect()
    }

    pub fn passives(&self) -> Vec<i32> {
        self.passives.iter().copied().filter(|&p| p > -1).collect()
    }

    /// Relic, epic, then per-item sublimation ids.
    pub fn sublimations(&self) -> Vec<i32> {
        [self.relic_sublimation, self.epic_sublimation]
            .into_iter()
            .chain(self.items().into_iter().map(|i| i.sublimation))
            .filter(|&id| id > 0)
            .collect()
    }

    pub fn allocated_stats(&self) -> &AllocatedStats {
        &self.stats
    }
}

/// Build code holding `items` at `level`. Placeholder items are skipped.
pub fn build_code_from_items<'a>(
    level: u16,
    items: impl IntoIterator<Item = &'a EquipableItem>,
) -> Result<String, BuildCodeError> {
    let mut build = Buildv1::with_level(level);
    for item in items.into_iter().filter(|i| !i.is_placeholder()) {
        build.add_item(item, WakforgeElements::empty())?;
    }
    build_to_code(&build)
}

pub fn build_from_code(code: &str) -> Result<Buildv1, BuildCodeError> {
    let packed = deflate::decompress(&base2048::decode(code)?)?;
    Ok(rmp_serde::from_slice(&packed)?)
}

pub fn build_to_code(build: &Buildv1) -> Result<String, BuildCodeError> {
    let packed = rmp_serde::to_vec(build)?;
    Ok(base2048::encode(&deflate::compress(&packed)?))
}

// ===== wire format =====

impl Serialize for Rune {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.effect_id, self.color, self.level).serialize(serializer)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_seq(Some(0))?.end(),
            Self::Equipped(item) => (
                item.item_id,
                item.elements.bits(),
                &item.runes,
                item.sublimation,
            )
                .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SlotVisitor)
    }
}

/// Elements are an integer, or `[0, 0, 0]` in older codes.
#[derive(Deserialize)]
#[serde(untagged)]
enum ElementsField {
    Bits(u8),
    Legacy(Vec<i64>),
}

struct SlotVisitor;

impl<'de> Visitor<'de> for SlotVisitor {
    type Value = Slot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an empty array or [item_id, elements, runes, sublimation]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Slot, A::Error> {
        let Some(item_id) = seq.next_element::<i64>()? else {
            return Ok(Slot::Empty);
        };
        let elements = match seq.next_element::<ElementsField>()? {
            None => WakforgeElements::empty(),
            Some(ElementsField::Bits(bits)) => WakforgeElements::from_bits_truncate(bits),
            Some(ElementsField::Legacy(values)) if values.iter().all(|&v| v == 0) => {
                WakforgeElements::empty()
            }
            Some(ElementsField::Legacy(values)) => {
                return Err(de::Error::custom(format!("unexpected element list {values:?}")));
            }
        };
        let runes = seq
            .next_element::<Vec<Vec<i32>>>()?
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let at = |i: usize| r.get(i).copied().unwrap_or(-1);
                Rune {
                    effect_id: at(0),
                    color: at(1),
                    level: at(2),
                }
            })
            .collect();
        let sublimation = seq.next_element::<i32>()?.unwrap_or(-1);
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        match u32::try_from(item_id) {
            Ok(item_id) if item_id > 0 => Ok(Slot::Equipped(EquippedItem {
                item_id,
                elements,
                runes,
                sublimation,
            })),
            _ => Ok(Slot::Empty),
        }
    }
}

impl Serialize for Buildv1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let class = self.class.map_or(-1, |c| i16::from(c.code()));
        let mut tuple = serializer.serialize_tuple(PAYLOAD_LEN)?;
        tuple.serialize_element(&VERSION)?;
        tuple.serialize_element(&class)?;
        tuple.serialize_element(&self.level)?;
        for value in self.stats.to_values() {
            tuple.serialize_element(&value)?;
        }
        for slot in &self.slots {
            tuple.serialize_element(slot)?;
        }
        for active in &self.actives {
            tuple.serialize_element(active)?;
        }
        for passive in &self.passives {
            tuple.serialize_element(passive)?;
        }
        tuple.serialize_element(&self.epic_sublimation)?;
        tuple.serialize_element(&self.relic_sublimation)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Buildv1 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(PAYLOAD_LEN, BuildVisitor)
    }
}

struct BuildVisitor;

/// Next element of a fixed-length payload, erroring with its position.
fn field<'de, T, A>(seq: &mut A, index: &mut usize) -> Result<T, A::Error>
where
    T: Deserialize<'de>,
    A: SeqAccess<'de>,
{
    let value = seq
        .next_element()?
        .ok_or_else(|| de::Error::invalid_length(*index, &"a 66-element Wakforge build"))?;
    *index += 1;
    Ok(value)
}

impl<'de> Visitor<'de> for BuildVisitor {
    type Value = Buildv1;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a 66-element Wakforge build")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Buildv1, A::Error> {
        let mut index = 0;
        let version: u8 = field(&mut seq, &mut index)?;
        if version != VERSION {
            return Err(de::Error::custom(format!("unsupported build code version {version}")));
        }
        let class = match field::<i16, _>(&mut seq, &mut index)? {
            -1 => None,
            code => Some(
                u8::try_from(code)
                    .ok()
                    .and_then(ClassName::from_code)
                    .ok_or_else(|| de::Error::custom(format!("unknown class code {code}")))?,
            ),
        };
        let mut build = Buildv1::with_level(field(&mut seq, &mut index)?);
        build.class = class;

        let mut stats = [0; AllocatedStats::FIELD_COUNT];
        for value in &mut stats {
            *value = field(&mut seq, &mut index)?;
        }
        build.stats = AllocatedStats::from_values(stats);
        for slot in &mut build.slots {
            *slot = field(&mut seq, &mut index)?;
        }
        for active in &mut build.actives {
            *active = field(&mut seq, &mut index)?;
        }
        for passive in &mut build.passives {
            *passive = field(&mut seq, &mut index)?;
        }
        build.epic_sublimation = field(&mut seq, &mut index)?;
        build.relic_sublimation = field(&mut seq, &mut index)?;
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(build)
    }
}
