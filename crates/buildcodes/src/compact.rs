//! Compact build codes.
//!
//! A [`Build`] is packed as nested positional MessagePack arrays, deflated,
//! and written as base-2048 text:
//!
//! ```text
//! Build [classname?, level, stats[29], relic_sub?, epic_sub?, items[..], deck[..]]
//! Item  [item_id, assigned_mastery, assigned_res, sublimation_id?, slots?]
//! Slot  [color, stat_id?, shard_lv]
//! ```

use std::str::FromStr;

use gear_core::{ClassName, Elements};
use serde::{Deserialize, Serialize};

use crate::error::BuildCodeError;
use crate::stats::AllocatedStats;
use crate::{base2048, deflate};

/// Rune slot color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SlotColor {
    Red = 1,
    Green = 2,
    Blue = 3,
    White = 4,
}

impl From<SlotColor> for u8 {
    fn from(color: SlotColor) -> Self {
        color as u8
    }
}

impl TryFrom<u8> for SlotColor {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Red),
            2 => Ok(Self::Green),
            3 => Ok(Self::Blue),
            4 => Ok(Self::White),
            other => Err(format!("unknown slot color {other}")),
        }
    }
}

/// One rune slot on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub color: SlotColor,
    #[serde(default)]
    pub stat_id: Option<u32>,
    #[serde(default)]
    pub shard_lv: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: u32,
    #[serde(default)]
    pub assigned_mastery: Elements,
    #[serde(default)]
    pub assigned_res: Elements,
    #[serde(default)]
    pub sublimation_id: Option<u32>,
    #[serde(default)]
    pub slots: Option<Vec<Slot>>,
}

impl Item {
    pub fn new(item_id: u32) -> Self {
        Self {
            item_id,
            ..Self::default()
        }
    }

    pub fn with_mastery(mut self, elements: Elements) -> Self {
        self.assigned_mastery = elements;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(with = "class_code")]
    pub classname: Option<ClassName>,
    pub level: u16,
    pub stats: AllocatedStats,
    pub relic_sub: Option<u32>,
    pub epic_sub: Option<u32>,
    pub items: Vec<Item>,
    pub deck: Vec<u32>,
}

impl Build {
    pub const DEFAULT_LEVEL: u16 = 230;
}

impl Default for Build {
    fn default() -> Self {
        Self {
            classname: None,
            level: Self::DEFAULT_LEVEL,
            stats: AllocatedStats::default(),
            relic_sub: None,
            epic_sub: None,
            items: Vec::new(),
            deck: Vec::new(),
        }
    }
}

/// Class as its numeric code, or nil.
mod class_code {
    use gear_core::ClassName;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(class: &Option<ClassName>, s: S) -> Result<S::Ok, S::Error> {
        match class {
            Some(class) => s.serialize_some(&class.code()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ClassName>, D::Error> {
        Option::<u8>::deserialize(d)?
            .map(|code| {
                ClassName::from_code(code)
                    .ok_or_else(|| D::Error::custom(format!("unknown class code {code}")))
            })
            .transpose()
    }
}

pub fn encode_build(build: &Build) -> Result<String, BuildCodeError> {
    let packed = rmp_serde::to_vec(build)?;
    Ok(base2048::encode(&deflate::compress(&packed)?))
}

pub fn decode_build(code: &str) -> Result<Build, BuildCodeError> {
    let packed = deflate::decompress(&base2048::decode(code)?)?;
    Ok(rmp_serde::from_slice(&packed)?)
}

/// Class, level and item ids of a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialBuild {
    pub classname: Option<ClassName>,
    pub level: u16,
    pub item_ids: Vec<u32>,
}

/// Encodes a build holding only a class, a level and bare items.
///
/// `classname` accepts full and short class names ("Osamodas", "Osa").
pub fn encode_partial(
    classname: Option<&str>,
    level: u16,
    item_ids: &[u32],
) -> Result<String, BuildCodeError> {
    let classname = classname
        .map(|name| {
            ClassName::from_str(name).map_err(|_| BuildCodeError::UnknownClass(name.to_owned()))
        })
        .transpose()?;
    let build = Build {
        classname,
        level,
        items: item_ids.iter().copied().map(Item::new).collect(),
        ..Build::default()
    };
    encode_build(&build)
}

/// Decodes the class, level and item ids of any compact code.
///
/// Every failure collapses to [`BuildCodeError::InvalidBuildString`].
pub fn decode_partial(code: &str) -> Result<PartialBuild, BuildCodeError> {
    let build = decode_build(code).map_err(|err| {
        tracing::debug!(error = %err, "Rejected build string");
        BuildCodeError::InvalidBuildString
    })?;
    Ok(PartialBuild {
        classname: build.classname,
        level: build.level,
        item_ids: build.items.iter().map(|i| i.item_id).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_packs_positionally() {
        let packed = rmp_serde::to_vec(&Build::default()).unwrap();
        // 7-element array, nil class, level 230, then the 29-element stats array
        assert_eq!(hex::encode(&packed[..7]), "97c0cce6dc001d");
        assert_eq!(packed.len(), 7 + 29 + 4);
    }

    #[test]
    fn runes_and_sublimations_survive() {
        let build = Build {
            classname: Some(ClassName::Sram),
            level: 200,
            relic_sub: Some(27000),
            items: vec![Item {
                item_id: 9,
                assigned_mastery: Elements::FIRE | Elements::WATER,
                assigned_res: Elements::AIR,
                sublimation_id: Some(5),
                slots: Some(vec![
                    Slot {
                        color: SlotColor::Red,
                        stat_id: Some(3),
                        shard_lv: 10,
                    },
                    Slot {
                        color: SlotColor::White,
                        stat_id: None,
                        shard_lv: 0,
                    },
                ]),
            }],
            ..Build::default()
        };
        assert_eq!(decode_build(&encode_build(&build).unwrap()).unwrap(), build);
    }

    #[test]
    fn partial_codes_carry_ids() {
        let code = encode_partial(Some("Osa"), 170, &[21207, 26599]).unwrap();
        let partial = decode_partial(&code).unwrap();
        assert_eq!(partial.classname, Some(ClassName::Osamodas));
        assert_eq!(partial.level, 170);
        assert_eq!(partial.item_ids, vec![21207, 26599]);

        assert!(matches!(
            encode_partial(Some("Wizard"), 170, &[]),
            Err(BuildCodeError::UnknownClass(_))
        ));
    }

    #[test]
    fn garbage_is_an_invalid_build_string() {
        let err = decode_partial("not a build").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Build String");
    }
}
