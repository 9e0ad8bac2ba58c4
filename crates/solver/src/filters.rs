//! Catalog filter predicates.

use gear_content::{DEFAULT_FORBIDDEN_NAMES, has_equip_condition, is_unobtainable};
use gear_core::{EquipableItem, Locale, SolverConfig};

/// Nation swords (relics) at `0..4`, matching nation rings (epics) at `4..8`.
/// Sword `i` pairs with ring `i + 4`.
pub const NATION_RELIC_EPIC_IDS: [u32; 8] = [
    26494, 26495, 26496, 26497, // Amakna, Sufokia, Bonta, Brakmar swords
    26575, 26576, 26577, 26578, // Amakna, Sufokia, Bonta, Brakmar rings
];

/// Level bracket the nation pairs belong to.
pub const NATION_PAIR_LEVEL: u16 = 200;

const GELANO_ID: u32 = 9723;
const BAGUS_SHUSHU_ID: u32 = 27281;

pub fn is_nation_item(item_id: u32) -> bool {
    NATION_RELIC_EPIC_IDS.contains(&item_id)
}

/// Ring id for a nation sword id.
pub fn nation_ring_for(sword_id: u32) -> Option<u32> {
    let idx = NATION_RELIC_EPIC_IDS[..4].iter().position(|&id| id == sword_id)?;
    Some(NATION_RELIC_EPIC_IDS[idx + 4])
}

/// Sword id for a nation ring id.
pub fn nation_sword_for(ring_id: u32) -> Option<u32> {
    let idx = NATION_RELIC_EPIC_IDS[4..].iter().position(|&id| id == ring_id)?;
    Some(NATION_RELIC_EPIC_IDS[idx])
}

/// Filter predicates bound to one configuration.
#[derive(Clone, Debug)]
pub struct ItemFilter<'c> {
    config: &'c SolverConfig,
    low_bound: u16,
}

impl<'c> ItemFilter<'c> {
    pub fn new(config: &'c SolverConfig) -> Self {
        Self {
            config,
            low_bound: config.low_bound(),
        }
    }

    /// Excludes unobtainable, forbidden and conditional items and disallowed
    /// rarities. Pets and mounts ignore rarity lists.
    pub fn initial(&self, item: &EquipableItem) -> bool {
        !is_unobtainable(item.id)
            && !self.config.forbid_ids.contains(&item.id)
            && !self.name_forbidden(item)
            && !has_equip_condition(item.id)
            && (item.slot.is_companion() || self.config.rarity_allowed(item.rarity))
    }

    fn name_forbidden(&self, item: &EquipableItem) -> bool {
        let forbidden_by_user = item
            .name(self.config.locale)
            .is_some_and(|name| self.config.forbid_names.iter().any(|f| f == name));
        let forbidden_by_default = item
            .name(Locale::En)
            .is_some_and(|name| DEFAULT_FORBIDDEN_NAMES.contains(&name));
        forbidden_by_user || forbidden_by_default
    }

    /// `low_bound <= level <= level`; pets and mounts always pass.
    pub fn level(&self, item: &EquipableItem) -> bool {
        item.slot.is_companion() || (self.low_bound..=self.config.level).contains(&item.level)
    }

    /// Level filter with two rings whose usable window is wider than their
    /// nominal level.
    pub fn relic_epic_level(&self, item: &EquipableItem) -> bool {
        match item.id {
            GELANO_ID => (65..=140).contains(&self.config.level),
            BAGUS_SHUSHU_ID => (125..=185).contains(&self.config.level),
            _ => self.level(item),
        }
    }

    /// True when the level window spans the nation bracket.
    pub fn spans_nation_bracket(&self) -> bool {
        (self.low_bound..=self.config.level).contains(&NATION_PAIR_LEVEL)
    }
}
