//! Solve outputs.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use gear_core::{EquipableItem, ItemSlot, Locale};
use serde::Serialize;

use crate::topk::Ranked;

/// One complete set and its effective mastery.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub score: f64,
    /// Human-readable component list, one item per line.
    pub description: String,
    /// Every item of the set, sorted by id.
    pub items: Vec<EquipableItem>,
}

impl Solution {
    pub(crate) fn from_ranked(ranked: &Ranked<'_>, locale: Locale) -> Self {
        Self {
            score: ranked.score,
            description: describe(&ranked.items, locale),
            items: ranked.items.iter().map(|&item| item.clone()).collect(),
        }
    }

    pub fn item_ids(&self) -> Vec<u32> {
        self.items.iter().map(|i| i.id).collect()
    }

    /// Items with a catalog identity, i.e. without placeholders.
    pub fn catalog_items(&self) -> impl Iterator<Item = &EquipableItem> {
        self.items.iter().filter(|i| !i.is_placeholder())
    }
}

/// Relic first, epic second, then the rest by position and id.
fn describe(items: &[&EquipableItem], locale: Locale) -> String {
    let mut out = String::new();
    if let Some(relic) = items.iter().find(|i| i.is_relic()) {
        let _ = writeln!(out, "Relic: {}", relic.display(locale));
    }
    if let Some(epic) = items.iter().find(|i| i.is_epic()) {
        let _ = writeln!(out, "Epic: {}", epic.display(locale));
    }
    let mut rest: Vec<&&EquipableItem> = items
        .iter()
        .filter(|i| !i.is_relic() && !i.is_epic())
        .collect();
    rest.sort_by_key(|i| (i.slot, i.id));
    for item in rest {
        let _ = writeln!(out, "{}", item.display(locale));
    }
    out
}

/// Deduplicated search space, returned instead of searching on a dry run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CandidatePool {
    pub relics: Vec<EquipableItem>,
    pub epics: Vec<EquipableItem>,
    pub forced: Vec<EquipableItem>,
    pub slots: BTreeMap<ItemSlot, Vec<EquipableItem>>,
    /// Weapon sets, each one or two items.
    pub weapons: Vec<Vec<EquipableItem>>,
}

impl CandidatePool {
    /// Every item in the pool once, in pool order.
    pub fn unique_items(&self) -> Vec<&EquipableItem> {
        let mut seen = HashSet::new();
        self.relics
            .iter()
            .chain(&self.epics)
            .chain(&self.forced)
            .chain(self.slots.values().flatten())
            .chain(self.weapons.iter().flatten())
            .filter(|item| seen.insert(item.id))
            .collect()
    }
}
