//! Forced item resolution.
//!
//! Forced items occupy their slot in every candidate set. A forced nation
//! sword pulls in its ring and the other way around.

use std::collections::{BTreeMap, HashSet};

use gear_content::Catalog;
use gear_core::{EquipableItem, ItemSlot, Locale, ScoreModel, SolverConfig, Stats};

use crate::error::SolveError;
use crate::filters::{nation_ring_for, nation_sword_for};
use crate::pools::{Candidate, sort_candidates};

/// Items the user forced into every set.
#[derive(Clone, Debug, Default)]
pub struct ForcedItems<'a> {
    pub relic: Option<Candidate<'a>>,
    pub epic: Option<Candidate<'a>>,
    /// Forced items that are neither relic nor epic.
    pub others: Vec<Candidate<'a>>,
    /// Positions taken by every forced item, relic and epic included.
    slot_counts: BTreeMap<ItemSlot, usize>,
}

impl<'a> ForcedItems<'a> {
    /// Resolves forced ids and names against the catalog.
    ///
    /// Names resolve to the best-scoring item per `(name, slot)`, so a name
    /// shared by a ring and its souvenir reissue forces one ring.
    pub fn resolve(
        catalog: &'a Catalog,
        config: &SolverConfig,
        model: &ScoreModel,
    ) -> Result<Self, SolveError> {
        if !config.has_forced_items() {
            return Ok(Self::default());
        }

        let mut forced: Vec<Candidate<'a>> = config
            .force_ids
            .iter()
            .filter_map(|&id| catalog.get(id))
            .map(|item| Candidate::new(item, model))
            .collect();

        let mut by_name: Vec<Candidate<'a>> = catalog
            .items()
            .iter()
            .filter(|item| {
                item.name(config.locale)
                    .is_some_and(|name| config.force_names.iter().any(|f| f == name))
            })
            .map(|item| Candidate::new(item, model))
            .collect();
        sort_candidates(&mut by_name);
        let mut seen = HashSet::new();
        by_name.retain(|c| seen.insert((c.item.name(config.locale), c.item.slot)));
        forced.extend(by_name);

        if forced.len() < config.force_ids.len() + config.force_names.len() {
            return Err(SolveError::ForcedItemsMissing {
                ids: config.force_ids.clone(),
                names: config.force_names.clone(),
                found: forced.iter().map(|c| c.item.id).collect(),
            });
        }

        let mut relics: Vec<Candidate<'a>> =
            forced.iter().filter(|c| c.item.is_relic()).copied().collect();
        if relics.len() > 1 {
            return Err(SolveError::MultipleRelics);
        }

        let mut epics: Vec<Candidate<'a>> =
            forced.iter().filter(|c| c.item.is_epic()).copied().collect();
        if let Some(ring_id) = relics.first().and_then(|r| nation_ring_for(r.item.id)) {
            let sword_id = relics[0].item.id;
            let ring = catalog
                .get(ring_id)
                .ok_or(SolveError::NationRingMissing { sword_id })?;
            if !epics.iter().any(|e| e.item.id == ring_id) {
                epics.push(Candidate::new(ring, model));
            }
        }
        if epics.len() > 1 {
            return Err(SolveError::MultipleEpics);
        }

        if let Some(sword_id) = epics.first().and_then(|e| nation_sword_for(e.item.id)) {
            let ring_id = epics[0].item.id;
            let sword = catalog
                .get(sword_id)
                .ok_or(SolveError::NationSwordMissing { ring_id })?;
            match relics.first() {
                Some(relic) if relic.item.id == sword_id => {}
                Some(_) => return Err(SolveError::NationRingWithForeignRelic),
                None => relics.push(Candidate::new(sword, model)),
            }
        }

        let others: Vec<Candidate<'a>> = forced
            .into_iter()
            .filter(|c| !c.item.is_relic() && !c.item.is_epic())
            .collect();

        let mut resolved = Self {
            relic: relics.first().copied(),
            epic: epics.first().copied(),
            others,
            slot_counts: BTreeMap::new(),
        };
        let slots: Vec<ItemSlot> = resolved.all().map(|c| c.item.slot).collect();
        for slot in slots {
            *resolved.slot_counts.entry(slot).or_insert(0) += 1;
        }
        for (&slot, &count) in &resolved.slot_counts {
            if count > slot.capacity() {
                return Err(SolveError::TooManyForced {
                    slot,
                    count,
                    max: slot.capacity(),
                });
            }
        }

        tracing::debug!(
            relic = ?resolved.relic.map(|c| c.item.id),
            epic = ?resolved.epic.map(|c| c.item.id),
            others = resolved.others.len(),
            "Resolved forced items"
        );
        Ok(resolved)
    }

    pub fn is_empty(&self) -> bool {
        self.relic.is_none() && self.epic.is_none() && self.others.is_empty()
    }

    /// Relic, epic and other forced items.
    pub fn all(&self) -> impl Iterator<Item = Candidate<'a>> + '_ {
        self.relic
            .into_iter()
            .chain(self.epic)
            .chain(self.others.iter().copied())
    }

    pub fn contains(&self, item_id: u32) -> bool {
        self.all().any(|c| c.item.id == item_id)
    }

    /// Forced items in `slot`, relic and epic included.
    pub fn slot_count(&self, slot: ItemSlot) -> usize {
        self.slot_counts.get(&slot).copied().unwrap_or(0)
    }

    /// True when no more items fit in `slot`.
    pub fn fills(&self, slot: ItemSlot) -> bool {
        self.slot_count(slot) >= slot.capacity()
    }

    /// Whether `item` can still join the forced items.
    pub fn compatible(&self, item: &EquipableItem) -> bool {
        if self.fills(item.slot) {
            return false;
        }
        !(item.slot == ItemSlot::SecondWeapon && self.all().any(|c| c.item.disables_second_weapon))
    }

    /// Names of forced non-relic, non-epic items.
    pub fn other_names(&self, locale: Locale) -> HashSet<&'a str> {
        self.others
            .iter()
            .filter_map(|c| c.item.name(locale))
            .collect()
    }

    /// Stats of the forced non-relic, non-epic items.
    pub fn other_stats(&self) -> Stats {
        self.others.iter().map(|c| &c.item.stats).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::Rarity;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            EquipableItem::new(1, 200, Rarity::Relic, 134, ItemSlot::Head).with_name("Relic Hat"),
            EquipableItem::new(2, 200, Rarity::Relic, 120, ItemSlot::Neck).with_name("Relic Amulet"),
            EquipableItem::new(3, 200, Rarity::Epic, 103, ItemSlot::LeftHand).with_name("Epic Ring"),
            EquipableItem::new(4, 200, Rarity::Legendary, 120, ItemSlot::Neck).with_name("Amulet"),
            EquipableItem::new(5, 200, Rarity::Legendary, 120, ItemSlot::Neck).with_name("Other Amulet"),
            EquipableItem::new(6, 200, Rarity::Legendary, 103, ItemSlot::LeftHand).with_name("Twin"),
            EquipableItem::new(7, 200, Rarity::Souvenir, 103, ItemSlot::LeftHand).with_name("Twin"),
            EquipableItem::new(26494, 200, Rarity::Relic, 110, ItemSlot::FirstWeapon)
                .with_name("Amakna Sword"),
            EquipableItem::new(26575, 200, Rarity::Epic, 103, ItemSlot::LeftHand)
                .with_name("Amakna Ring"),
            EquipableItem::new(1102, 215, Rarity::Legendary, 101, ItemSlot::FirstWeapon)
                .with_name("Great Axe")
                .two_handed(),
            EquipableItem::new(1111, 215, Rarity::Legendary, 112, ItemSlot::SecondWeapon)
                .with_name("Dagger"),
        ])
    }

    fn resolve(ids: &[u32], names: &[&str]) -> Result<ForcedItems<'static>, SolveError> {
        let catalog: &'static Catalog = Box::leak(Box::new(catalog()));
        let mut config = SolverConfig::new();
        config.force_ids = ids.to_vec();
        config.force_names = names.iter().map(|n| n.to_string()).collect();
        ForcedItems::resolve(catalog, &config, &ScoreModel::new(&config))
    }

    #[test]
    fn nothing_forced() {
        let forced = resolve(&[], &[]).unwrap();
        assert!(forced.is_empty());
        assert_eq!(forced.slot_count(ItemSlot::Head), 0);
    }

    #[test]
    fn splits_relic_epic_and_others() {
        let forced = resolve(&[1, 3, 4], &[]).unwrap();
        assert_eq!(forced.relic.map(|c| c.item.id), Some(1));
        assert_eq!(forced.epic.map(|c| c.item.id), Some(3));
        assert_eq!(forced.others.len(), 1);
        assert!(forced.fills(ItemSlot::Neck));
        assert!(!forced.fills(ItemSlot::LeftHand));
    }

    #[test]
    fn missing_items_are_reported() {
        let err = resolve(&[1, 999], &[]).unwrap_err();
        assert!(matches!(err, SolveError::ForcedItemsMissing { ref found, .. } if found == &[1]));
    }

    #[test]
    fn two_relics_rejected() {
        assert_eq!(resolve(&[1, 2], &[]).unwrap_err(), SolveError::MultipleRelics);
    }

    #[test]
    fn two_epics_rejected() {
        assert_eq!(resolve(&[3, 26575], &[]).unwrap_err(), SolveError::MultipleEpics);
    }

    #[test]
    fn nation_items_pull_in_their_partner() {
        let forced = resolve(&[26494], &[]).unwrap();
        assert_eq!(forced.epic.map(|c| c.item.id), Some(26575));

        let forced = resolve(&[26575], &[]).unwrap();
        assert_eq!(forced.relic.map(|c| c.item.id), Some(26494));

        assert_eq!(
            resolve(&[26575, 1], &[]).unwrap_err(),
            SolveError::NationRingWithForeignRelic
        );
    }

    #[test]
    fn overfull_slot_rejected() {
        let err = resolve(&[4, 5], &[]).unwrap_err();
        assert!(matches!(err, SolveError::TooManyForced { slot: ItemSlot::Neck, count: 2, max: 1 }));
    }

    #[test]
    fn names_force_one_item_per_slot() {
        let forced = resolve(&[], &["Twin"]).unwrap();
        assert_eq!(forced.others.len(), 1);
        assert_eq!(forced.slot_count(ItemSlot::LeftHand), 1);
    }

    #[test]
    fn two_handed_blocks_off_hand() {
        let forced = resolve(&[1102], &[]).unwrap();
        let catalog = catalog();
        let dagger = catalog.get(1111).unwrap();
        assert!(!forced.compatible(dagger));
        assert!(forced.compatible(catalog.get(4).unwrap()));
    }
}
