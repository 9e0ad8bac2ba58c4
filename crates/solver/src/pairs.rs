//! Relic/epic pair enumeration.

use std::collections::HashSet;

use gear_content::Catalog;
use gear_core::{EquipableItem, ItemSlot, ScoreModel, SimKey, SolverConfig};

use crate::filters::{ItemFilter, NATION_RELIC_EPIC_IDS, is_nation_item};
use crate::forced::ForcedItems;
use crate::pools::Candidate;

/// At most one relic and one epic, either of which may be absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RelicEpicPair<'a> {
    pub relic: Option<Candidate<'a>>,
    pub epic: Option<Candidate<'a>>,
}

impl<'a> RelicEpicPair<'a> {
    pub fn new(relic: Option<Candidate<'a>>, epic: Option<Candidate<'a>>) -> Self {
        Self { relic, epic }
    }

    pub fn items(&self) -> impl Iterator<Item = Candidate<'a>> {
        self.relic.into_iter().chain(self.epic)
    }

    pub fn initial(&self) -> f64 {
        self.items().map(|c| c.initial).sum()
    }

    pub fn score(&self) -> f64 {
        self.items().map(|c| c.score).sum()
    }

    pub fn sim_key(&self) -> SimKey {
        self.items().map(|c| c.sim_key()).sum()
    }

    fn disables_second_weapon(&self) -> bool {
        self.items().any(|c| c.item.disables_second_weapon)
    }

    /// Summed [`SimKey`], sorted slot names and two-handedness.
    fn dedupe_key(&self) -> (SimKey, String, bool) {
        let mut slots: Vec<&str> = self.items().map(|c| c.item.slot.as_ref()).collect();
        slots.sort_unstable();
        (self.sim_key(), slots.join("-"), self.disables_second_weapon())
    }

    /// Rejects pairs sharing a non-ring slot and pairs where one side's
    /// two-hander collides with the other side's off-hand.
    pub fn is_wearable(&self) -> bool {
        let (Some(relic), Some(epic)) = (self.relic, self.epic) else {
            return true;
        };
        let (r, e) = (relic.item, epic.item);
        if r.slot == e.slot && r.slot != ItemSlot::LeftHand {
            return false;
        }
        !(r.disables_second_weapon && e.slot == ItemSlot::SecondWeapon
            || e.disables_second_weapon && r.slot == ItemSlot::SecondWeapon)
    }
}

/// Relic or epic candidates in best-first order, one per
/// `(slot, two-handed, SimKey)`.
///
/// A forced item replaces the whole list. Nation items are left to
/// [`nation_pairs`].
pub fn special_candidates<'a>(
    catalog: &'a Catalog,
    filter: &ItemFilter<'_>,
    forced: &ForcedItems<'a>,
    model: &ScoreModel,
    forced_item: Option<Candidate<'a>>,
    is_kind: fn(&EquipableItem) -> bool,
) -> Vec<Candidate<'a>> {
    if let Some(item) = forced_item {
        return vec![item];
    }

    let mut candidates: Vec<Candidate<'a>> = catalog
        .items()
        .iter()
        .filter(|item| {
            is_kind(item)
                && filter.initial(item)
                && filter.relic_epic_level(item)
                && !is_nation_item(item.id)
                && forced.compatible(item)
        })
        .map(|item| Candidate::new(item, model))
        .collect();
    candidates.sort_by(|a, b| b.initial.total_cmp(&a.initial));

    let mut seen = HashSet::new();
    candidates.retain(|c| {
        seen.insert((c.item.slot, c.item.disables_second_weapon, c.sim_key()))
    });
    candidates
}

/// The four nation sword/ring pairs, when the level window spans their
/// bracket and both halves pass the initial filter.
pub fn nation_pairs<'a>(
    catalog: &'a Catalog,
    filter: &ItemFilter<'_>,
    model: &ScoreModel,
) -> Vec<RelicEpicPair<'a>> {
    if !filter.spans_nation_bracket() {
        return Vec::new();
    }
    let (swords, rings) = NATION_RELIC_EPIC_IDS.split_at(4);
    swords
        .iter()
        .zip(rings)
        .filter_map(|(&sword_id, &ring_id)| {
            let sword = catalog.get(sword_id).filter(|i| filter.initial(i))?;
            let ring = catalog.get(ring_id).filter(|i| filter.initial(i))?;
            Some(RelicEpicPair::new(
                Some(Candidate::new(sword, model)),
                Some(Candidate::new(ring, model)),
            ))
        })
        .collect()
}

/// Cartesian product of relics and epics plus `extra`, wearable pairs only,
/// best combined initial key first and deduplicated.
///
/// An empty side contributes a single `None`, so the product is never empty.
pub fn build_pairs<'a>(
    relics: &[Candidate<'a>],
    epics: &[Candidate<'a>],
    extra: Vec<RelicEpicPair<'a>>,
    config: &SolverConfig,
) -> Vec<RelicEpicPair<'a>> {
    let relic_options: Vec<Option<Candidate<'a>>> = if relics.is_empty() {
        vec![None]
    } else {
        relics.iter().copied().map(Some).collect()
    };
    let epic_options: Vec<Option<Candidate<'a>>> = if epics.is_empty() {
        vec![None]
    } else {
        epics.iter().copied().map(Some).collect()
    };

    let mut pairs: Vec<RelicEpicPair<'a>> = relic_options
        .iter()
        .flat_map(|&relic| epic_options.iter().map(move |&epic| RelicEpicPair::new(relic, epic)))
        .chain(extra)
        .filter(RelicEpicPair::is_wearable)
        .collect();
    pairs.sort_by(|a, b| b.initial().total_cmp(&a.initial()));

    let mut seen = HashSet::new();
    pairs.retain(|pair| seen.insert(pair.dedupe_key()));

    if !config.exhaustive {
        pairs.truncate(2 * config.hard_cap_depth);
    }
    pairs
}
