//! Per-pair combinatorial search.
//!
//! For one relic/epic pair, every free position contributes a group of
//! choices. The Cartesian product of the groups is walked with an odometer;
//! each combination is checked against the hard minimums, scored, and
//! offered to the top-K list.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use arrayvec::ArrayVec;
use gear_core::{
    ClassName, EquipableItem, ItemSlot, ScoreModel, SetTotals, SolverConfig, StatMinimums, Stats,
    effective_mastery,
};
use tracing::debug;

use crate::forced::ForcedItems;
use crate::pairs::RelicEpicPair;
use crate::pools::{Candidate, SlotPools};
use crate::topk::TopK;
use crate::weapons::{WeaponPools, WeaponSet};

/// Positions filled for every pair, before relic, epic and forced items take
/// theirs. Rings appear twice; weapons are handled apart.
pub const SEARCHED_SLOTS: [ItemSlot; 12] = [
    ItemSlot::Legs,
    ItemSlot::Back,
    ItemSlot::Head,
    ItemSlot::Chest,
    ItemSlot::Shoulders,
    ItemSlot::Belt,
    ItemSlot::LeftHand,
    ItemSlot::LeftHand,
    ItemSlot::Neck,
    ItemSlot::Accessory,
    ItemSlot::Pet,
    ItemSlot::Mount,
];

/// Positions a set may leave empty when nothing is available for them.
const OPTIONAL_SLOTS: [ItemSlot; 3] = [ItemSlot::Accessory, ItemSlot::Pet, ItemSlot::Mount];

/// Running sums of everything a set is judged on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Totals {
    ap: i32,
    mp: i32,
    wp: i32,
    ra: i32,
    crit: i32,
    crit_mastery: i32,
    score: f64,
}

impl Totals {
    /// Base stats; base mastery is scored like item mastery.
    fn baseline(config: &SolverConfig, model: &ScoreModel) -> Self {
        let base_mastery = Stats {
            elemental_mastery: config.base_mastery,
            ..Stats::default()
        };
        Self {
            ap: config.base_ap,
            mp: config.base_mp,
            wp: config.base_wp,
            ra: config.base_ra,
            crit: config.base_crit,
            crit_mastery: config.base_crit_mastery,
            score: model.item_score(&base_mastery),
        }
    }

    fn of(item: &EquipableItem, score: f64) -> Self {
        let stats = &item.stats;
        Self {
            ap: stats.ap,
            mp: stats.mp,
            wp: stats.wp,
            ra: stats.range,
            crit: stats.critical_hit,
            crit_mastery: stats.critical_mastery,
            score,
        }
    }

    fn meets(&self, mins: &StatMinimums) -> bool {
        self.ap >= mins.ap
            && self.mp >= mins.mp
            && self.wp >= mins.wp
            && self.ra >= mins.ra
            && self.crit >= mins.crit
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.ap += rhs.ap;
        self.mp += rhs.mp;
        self.wp += rhs.wp;
        self.ra += rhs.ra;
        self.crit += rhs.crit;
        self.crit_mastery += rhs.crit_mastery;
        self.score += rhs.score;
    }
}

/// One pick for one group: a single item, two rings, or a weapon set.
#[derive(Clone, Debug)]
struct Choice<'p> {
    items: ArrayVec<&'p EquipableItem, 2>,
    totals: Totals,
}

impl<'p> Choice<'p> {
    fn of(candidates: impl IntoIterator<Item = Candidate<'p>>) -> Self {
        let mut items = ArrayVec::new();
        let mut totals = Totals::default();
        for c in candidates {
            items.push(c.item);
            totals += Totals::of(c.item, c.score);
        }
        Self { items, totals }
    }
}

/// Scores a finished set; `None` when it misses a hard minimum.
fn evaluate(config: &SolverConfig, mins: &StatMinimums, totals: &Totals) -> Option<f64> {
    if !totals.meets(mins) {
        return None;
    }
    let crit_chance = totals.crit + SolverConfig::ENGINE_CRIT_CHANCE;
    let final_damage = if config.class == Some(ClassName::Ecaflip) && crit_chance > 100 {
        0.5 * f64::from(crit_chance - 100)
    } else {
        0.0
    };
    let unraveling = config.unraveling && crit_chance >= SolverConfig::UNRAVELING_CRIT_FLOOR;

    Some(effective_mastery(
        SetTotals {
            relevant_mastery: totals.score,
            crit_mastery: f64::from(totals.crit_mastery),
            crit_chance: f64::from(crit_chance),
            final_damage,
        },
        unraveling,
    ))
}

/// Effective mastery of an arbitrary set under `config`, or `None` when the
/// set misses a hard minimum.
pub fn score_set<'i>(
    config: &SolverConfig,
    model: &ScoreModel,
    items: impl IntoIterator<Item = &'i EquipableItem>,
) -> Option<f64> {
    let mut totals = Totals::baseline(config, model);
    for item in items {
        totals += Totals::of(item, model.item_score(&item.stats));
    }
    evaluate(config, &config.stat_minimums(), &totals)
}

/// Everything the per-pair search reads. Built once per solve.
pub(crate) struct SearchSpace<'p, 'c> {
    pub config: &'c SolverConfig,
    pub model: &'c ScoreModel,
    pub mins: StatMinimums,
    pub pools: &'c SlotPools<'p>,
    pub weapons: &'c WeaponPools<'p>,
    pub weapon_sets: &'c [WeaponSet<'p>],
    pub forced: &'c ForcedItems<'p>,
}

impl<'p> SearchSpace<'p, '_> {
    /// Searches every set built around `pair`. Returns how many complete
    /// combinations were evaluated.
    pub fn search_pair(&self, pair: &RelicEpicPair<'p>, top: &mut TopK<'p>) -> usize {
        let fixed: Vec<Candidate<'p>> = pair
            .items()
            .chain(self.forced.others.iter().copied())
            .collect();

        let mut occupied: BTreeMap<ItemSlot, usize> = BTreeMap::new();
        for c in &fixed {
            *occupied.entry(c.item.slot).or_insert(0) += 1;
            if c.item.slot == ItemSlot::FirstWeapon && c.item.disables_second_weapon {
                *occupied.entry(ItemSlot::SecondWeapon).or_insert(0) += 1;
            }
        }
        if let Some((slot, count)) = occupied.iter().find(|(slot, count)| **count > slot.capacity()) {
            debug!(%slot, count, "Pair collides with forced items");
            return 0;
        }

        let mut remaining: Vec<ItemSlot> = SEARCHED_SLOTS.to_vec();
        for c in &fixed {
            if let Some(pos) = remaining.iter().position(|&s| s == c.item.slot) {
                remaining.remove(pos);
            }
        }
        remaining.retain(|&s| !OPTIONAL_SLOTS.contains(&s) || !self.pools.get(s).is_empty());

        let main_taken = occupied.contains_key(&ItemSlot::FirstWeapon);
        let off_taken = occupied.contains_key(&ItemSlot::SecondWeapon);
        let singletons;
        let weapons: Option<&[WeaponSet<'p>]> = match (main_taken, off_taken) {
            (true, true) => None,
            (true, false) | (false, true) if self.config.wield_two_handed => {
                debug!("Pair holds a one-handed weapon under two-handed wield");
                return 0;
            }
            (true, false) => {
                singletons = self.weapons.off_hand_singletons();
                Some(singletons.as_slice())
            }
            (false, true) => {
                singletons = self.weapons.one_handed_singletons();
                Some(singletons.as_slice())
            }
            (false, false) => Some(self.weapon_sets),
        };
        if weapons.is_some_and(|sets| sets.is_empty()) {
            debug!("No weapon fits this pair");
            return 0;
        }

        let Some(groups) = self.groups(&fixed, &remaining, weapons) else {
            return 0;
        };

        let mut base = Totals::baseline(self.config, self.model);
        for c in &fixed {
            base += Totals::of(c.item, c.score);
        }
        self.walk(&fixed, &groups, base, top)
    }

    /// Choice groups for the free positions, or `None` when one of them has
    /// nothing left to offer.
    fn groups(
        &self,
        fixed: &[Candidate<'p>],
        remaining: &[ItemSlot],
        weapons: Option<&[WeaponSet<'p>]>,
    ) -> Option<Vec<Vec<Choice<'p>>>> {
        let mut groups: Vec<Vec<Choice<'p>>> = Vec::with_capacity(remaining.len());

        let ring_slots = remaining.iter().filter(|&&s| s == ItemSlot::LeftHand).count();
        if ring_slots > 0 {
            let worn: Vec<u32> = fixed
                .iter()
                .filter(|c| c.item.slot == ItemSlot::LeftHand)
                .map(|c| c.item.id)
                .collect();
            let rings: Vec<Candidate<'p>> = self
                .pools
                .get(ItemSlot::LeftHand)
                .iter()
                .filter(|c| !worn.contains(&c.item.id))
                .copied()
                .collect();
            let choices: Vec<Choice<'p>> = if ring_slots == 2 {
                ring_pairs(&rings)
            } else {
                rings.iter().map(|&c| Choice::of([c])).collect()
            };
            if choices.is_empty() {
                debug!("Constraints may have removed too many items slot: LEFT_HAND");
                return None;
            }
            groups.push(choices);
        }

        for &slot in remaining.iter().filter(|&&s| s != ItemSlot::LeftHand) {
            let pool = self.pools.get(slot);
            if pool.is_empty() {
                debug!(%slot, "Constraints may have removed too many items");
                return None;
            }
            groups.push(pool.iter().map(|&c| Choice::of([c])).collect());
        }

        if let Some(sets) = weapons {
            groups.push(sets.iter().map(|set| Choice::of(set.iter().copied())).collect());
        }
        Some(groups)
    }

    /// Odometer walk over the product of `groups`.
    fn walk(
        &self,
        fixed: &[Candidate<'p>],
        groups: &[Vec<Choice<'p>>],
        base: Totals,
        top: &mut TopK<'p>,
    ) -> usize {
        let mut odometer = vec![0usize; groups.len()];
        let mut evaluated = 0;

        loop {
            let mut totals = base;
            for (group, &pick) in groups.iter().zip(&odometer) {
                totals += group[pick].totals;
            }
            evaluated += 1;

            if let Some(score) = evaluate(self.config, &self.mins, &totals) {
                top.offer(score, || {
                    fixed
                        .iter()
                        .map(|c| c.item)
                        .chain(
                            groups
                                .iter()
                                .zip(&odometer)
                                .flat_map(|(group, &pick)| group[pick].items.iter().copied()),
                        )
                        .collect()
                });
            }

            let mut wheel = groups.len();
            loop {
                if wheel == 0 {
                    return evaluated;
                }
                wheel -= 1;
                odometer[wheel] += 1;
                if odometer[wheel] < groups[wheel].len() {
                    break;
                }
                odometer[wheel] = 0;
            }
        }
    }
}

/// Unordered pairs of distinct rings.
fn ring_pairs<'p>(rings: &[Candidate<'p>]) -> Vec<Choice<'p>> {
    let mut pairs = Vec::with_capacity(rings.len() * rings.len().saturating_sub(1) / 2);
    for (i, &first) in rings.iter().enumerate() {
        for &second in &rings[i + 1..] {
            if first.item.id != second.item.id {
                pairs.push(Choice::of([first, second]));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::Rarity;

    fn item(id: u32, slot: ItemSlot, stats: Stats) -> EquipableItem {
        EquipableItem::new(id, 215, Rarity::Legendary, 0, slot)
            .with_name(format!("Item {id}"))
            .with_stats(stats)
    }

    #[test]
    fn ring_pairs_are_unordered_and_distinct() {
        let config = SolverConfig::new();
        let model = ScoreModel::new(&config);
        let items: Vec<EquipableItem> = (1..=4)
            .map(|id| item(id, ItemSlot::LeftHand, Stats::default()))
            .collect();
        let rings: Vec<Candidate<'_>> = items.iter().map(|i| Candidate::new(i, &model)).collect();
        let pairs = ring_pairs(&rings);
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|p| p.items[0].id < p.items[1].id));
    }

    #[test]
    fn minimums_are_hard_filters() {
        let mut config = SolverConfig::new();
        config.ap = 2;
        config.mp = 0;
        let model = ScoreModel::new(&config);
        let hat = item(1, ItemSlot::Head, Stats { ap: 1, elemental_mastery: 100, ..Stats::default() });
        let cape = item(2, ItemSlot::Back, Stats { ap: 1, elemental_mastery: 100, ..Stats::default() });

        assert_eq!(score_set(&config, &model, [&hat]), None);
        let score = score_set(&config, &model, [&hat, &cape]).unwrap();
        // 3% base crit chance
        let expected = 200.0 * 0.97 + 200.0 * 3.0 / 80.0;
        assert!((score - expected).abs() < 1e-9);

        config.base_ap = 1;
        assert!(score_set(&config, &model, [&hat]).is_some());
    }

    #[test]
    fn crit_floor_is_enforced() {
        let mut config = SolverConfig::new();
        config.ap = 0;
        config.mp = 0;
        config.min_crit = 20;
        let model = ScoreModel::new(&config);
        let low = item(1, ItemSlot::Head, Stats { critical_hit: 19, ..Stats::default() });
        let high = item(2, ItemSlot::Head, Stats { critical_hit: 20, ..Stats::default() });
        assert_eq!(score_set(&config, &model, [&low]), None);
        assert!(score_set(&config, &model, [&high]).is_some());
    }

    #[test]
    fn ecaflip_turns_excess_crit_into_final_damage() {
        let mut config = SolverConfig::new();
        config.ap = 0;
        config.mp = 0;
        let model = ScoreModel::new(&config);
        let gear = item(
            1,
            ItemSlot::Head,
            Stats { critical_hit: 117, elemental_mastery: 800, ..Stats::default() },
        );

        let plain = score_set(&config, &model, [&gear]).unwrap();
        assert!((plain - 800.0 * 1.25).abs() < 1e-9);

        config.class = Some(ClassName::Ecaflip);
        let ecaflip = score_set(&config, &model, [&gear]).unwrap();
        // 120% crit chance: 20 points over the cap give 10% final damage
        assert!((ecaflip - 800.0 * 1.25 * 1.1).abs() < 1e-9);

        let capped = item(
            2,
            ItemSlot::Head,
            Stats { critical_hit: 97, elemental_mastery: 800, ..Stats::default() },
        );
        let at_cap = score_set(&config, &model, [&capped]).unwrap();
        assert!((at_cap - plain).abs() < 1e-9);
    }

    #[test]
    fn base_mastery_takes_the_class_modifier() {
        let mut config = SolverConfig::new();
        config.ap = 0;
        config.mp = 0;
        config.base_mastery = 100;
        let plain = score_set(&config, &ScoreModel::new(&config), std::iter::empty()).unwrap();

        config.class = Some(ClassName::Huppermage);
        let hupper = score_set(&config, &ScoreModel::new(&config), std::iter::empty()).unwrap();
        assert!((hupper - plain * 1.2).abs() < 1e-9);
    }
}
