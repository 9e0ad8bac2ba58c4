//! Solve driver.

use std::collections::{BTreeMap, HashSet};

use gear_content::Catalog;
use gear_core::{EquipableItem, ItemSlot, ScoreModel, SolverConfig, StatMinimums, Stats};
use tracing::{debug, info};

use crate::error::SolveError;
use crate::filters::ItemFilter;
use crate::forced::ForcedItems;
use crate::pairs::{RelicEpicPair, build_pairs, nation_pairs, special_candidates};
use crate::pools::{Candidate, SlotPools, bucket_by_slot};
use crate::progress::{NoProgress, ProgressSink};
use crate::search::{SEARCHED_SLOTS, SearchSpace};
use crate::solution::{CandidatePool, Solution};
use crate::topk::{DEFAULT_CAPACITY, TopK};
use crate::weapons::{WeaponPools, WeaponSet};

/// Gear-set solver over a loaded catalog.
///
/// The configuration is validated once in [`Solver::new`] and read-only
/// afterwards. Every solve rebuilds its pools, so one solver can be reused.
#[derive(Clone, Debug)]
pub struct Solver<'a> {
    catalog: &'a Catalog,
    config: SolverConfig,
    model: ScoreModel,
}

/// Pools and pairs derived from the catalog for one solve.
struct Prepared<'p> {
    forced: ForcedItems<'p>,
    pools: SlotPools<'p>,
    weapons: WeaponPools<'p>,
    weapon_sets: Vec<WeaponSet<'p>>,
    pairs: Vec<RelicEpicPair<'p>>,
    /// Major-stat bound taken before depth pruning.
    reach: StatBound,
}

impl<'a> Solver<'a> {
    pub fn new(catalog: &'a Catalog, config: SolverConfig) -> Result<Self, SolveError> {
        config.validate()?;
        let model = ScoreModel::new(&config);
        Ok(Self {
            catalog,
            config,
            model,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    /// Best sets, highest effective mastery first. An empty list means no
    /// set satisfies the constraints.
    pub fn solve(&self) -> Result<Vec<Solution>, SolveError> {
        self.solve_with_progress(NoProgress)
    }

    pub fn solve_with_progress(
        &self,
        mut progress: impl ProgressSink,
    ) -> Result<Vec<Solution>, SolveError> {
        let lwx = self.light_weapon_expert();
        let prepared = self.prepare(lwx.as_ref())?;
        // no set can meet a minimum the unpruned bound misses
        prepared.reach.check(&self.config.stat_minimums())?;

        info!("Considering the options...");
        let space = SearchSpace {
            config: &self.config,
            model: &self.model,
            mins: self.config.stat_minimums(),
            pools: &prepared.pools,
            weapons: &prepared.weapons,
            weapon_sets: &prepared.weapon_sets,
            forced: &prepared.forced,
        };

        let mut top = TopK::new(DEFAULT_CAPACITY);
        let total = prepared.pairs.len();
        let mut evaluated = 0usize;
        for (idx, pair) in prepared.pairs.iter().enumerate() {
            evaluated += space.search_pair(pair, &mut top);
            progress.report(idx + 1, total);
        }
        debug!(pairs = total, evaluated, kept = top.len(), "Search finished");

        Ok(top
            .entries()
            .iter()
            .map(|ranked| Solution::from_ranked(ranked, self.config.locale))
            .collect())
    }

    /// The best set, if any.
    pub fn best(&self) -> Result<Option<Solution>, SolveError> {
        Ok(self.solve()?.into_iter().next())
    }

    /// The pruned search space, without searching it.
    pub fn dry_run(&self) -> Result<CandidatePool, SolveError> {
        let lwx = self.light_weapon_expert();
        let prepared = self.prepare(lwx.as_ref())?;

        let owned = |c: &Candidate<'_>| c.item.clone();
        let mut relics = Vec::new();
        let mut epics = Vec::new();
        for pair in &prepared.pairs {
            relics.extend(pair.relic.as_ref().map(owned));
            epics.extend(pair.epic.as_ref().map(owned));
        }
        let mut seen = HashSet::new();
        relics.retain(|i: &EquipableItem| seen.insert(i.id));
        let mut seen = HashSet::new();
        epics.retain(|i: &EquipableItem| seen.insert(i.id));

        Ok(CandidatePool {
            relics,
            epics,
            forced: prepared.forced.others.iter().map(owned).collect(),
            slots: prepared
                .pools
                .iter()
                .map(|(slot, candidates)| (slot, candidates.iter().map(owned).collect()))
                .collect(),
            weapons: prepared
                .weapon_sets
                .iter()
                .map(|set| set.iter().map(owned).collect())
                .collect(),
        })
    }

    fn light_weapon_expert(&self) -> Option<EquipableItem> {
        self.config
            .light_weapon_expert
            .then(|| EquipableItem::light_weapon_expert(self.config.level))
    }

    fn prepare<'p>(&'p self, lwx: Option<&'p EquipableItem>) -> Result<Prepared<'p>, SolveError> {
        let config = &self.config;
        let filter = ItemFilter::new(config);
        let forced = ForcedItems::resolve(self.catalog, config, &self.model)?;

        info!("Culling items that aren't up to scratch.");
        let candidates = self
            .catalog
            .items()
            .iter()
            .filter(|item| {
                !item.is_relic()
                    && !item.is_epic()
                    && item.slot != ItemSlot::Costume
                    && !forced.contains(item.id)
                    && filter.initial(item)
                    && filter.level(item)
            })
            .map(|item| Candidate::new(item, &self.model));
        let mut buckets = bucket_by_slot(candidates);

        buckets.retain(|&slot, _| !forced.fills(slot));
        let forced_names = forced.other_names(config.locale);
        if let Some(rings) = buckets.get_mut(&ItemSlot::LeftHand) {
            rings.retain(|c| c.item.name(config.locale).is_none_or(|n| !forced_names.contains(n)));
        }
        let mut reach = free_slot_bound(config, &forced, &buckets, lwx);

        let main_hand = buckets.remove(&ItemSlot::FirstWeapon).unwrap_or_default();
        let off_hand = buckets.remove(&ItemSlot::SecondWeapon).unwrap_or_default();
        let mut weapons = WeaponPools::split(main_hand, off_hand, config.skip_shields);
        weapons.prune(config.search_depth, config.exhaustive, config.locale);
        if let Some(lwx) = lwx {
            weapons.push_dagger(Candidate::new(lwx, &self.model));
        }
        let weapon_sets = weapons.candidate_sets(config);

        let mut pools = SlotPools::default();
        for (slot, bucket) in buckets {
            pools.insert(slot, bucket);
        }
        pools.prune(config.search_depth, config.exhaustive, config.locale);

        let relics = special_candidates(
            self.catalog,
            &filter,
            &forced,
            &self.model,
            forced.relic,
            EquipableItem::is_relic,
        );
        let epics = special_candidates(
            self.catalog,
            &filter,
            &forced,
            &self.model,
            forced.epic,
            EquipableItem::is_epic,
        );
        let extra = if forced.relic.is_none() && forced.epic.is_none() {
            nation_pairs(self.catalog, &filter, &self.model)
        } else {
            Vec::new()
        };
        reach.add_pair_bound(&relics, &epics, &extra);
        let pairs = build_pairs(&relics, &epics, extra, config);

        for (slot, pool) in pools.iter() {
            debug!(%slot, candidates = pool.len(), "Pruned pool");
        }
        debug!(
            one_handed = weapons.one_handed.len(),
            two_handed = weapons.two_handed.len(),
            daggers = weapons.daggers.len(),
            shields = weapons.shields.len(),
            sets = weapon_sets.len(),
            "Pruned weapons"
        );
        debug!(relics = relics.len(), epics = epics.len(), pairs = pairs.len(), "Relic/epic pairs");

        Ok(Prepared {
            forced,
            pools,
            weapons,
            weapon_sets,
            pairs,
            reach,
        })
    }
}

/// Best AP, MP, WP and range the free positions, forced items and weapons
/// can add, over the candidates that passed filtering but before depth
/// pruning. A set the bound rules out cannot exist in any pruned pool either.
fn free_slot_bound(
    config: &SolverConfig,
    forced: &ForcedItems<'_>,
    buckets: &BTreeMap<ItemSlot, Vec<Candidate<'_>>>,
    lwx: Option<&EquipableItem>,
) -> StatBound {
    let mut bound = StatBound::baseline(config);
    bound.add(&forced.other_stats());

    let stats_of = |slot: ItemSlot| -> Vec<Stats> {
        buckets
            .get(&slot)
            .map(|bucket| bucket.iter().map(|c| c.item.stats).collect())
            .unwrap_or_default()
    };

    let mut free: BTreeMap<ItemSlot, usize> = BTreeMap::new();
    for slot in SEARCHED_SLOTS {
        *free.entry(slot).or_insert(0) += 1;
    }
    for c in &forced.others {
        if let Some(n) = free.get_mut(&c.item.slot) {
            *n = n.saturating_sub(1);
        }
    }
    for (slot, count) in free {
        bound.add_best(&stats_of(slot), count);
    }

    bound.add_best(&stats_of(ItemSlot::FirstWeapon), 1);
    let mut off_hand = stats_of(ItemSlot::SecondWeapon);
    off_hand.extend(lwx.map(|dagger| dagger.stats));
    bound.add_best(&off_hand, 1);
    bound
}

/// Optimistic upper bound on AP, MP, WP and range.
#[derive(Clone, Copy, Debug, Default)]
struct StatBound {
    ap: i32,
    mp: i32,
    wp: i32,
    ra: i32,
}

impl StatBound {
    fn baseline(config: &SolverConfig) -> Self {
        Self {
            ap: config.base_ap,
            mp: config.base_mp,
            wp: config.base_wp,
            ra: config.base_ra,
        }
    }

    fn add(&mut self, stats: &Stats) {
        self.ap += stats.ap;
        self.mp += stats.mp;
        self.wp += stats.wp;
        self.ra += stats.range;
    }

    /// Adds the best relic and the best epic, nation pairs included.
    fn add_pair_bound(
        &mut self,
        relics: &[Candidate<'_>],
        epics: &[Candidate<'_>],
        extra: &[RelicEpicPair<'_>],
    ) {
        let mut relic_stats: Vec<Stats> = relics.iter().map(|c| c.item.stats).collect();
        let mut epic_stats: Vec<Stats> = epics.iter().map(|c| c.item.stats).collect();
        for pair in extra {
            relic_stats.extend(pair.relic.map(|c| c.item.stats));
            epic_stats.extend(pair.epic.map(|c| c.item.stats));
        }
        self.add_best(&relic_stats, 1);
        self.add_best(&epic_stats, 1);
    }

    /// Adds, per stat, the sum of the `n` largest positive values in `options`.
    fn add_best(&mut self, options: &[Stats], n: usize) {
        let best = |get: fn(&Stats) -> i32| {
            let mut values: Vec<i32> = options.iter().map(get).filter(|&v| v > 0).collect();
            values.sort_unstable_by(|a, b| b.cmp(a));
            values.into_iter().take(n).sum::<i32>()
        };
        self.ap += best(|s| s.ap);
        self.mp += best(|s| s.mp);
        self.wp += best(|s| s.wp);
        self.ra += best(|s| s.range);
    }

    fn check(&self, mins: &StatMinimums) -> Result<(), SolveError> {
        let checks = [
            ("ap", mins.ap, self.ap),
            ("mp", mins.mp, self.mp),
            ("wp", mins.wp, self.wp),
            ("range", mins.ra, self.ra),
        ];
        for (stat, required, available) in checks {
            if available < required {
                return Err(SolveError::ImpossibleStat {
                    stat,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::Rarity;

    #[test]
    fn bound_counts_two_distinct_rings() {
        let rings = [2, 1, 0, -1].map(|ap| Stats {
            ap,
            ..Stats::default()
        });
        let mut bound = StatBound::default();
        bound.add_best(&rings, 2);
        assert_eq!(bound.ap, 3);

        let mut bound = StatBound::default();
        bound.add_best(&rings[3..], 1);
        assert_eq!(bound.ap, 0);
    }

    #[test]
    fn bound_reports_first_missing_stat() {
        let mut mins = StatMinimums::default();
        mins.mp = 4;
        let bound = StatBound { ap: 10, mp: 3, wp: 0, ra: 0 };
        assert_eq!(
            bound.check(&mins),
            Err(SolveError::ImpossibleStat {
                stat: "mp",
                required: 4,
                available: 3
            })
        );
    }

    fn gear(id: u32, item_type: u16, slot: ItemSlot, stats: Stats) -> EquipableItem {
        EquipableItem::new(id, 215, Rarity::Legendary, item_type, slot)
            .with_name(format!("Gear {id}"))
            .with_stats(stats)
    }

    #[test]
    fn ap_items_survive_pruning_under_a_high_ap_minimum() {
        let slots = [
            (119, ItemSlot::Legs),
            (132, ItemSlot::Back),
            (134, ItemSlot::Head),
            (136, ItemSlot::Chest),
            (138, ItemSlot::Shoulders),
            (133, ItemSlot::Belt),
            (120, ItemSlot::Neck),
            (646, ItemSlot::Accessory),
        ];
        let mut items = Vec::new();
        for (n, (item_type, slot)) in (0u32..).zip(slots) {
            let id = 10 * (n + 1);
            items.push(gear(id, item_type, slot, Stats {
                elemental_mastery: 300,
                critical_hit: 1,
                ..Stats::default()
            }));
            items.push(gear(id + 1, item_type, slot, Stats {
                elemental_mastery: 290,
                critical_hit: 2,
                ..Stats::default()
            }));
            items.push(gear(id + 2, item_type, slot, Stats {
                elemental_mastery: 250,
                ap: 1,
                ..Stats::default()
            }));
        }
        items.push(gear(901, 103, ItemSlot::LeftHand, Stats::default()));
        items.push(gear(902, 103, ItemSlot::LeftHand, Stats::default()));
        items.push(gear(903, 101, ItemSlot::FirstWeapon, Stats::default()).two_handed());
        let catalog = Catalog::new(items);

        let mut config = SolverConfig::new();
        config.ap = 8;
        config.mp = 0;
        let solutions = Solver::new(&catalog, config).unwrap().solve().unwrap();
        assert!(!solutions.is_empty());
        for solution in &solutions {
            let ap: i32 = solution.items.iter().map(|i| i.stats.ap).sum();
            assert_eq!(ap, 8);
        }
    }

    #[test]
    fn reach_is_measured_before_pruning() {
        let catalog = Catalog::new(vec![
            gear(1, 134, ItemSlot::Head, Stats { mp: 1, elemental_mastery: 500, ..Stats::default() }),
            gear(2, 134, ItemSlot::Head, Stats {
                mp: 2,
                critical_hit: 1,
                elemental_mastery: 10,
                ..Stats::default()
            }),
        ]);
        let mut config = SolverConfig::new();
        config.search_depth = 1;
        config.ap = 0;
        config.base_mp = 0;

        // depth 1 keeps only the first hat, yet the second one counts
        config.mp = 2;
        let solver = Solver::new(&catalog, config.clone()).unwrap();
        assert_eq!(ids(&solver.dry_run().unwrap().slots[&ItemSlot::Head]), vec![1]);
        assert!(solver.solve().is_ok());

        config.mp = 3;
        let err = Solver::new(&catalog, config).unwrap().solve().unwrap_err();
        assert_eq!(
            err,
            SolveError::ImpossibleStat {
                stat: "mp",
                required: 3,
                available: 2
            }
        );
    }

    fn ids(items: &[EquipableItem]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let catalog = Catalog::default();
        let config = SolverConfig::with_level(31);
        assert!(matches!(Solver::new(&catalog, config), Err(SolveError::Config(_))));
    }

    #[test]
    fn empty_catalog_finds_nothing() {
        let catalog = Catalog::default();
        let mut config = SolverConfig::new();
        config.ap = 0;
        config.mp = 0;
        let solver = Solver::new(&catalog, config).unwrap();
        assert!(solver.solve().unwrap().is_empty());
        assert!(solver.dry_run().unwrap().unique_items().is_empty());
    }
}
