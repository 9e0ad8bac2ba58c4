//! Weapon pools and weapon-set expansion.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use gear_core::{ItemSlot, Locale, SimKey, SolverConfig};

use crate::pools::{Candidate, PruneLimits, prune_bucket, sort_candidates};

/// One weapon choice: a two-hander, a main hand with its off-hand, or a
/// single hand when the other one is already taken.
pub type WeaponSet<'a> = ArrayVec<Candidate<'a>, 2>;

/// Summed initial key of a weapon set.
pub fn set_initial(set: &WeaponSet<'_>) -> f64 {
    set.iter().map(|c| c.initial).sum()
}

fn set_key(set: &WeaponSet<'_>) -> (usize, SimKey) {
    (set.len(), set.iter().map(Candidate::sim_key).sum())
}

fn single<'a>(candidate: Candidate<'a>) -> WeaponSet<'a> {
    let mut set = WeaponSet::new();
    set.push(candidate);
    set
}

/// Sorts best first and keeps one set per `(len, summed SimKey)`.
fn dedupe_sets(sets: &mut Vec<WeaponSet<'_>>) {
    sets.sort_by(|a, b| set_initial(b).total_cmp(&set_initial(a)));
    let mut seen = HashSet::new();
    sets.retain(|set| seen.insert(set_key(set)));
}

/// First- and second-weapon candidates split by handedness and kind.
#[derive(Clone, Debug, Default)]
pub struct WeaponPools<'a> {
    pub one_handed: Vec<Candidate<'a>>,
    pub two_handed: Vec<Candidate<'a>>,
    pub daggers: Vec<Candidate<'a>>,
    /// Empty when shields are skipped.
    pub shields: Vec<Candidate<'a>>,
}

impl<'a> WeaponPools<'a> {
    pub fn split(
        main_hand: Vec<Candidate<'a>>,
        off_hand: Vec<Candidate<'a>>,
        skip_shields: bool,
    ) -> Self {
        let (two_handed, one_handed): (Vec<_>, Vec<_>) = main_hand
            .into_iter()
            .partition(|c| c.item.disables_second_weapon);
        let daggers: Vec<_> = off_hand.iter().copied().filter(|c| c.item.is_dagger()).collect();
        let shields = if skip_shields {
            Vec::new()
        } else {
            off_hand.into_iter().filter(|c| c.item.is_shield()).collect()
        };
        Self {
            one_handed,
            two_handed,
            daggers,
            shields,
        }
    }

    /// Prunes each list on its own, with the limits of its position.
    pub fn prune(&mut self, search_depth: usize, exhaustive: bool, locale: Locale) {
        let main = PruneLimits::for_slot(ItemSlot::FirstWeapon, search_depth, exhaustive);
        let off = PruneLimits::for_slot(ItemSlot::SecondWeapon, search_depth, exhaustive);
        prune_bucket(&mut self.one_handed, main, locale);
        prune_bucket(&mut self.two_handed, main, locale);
        prune_bucket(&mut self.daggers, off, locale);
        prune_bucket(&mut self.shields, off, locale);
    }

    /// Adds a dagger after pruning, so it always stays available.
    pub fn push_dagger(&mut self, dagger: Candidate<'a>) {
        self.daggers.push(dagger);
    }

    pub fn off_hands(&self) -> impl Iterator<Item = Candidate<'a>> + '_ {
        self.daggers.iter().chain(&self.shields).copied()
    }

    /// Full weapon sets for pairs that leave both hands free.
    ///
    /// Two-handed wield mode keeps only two-handers; skipping two-handed
    /// weapons keeps only main hand plus off-hand. One-handers are offered
    /// alone when no off-hand survived.
    pub fn candidate_sets(&self, config: &SolverConfig) -> Vec<WeaponSet<'a>> {
        let mut sets: Vec<WeaponSet<'a>> = Vec::new();
        if !config.skip_two_handed {
            sets.extend(self.two_handed.iter().copied().map(single));
        }
        if !config.wield_two_handed {
            let off_hands: Vec<Candidate<'a>> = self.off_hands().collect();
            for &main in &self.one_handed {
                if off_hands.is_empty() {
                    sets.push(single(main));
                }
                for &off in &off_hands {
                    let mut set = WeaponSet::new();
                    set.push(main);
                    set.push(off);
                    sets.push(set);
                }
            }
        }

        dedupe_sets(&mut sets);
        if !config.exhaustive {
            sets.truncate(config.hard_cap_depth);
        }
        sets
    }

    /// Off-hand singletons, for pairs that take the main hand.
    pub fn off_hand_singletons(&self) -> Vec<WeaponSet<'a>> {
        Self::singletons(self.off_hands().collect())
    }

    /// One-handed singletons, for pairs that take the off-hand.
    pub fn one_handed_singletons(&self) -> Vec<WeaponSet<'a>> {
        Self::singletons(self.one_handed.clone())
    }

    /// One set per distinct `(ap, mp, range, wp)`, best score first.
    fn singletons(mut candidates: Vec<Candidate<'a>>) -> Vec<WeaponSet<'a>> {
        sort_candidates(&mut candidates);
        let mut seen = HashSet::new();
        candidates.retain(|c| {
            let s = &c.item.stats;
            seen.insert((s.ap, s.mp, s.range, s.wp))
        });
        let mut sets: Vec<WeaponSet<'a>> = candidates.into_iter().map(single).collect();
        dedupe_sets(&mut sets);
        sets
    }

    pub fn is_empty(&self) -> bool {
        self.one_handed.is_empty()
            && self.two_handed.is_empty()
            && self.daggers.is_empty()
            && self.shields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{
        DAGGER_TYPE_ID, EquipableItem, Rarity, SHIELD_TYPE_ID, ScoreModel, Stats,
    };

    fn weapon(id: u32, item_type: u16, slot: ItemSlot, stats: Stats) -> EquipableItem {
        EquipableItem::new(id, 215, Rarity::Legendary, item_type, slot)
            .with_name(format!("Weapon {id}"))
            .with_stats(stats)
    }

    fn em(value: i32) -> Stats {
        Stats {
            elemental_mastery: value,
            ..Stats::default()
        }
    }

    fn fixture() -> Vec<EquipableItem> {
        vec![
            weapon(1, 110, ItemSlot::FirstWeapon, Stats { ap: 1, ..em(300) }),
            weapon(2, 101, ItemSlot::FirstWeapon, Stats { ap: 2, ..em(550) }).two_handed(),
            weapon(3, DAGGER_TYPE_ID, ItemSlot::SecondWeapon, Stats { critical_hit: 2, ..em(150) }),
            weapon(4, SHIELD_TYPE_ID, ItemSlot::SecondWeapon, Stats { hp: 500, ..em(50) }),
        ]
    }

    fn build<'a>(items: &'a [EquipableItem], skip_shields: bool) -> WeaponPools<'a> {
        let model = ScoreModel::new(&SolverConfig::new());
        let (main, off): (Vec<_>, Vec<_>) = items
            .iter()
            .map(|i| Candidate::new(i, &model))
            .partition(|c| c.item.slot == ItemSlot::FirstWeapon);
        WeaponPools::split(main, off, skip_shields)
    }

    fn ids(sets: &[WeaponSet<'_>]) -> Vec<Vec<u32>> {
        sets.iter()
            .map(|s| s.iter().map(|c| c.item.id).collect())
            .collect()
    }

    #[test]
    fn split_by_handedness_and_kind() {
        let items = fixture();
        let pools = build(&items, true);
        assert_eq!(pools.one_handed.len(), 1);
        assert_eq!(pools.two_handed.len(), 1);
        assert_eq!(pools.daggers.len(), 1);
        assert!(pools.shields.is_empty());
        assert_eq!(build(&items, false).shields.len(), 1);
    }

    #[test]
    fn candidate_sets_follow_wield_modes() {
        let items = fixture();
        let pools = build(&items, false);

        let mut config = SolverConfig::new();
        assert_eq!(ids(&pools.candidate_sets(&config)), vec![vec![2], vec![1, 3], vec![1, 4]]);

        config.wield_two_handed = true;
        assert_eq!(ids(&pools.candidate_sets(&config)), vec![vec![2]]);

        config.wield_two_handed = false;
        config.skip_two_handed = true;
        assert_eq!(ids(&pools.candidate_sets(&config)), vec![vec![1, 3], vec![1, 4]]);

        config.skip_two_handed = false;
        config.hard_cap_depth = 1;
        assert_eq!(pools.candidate_sets(&config).len(), 1);
    }

    #[test]
    fn one_handers_stand_alone_without_off_hands() {
        let items: Vec<EquipableItem> = fixture().into_iter().take(2).collect();
        let pools = build(&items, true);
        let sets = pools.candidate_sets(&SolverConfig::new());
        assert_eq!(ids(&sets), vec![vec![2], vec![1]]);
    }

    #[test]
    fn singletons_for_half_taken_hands() {
        let items = fixture();
        let pools = build(&items, false);
        assert_eq!(ids(&pools.off_hand_singletons()), vec![vec![3]]);
        assert_eq!(ids(&pools.one_handed_singletons()), vec![vec![1]]);
    }
}
