//! Relevant-mastery keys and the crit-weighted effective mastery formula.
//!
//! Two layers:
//!
//! 1. [`ScoreModel::item_score`] turns one stat vector into the scalar
//!    "relevant mastery" the user optimizes for. Scores are additive across
//!    items, so a set's relevant mastery is the sum of its items' scores.
//! 2. [`effective_mastery`] folds relevant mastery, crit mastery and crit
//!    chance of a complete set into the final score.

use crate::class::{ClassName, Elements};
use crate::config::{NegativePolicy, SolverConfig};
use crate::stats::Stats;

/// Scoring preferences extracted from a [`SolverConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreModel {
    melee: bool,
    distance: bool,
    berserk: bool,
    rear: bool,
    heal: bool,
    num_mastery: u8,
    elements: Elements,
    negative_berserk: NegativePolicy,
    negative_rear: NegativePolicy,
    elemental_modifier: f64,
    /// Weight of one point of crit mastery in the initial ordering.
    crit_weight: f64,
}

impl ScoreModel {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            melee: config.melee,
            distance: config.distance,
            berserk: config.berserk,
            rear: config.rear,
            heal: config.heal,
            num_mastery: config.num_mastery,
            elements: config.elements,
            negative_berserk: config.negative_berserk,
            negative_rear: config.negative_rear,
            elemental_modifier: ClassName::elemental_modifier(config.class),
            crit_weight: f64::from((config.base_crit_mastery + 20).min(100)) / 100.0,
        }
    }

    /// Relevant mastery contributed by `stats`.
    pub fn item_score(&self, stats: &Stats) -> f64 {
        let modifier = self.elemental_modifier;
        let mut score = f64::from(stats.elemental_mastery) * modifier;

        if self.melee {
            score += f64::from(stats.melee_mastery);
        }
        if self.distance {
            score += f64::from(stats.distance_mastery);
        }
        score += toggled(self.berserk, stats.berserk_mastery, self.negative_berserk);
        score += toggled(self.rear, stats.rear_mastery, self.negative_rear);
        if self.heal {
            score += f64::from(stats.healing_mastery);
        }

        if self.num_mastery == 1 {
            score += f64::from(stats.mastery_1_element) * modifier;
        }
        if self.num_mastery <= 2 {
            score += f64::from(stats.mastery_2_elements) * modifier;
        }
        if self.num_mastery <= 3 {
            score += f64::from(stats.mastery_3_elements) * modifier;
        }

        let selected = self.elements.bits().count_ones();
        if selected > 0 {
            let mut element_sum = 0;
            if self.elements.contains(Elements::AIR) {
                element_sum += stats.air_mastery;
            }
            if self.elements.contains(Elements::EARTH) {
                element_sum += stats.earth_mastery;
            }
            if self.elements.contains(Elements::WATER) {
                element_sum += stats.water_mastery;
            }
            if self.elements.contains(Elements::FIRE) {
                element_sum += stats.fire_mastery;
            }
            score += f64::from(element_sum) / f64::from(selected) * modifier;
        }

        score
    }

    /// First-pass ordering key.
    ///
    /// Rewards AP+MP and WP+Range on top of relevant mastery so that items
    /// carrying major stats are not pruned before the hard constraints are
    /// checked.
    pub fn initial_score(&self, stats: &Stats) -> f64 {
        self.item_score(stats)
            + 100.0 * f64::from((stats.ap + stats.mp).max(0))
            + 50.0 * f64::from((stats.wp + stats.range).max(0))
            + f64::from(stats.critical_mastery) * self.crit_weight
    }
}

/// Positive values always count while the damage type is optimized. Otherwise
/// only negative values count, scaled by the policy.
fn toggled(enabled: bool, value: i32, policy: NegativePolicy) -> f64 {
    if enabled {
        f64::from(value)
    } else if value < 0 {
        f64::from(value) * policy.multiplier()
    } else {
        0.0
    }
}

/// Aggregate of a complete set, as consumed by [`effective_mastery`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SetTotals {
    /// Sum of item scores plus the configured base mastery.
    pub relevant_mastery: f64,
    /// Crit mastery of all items plus the configured base.
    pub crit_mastery: f64,
    /// Crit chance in percent; clamped to `[0, 100]` by the formula.
    pub crit_chance: f64,
    /// Final damage percentage.
    pub final_damage: f64,
}

/// Crit-weighted effective mastery.
///
/// `score = ((m + u) * (100 - c) / 100 + (m + cm) * c / 80) * (1 + fd / 100)`
///
/// where `u` is the crit mastery when unraveling is active and `c` the crit
/// chance. The `/ 80` combines the 1.25× crit damage bonus with the percent
/// scale. Final damage scales hits with and without crit alike.
pub fn effective_mastery(totals: SetTotals, unraveling: bool) -> f64 {
    let crit_chance = totals.crit_chance.clamp(0.0, 100.0);
    let mastery = totals.relevant_mastery;
    let non_crit_base = mastery + if unraveling { totals.crit_mastery } else { 0.0 };
    let fd_multiplier = 1.0 + totals.final_damage / 100.0;

    (non_crit_base * ((100.0 - crit_chance) / 100.0)
        + (mastery + totals.crit_mastery) * (crit_chance / 80.0))
        * fd_multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(f: impl FnOnce(&mut SolverConfig)) -> ScoreModel {
        let mut config = SolverConfig::new();
        f(&mut config);
        ScoreModel::new(&config)
    }

    #[test]
    fn zero_crit_reduces_to_mastery_times_fd() {
        let totals = SetTotals {
            relevant_mastery: 1200.0,
            crit_mastery: 300.0,
            crit_chance: 0.0,
            final_damage: 10.0,
        };
        let score = effective_mastery(totals, false);
        assert!((score - 1200.0 * 1.1).abs() < 1e-9);

        let unravel = effective_mastery(totals, true);
        assert!((unravel - 1500.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn full_crit_reduces_to_crit_term() {
        let totals = SetTotals {
            relevant_mastery: 1200.0,
            crit_mastery: 300.0,
            crit_chance: 100.0,
            final_damage: 0.0,
        };
        let score = effective_mastery(totals, false);
        assert!((score - 1500.0 * 1.25).abs() < 1e-9);

        let boosted = effective_mastery(SetTotals { final_damage: 20.0, ..totals }, false);
        assert!((boosted - 1500.0 * 1.25 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn crit_chance_is_clamped() {
        let over = SetTotals {
            relevant_mastery: 100.0,
            crit_mastery: 0.0,
            crit_chance: 140.0,
            final_damage: 0.0,
        };
        let capped = SetTotals { crit_chance: 100.0, ..over };
        assert_eq!(effective_mastery(over, false), effective_mastery(capped, false));
    }

    #[test]
    fn item_score_respects_toggles() {
        let stats = Stats {
            elemental_mastery: 100,
            melee_mastery: 50,
            distance_mastery: 70,
            mastery_3_elements: 30,
            mastery_2_elements: 20,
            mastery_1_element: 10,
            ..Stats::default()
        };

        assert_eq!(model(|_| {}).item_score(&stats), 130.0);
        assert_eq!(model(|c| c.melee = true).item_score(&stats), 180.0);
        assert_eq!(model(|c| c.num_mastery = 1).item_score(&stats), 160.0);
        assert_eq!(model(|c| c.num_mastery = 4).item_score(&stats), 100.0);
    }

    #[test]
    fn negative_policy_applies_only_when_toggle_off() {
        let stats = Stats {
            berserk_mastery: -40,
            rear_mastery: -20,
            ..Stats::default()
        };
        // Defaults: berserk half, rear none.
        assert_eq!(model(|_| {}).item_score(&stats), -20.0);
        assert_eq!(
            model(|c| c.negative_rear = NegativePolicy::Full).item_score(&stats),
            -40.0
        );
        assert_eq!(model(|c| c.berserk = true).item_score(&stats), -40.0);

        let positive = Stats { berserk_mastery: 40, ..Stats::default() };
        assert_eq!(model(|_| {}).item_score(&positive), 0.0);
    }

    #[test]
    fn huppermage_and_elements() {
        let stats = Stats {
            elemental_mastery: 100,
            fire_mastery: 60,
            air_mastery: 20,
            ..Stats::default()
        };
        let hupper = model(|c| c.class = Some(ClassName::Huppermage));
        assert!((hupper.item_score(&stats) - 120.0).abs() < 1e-9);

        let fire_air = model(|c| c.elements = Elements::FIRE | Elements::AIR);
        assert_eq!(fire_air.item_score(&stats), 140.0);
    }

    #[test]
    fn initial_score_rewards_major_stats() {
        let stats = Stats {
            ap: 1,
            mp: 1,
            wp: 1,
            critical_mastery: 50,
            ..Stats::default()
        };
        // crit weight with base crit mastery 0 is 20 / 100
        assert_eq!(model(|_| {}).initial_score(&stats), 200.0 + 50.0 + 10.0);

        let negative = Stats { ap: -2, ..Stats::default() };
        assert_eq!(model(|_| {}).initial_score(&negative), 0.0);
    }
}
