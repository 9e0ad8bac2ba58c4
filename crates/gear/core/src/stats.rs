//! Fixed-width stat vector carried by every item.
//!
//! All fields start at zero and only change through effect application while an
//! item is being built. Aggregating a set is a field-wise sum, so `Stats` forms
//! a commutative monoid under `+` with `Stats::default()` as identity.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

macro_rules! stat_vector {
    ($(#[$meta:meta])* pub struct $name:ident { $($(#[$field_meta:meta])* $field:ident),* $(,)? }) => {
        $(#[$meta])*
        pub struct $name {
            $($(#[$field_meta])* pub $field: i32,)*
        }

        impl AddAssign<&$name> for $name {
            fn add_assign(&mut self, rhs: &$name) {
                $(self.$field += rhs.$field;)*
            }
        }
    };
}

stat_vector! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub struct Stats {
        hp,
        /// Action points
        ap,
        /// Movement points
        mp,
        /// Wakfu points
        wp,
        range,
        control,
        block,
        critical_hit,
        critical_mastery,
        critical_resistance,
        elemental_mastery,
        mastery_1_element,
        mastery_2_elements,
        mastery_3_elements,
        fire_mastery,
        earth_mastery,
        water_mastery,
        air_mastery,
        melee_mastery,
        distance_mastery,
        berserk_mastery,
        rear_mastery,
        healing_mastery,
        area_mastery,
        single_target_mastery,
        elemental_resistance,
        resistance_1_element,
        resistance_2_elements,
        resistance_3_elements,
        fire_resistance,
        earth_resistance,
        water_resistance,
        air_resistance,
        rear_resistance,
        armor_given,
        armor_received,
        lock,
        dodge,
        initiative,
        wisdom,
        prospecting,
        force_of_will,
        kit_skill,
    }
}

/// Stats that always need a full evaluation: items sharing this key are
/// interchangeable as far as hard constraints and crit math are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimKey(pub [i32; 5]);

impl SimKey {
    pub fn ap(&self) -> i32 {
        self.0[0]
    }

    pub fn mp(&self) -> i32 {
        self.0[1]
    }
}

impl Add for SimKey {
    type Output = SimKey;

    fn add(self, rhs: SimKey) -> SimKey {
        let mut out = self.0;
        for (acc, value) in out.iter_mut().zip(rhs.0) {
            *acc += value;
        }
        SimKey(out)
    }
}

impl Sum for SimKey {
    fn sum<I: Iterator<Item = SimKey>>(iter: I) -> SimKey {
        iter.fold(SimKey::default(), Add::add)
    }
}

impl Stats {
    /// Domination key: (AP, MP, crit hit, crit mastery, WP).
    pub fn sim_key(&self) -> SimKey {
        SimKey([
            self.ap,
            self.mp,
            self.critical_hit,
            self.critical_mastery,
            self.wp,
        ])
    }

    /// Resistance summed over all four elements.
    ///
    /// N-element resistances count N times and elemental resistance four times.
    pub fn total_elemental_res(&self) -> i32 {
        self.fire_resistance
            + self.air_resistance
            + self.water_resistance
            + self.earth_resistance
            + self.resistance_1_element
            + self.resistance_2_elements * 2
            + self.resistance_3_elements * 3
            + self.elemental_resistance * 4
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self += &rhs;
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += &rhs;
        self
    }
}

impl<'a> Add<&'a Stats> for Stats {
    type Output = Stats;

    fn add(mut self, rhs: &'a Stats) -> Stats {
        self += rhs;
        self
    }
}

impl Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::default(), Add::add)
    }
}

impl<'a> Sum<&'a Stats> for Stats {
    fn sum<I: Iterator<Item = &'a Stats>>(iter: I) -> Stats {
        iter.fold(Stats::default(), |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: i32) -> Stats {
        Stats {
            ap: seed % 3,
            mp: seed % 2,
            wp: -(seed % 4),
            range: seed % 5,
            critical_hit: seed * 2 - 7,
            critical_mastery: seed * 11,
            elemental_mastery: seed * 13,
            fire_resistance: seed,
            resistance_2_elements: seed - 3,
            ..Stats::default()
        }
    }

    #[test]
    fn aggregation_is_field_wise_and_order_independent() {
        let a: Vec<Stats> = (1..6).map(sample).collect();
        let b: Vec<Stats> = (6..11).map(sample).collect();

        let union: Stats = a.iter().chain(b.iter()).sum();
        let split = a.iter().sum::<Stats>() + b.iter().sum::<Stats>();
        assert_eq!(union, split);

        let reversed: Stats = b.iter().rev().chain(a.iter().rev()).sum();
        assert_eq!(union, reversed);
    }

    #[test]
    fn default_is_identity() {
        let s = sample(4);
        assert_eq!(s + Stats::default(), s);
    }

    #[test]
    fn total_elemental_res_weights() {
        let s = Stats {
            fire_resistance: 10,
            air_resistance: 1,
            resistance_1_element: 5,
            resistance_2_elements: 5,
            resistance_3_elements: 5,
            elemental_resistance: 2,
            ..Stats::default()
        };
        assert_eq!(s.total_elemental_res(), 10 + 1 + 5 + 10 + 15 + 8);
    }

    #[test]
    fn sim_key_sums() {
        let a = Stats { ap: 1, wp: 2, ..Stats::default() };
        let b = Stats { mp: 1, critical_hit: 3, ..Stats::default() };
        assert_eq!(a.sim_key() + b.sim_key(), SimKey([1, 1, 3, 0, 2]));
        assert_eq!(
            [a.sim_key(), b.sim_key()].into_iter().sum::<SimKey>(),
            (a + b).sim_key()
        );
    }
}
