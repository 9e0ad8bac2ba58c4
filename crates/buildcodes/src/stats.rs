//! Characteristic points allocated on a character sheet.

use gear_core::{ClassName, Stats};
use serde::{Deserialize, Serialize};

/// Points per characteristic, in build-code order.
///
/// The trailing seven "major" characteristics hold at most one point each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatedStats {
    // ===== intelligence =====
    pub percent_hp: i32,
    pub elemental_res: i32,
    pub barrier: i32,
    pub heals_received: i32,
    pub percent_armor: i32,
    // ===== strength =====
    pub elemental_mastery: i32,
    pub melee_mastery: i32,
    pub distance_mastery: i32,
    pub hp: i32,
    // ===== agility =====
    pub lock: i32,
    pub dodge: i32,
    pub initiative: i32,
    pub lock_and_dodge: i32,
    pub force_of_will: i32,
    // ===== fortune =====
    pub percent_crit: i32,
    pub percent_block: i32,
    pub crit_mastery: i32,
    pub rear_mastery: i32,
    pub berserk_mastery: i32,
    pub healing_mastery: i32,
    pub rear_res: i32,
    pub crit_res: i32,
    // ===== major =====
    pub ap: bool,
    pub mp: bool,
    pub range: bool,
    pub wp: bool,
    pub control: bool,
    pub damage_inflicted: bool,
    pub major_res: bool,
}

/// Character stats granted by allocated points alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatValues {
    pub stats: Stats,
    /// Percent final damage.
    pub final_damage: i32,
}

impl AllocatedStats {
    pub const FIELD_COUNT: usize = 29;

    /// Point total a character of `level` has to spend: one per level past
    /// the first, plus one per major threshold reached.
    pub fn available_points(level: u16) -> i32 {
        let thresholds = [25, 75, 125, 175].iter().filter(|&&lv| level >= lv).count();
        i32::from(level) - 1 + thresholds as i32
    }

    pub fn spent_points(&self) -> i32 {
        self.to_values().iter().sum()
    }

    pub fn is_fully_allocated(&self, level: u16) -> bool {
        self.spent_points() == Self::available_points(level)
    }

    /// All 29 fields as integers, majors as 0 or 1.
    pub fn to_values(&self) -> [i32; Self::FIELD_COUNT] {
        [
            self.percent_hp,
            self.elemental_res,
            self.barrier,
            self.heals_received,
            self.percent_armor,
            self.elemental_mastery,
            self.melee_mastery,
            self.distance_mastery,
            self.hp,
            self.lock,
            self.dodge,
            self.initiative,
            self.lock_and_dodge,
            self.force_of_will,
            self.percent_crit,
            self.percent_block,
            self.crit_mastery,
            self.rear_mastery,
            self.berserk_mastery,
            self.healing_mastery,
            self.rear_res,
            self.crit_res,
            i32::from(self.ap),
            i32::from(self.mp),
            i32::from(self.range),
            i32::from(self.wp),
            i32::from(self.control),
            i32::from(self.damage_inflicted),
            i32::from(self.major_res),
        ]
    }

    pub fn from_values(v: [i32; Self::FIELD_COUNT]) -> Self {
        Self {
            percent_hp: v[0],
            elemental_res: v[1],
            barrier: v[2],
            heals_received: v[3],
            percent_armor: v[4],
            elemental_mastery: v[5],
            melee_mastery: v[6],
            distance_mastery: v[7],
            hp: v[8],
            lock: v[9],
            dodge: v[10],
            initiative: v[11],
            lock_and_dodge: v[12],
            force_of_will: v[13],
            percent_crit: v[14],
            percent_block: v[15],
            crit_mastery: v[16],
            rear_mastery: v[17],
            berserk_mastery: v[18],
            healing_mastery: v[19],
            rear_res: v[20],
            crit_res: v[21],
            ap: v[22] != 0,
            mp: v[23] != 0,
            range: v[24] != 0,
            wp: v[25] != 0,
            control: v[26] != 0,
            damage_inflicted: v[27] != 0,
            major_res: v[28] != 0,
        }
    }

    /// Stats these points give, including the class baseline of 6 AP, 3 MP
    /// and 6 WP.
    pub fn to_stat_values(&self, class: Option<ClassName>) -> StatValues {
        let major = |flag: bool| i32::from(flag);

        let mut stats = Stats {
            ap: 6 + major(self.ap),
            mp: 3 + major(self.mp),
            wp: 6 + 2 * major(self.wp),
            range: major(self.range),
            control: 2 * major(self.control),
            critical_hit: self.percent_crit,
            critical_mastery: 4 * self.crit_mastery,
            elemental_mastery: 5 * self.elemental_mastery
                + 20 * major(self.mp)
                + 40 * (major(self.range) + major(self.control)),
            distance_mastery: 8 * self.distance_mastery,
            melee_mastery: 8 * self.melee_mastery,
            rear_mastery: 6 * self.rear_mastery,
            berserk_mastery: 8 * self.berserk_mastery,
            healing_mastery: 6 * self.healing_mastery,
            lock: 6 * self.lock + 4 * self.lock_and_dodge,
            dodge: 6 * self.dodge + 4 * self.lock_and_dodge,
            block: self.percent_block,
            ..Stats::default()
        };
        match class {
            Some(ClassName::Ecaflip) => stats.critical_hit += 20,
            Some(ClassName::Xelor) => stats.wp += 6,
            _ => {}
        }

        StatValues {
            stats,
            final_damage: 10 * major(self.damage_inflicted),
        }
    }
}
