//! Solver configuration and tunable defaults.

use crate::class::{ClassName, Elements};
use crate::error::{ErrorSeverity, GearError};
use crate::locale::Locale;
use crate::rarity::Rarity;

/// How negative berserk or rear mastery counts when that damage type is not
/// being optimized.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NegativePolicy {
    Full,
    Half,
    #[default]
    None,
}

impl NegativePolicy {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Half => 0.5,
            Self::None => 0.0,
        }
    }
}

/// Hard minimums every returned set must reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatMinimums {
    pub ap: i32,
    pub mp: i32,
    pub wp: i32,
    pub ra: i32,
    pub crit: i32,
}

/// Errors raised while validating a [`SolverConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("level {0} is not a supported bracket (20, 35, ..., 230)")]
    InvalidLevel(u16),

    #[error("number of masteries must be between 1 and 4, got {0}")]
    InvalidMasteryCount(u8),

    #[error("two-handed wield type cannot be combined with skipping two-handed weapons")]
    ConflictingWeaponModes,
}

impl GearError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel(_) => "CONFIG_INVALID_LEVEL",
            Self::InvalidMasteryCount(_) => "CONFIG_INVALID_MASTERY_COUNT",
            Self::ConflictingWeaponModes => "CONFIG_CONFLICTING_WEAPON_MODES",
        }
    }
}

/// Immutable input of a solve.
///
/// Created once from command-line flags, a TOML file, or by the caller, then
/// read-only for the whole search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Character level; items above it are unusable.
    pub level: u16,
    /// How many levels below `level` items are still considered.
    pub tolerance: u16,

    // ===== hard minimums =====
    pub ap: i32,
    pub mp: i32,
    pub wp: i32,
    pub ra: i32,
    pub min_crit: i32,

    // ===== character baseline =====
    pub base_ap: i32,
    pub base_mp: i32,
    pub base_wp: i32,
    pub base_ra: i32,
    /// Crit chance from sources other than gear (the engine adds 3 on top).
    pub base_crit: i32,
    pub base_crit_mastery: i32,
    pub base_mastery: i32,
    pub class: Option<ClassName>,

    // ===== scoring preferences =====
    /// Number of elements the build deals damage with (1..=4).
    pub num_mastery: u8,
    pub melee: bool,
    pub distance: bool,
    pub berserk: bool,
    pub rear: bool,
    pub heal: bool,
    pub elements: Elements,
    pub negative_berserk: NegativePolicy,
    pub negative_rear: NegativePolicy,
    pub unraveling: bool,

    // ===== weapon handling =====
    pub skip_shields: bool,
    pub light_weapon_expert: bool,
    pub wield_two_handed: bool,
    pub skip_two_handed: bool,

    // ===== item lists =====
    pub forbid_names: Vec<String>,
    pub forbid_ids: Vec<u32>,
    pub force_ids: Vec<u32>,
    pub force_names: Vec<String>,
    pub allowed_rarities: Vec<u8>,
    pub forbid_rarities: Vec<u8>,
    pub locale: Locale,

    // ===== search bounds =====
    pub dry_run: bool,
    pub exhaustive: bool,
    pub search_depth: usize,
    pub hard_cap_depth: usize,
}

impl SolverConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LEVEL: u16 = 230;
    pub const DEFAULT_TOLERANCE: u16 = 30;
    pub const DEFAULT_AP: i32 = 5;
    pub const DEFAULT_MP: i32 = 2;
    pub const DEFAULT_MIN_CRIT: i32 = -10;
    pub const DEFAULT_NUM_MASTERY: u8 = 3;
    pub const DEFAULT_SEARCH_DEPTH: usize = 2;
    pub const DEFAULT_HARD_CAP_DEPTH: usize = 100;

    // ===== game constants =====
    /// Crit chance every character has before gear.
    pub const ENGINE_CRIT_CHANCE: i32 = 3;
    /// Crit chance floor granted by the Unraveling sublimation.
    pub const UNRAVELING_CRIT_FLOOR: i32 = 40;
    pub const MIN_LEVEL: u16 = 20;
    pub const MAX_LEVEL: u16 = 230;
    pub const LEVEL_STEP: u16 = 15;

    pub fn new() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
            tolerance: Self::DEFAULT_TOLERANCE,
            ap: Self::DEFAULT_AP,
            mp: Self::DEFAULT_MP,
            wp: 0,
            ra: 0,
            min_crit: Self::DEFAULT_MIN_CRIT,
            base_ap: 0,
            base_mp: 0,
            base_wp: 0,
            base_ra: 0,
            base_crit: 0,
            base_crit_mastery: 0,
            base_mastery: 0,
            class: None,
            num_mastery: Self::DEFAULT_NUM_MASTERY,
            melee: false,
            distance: false,
            berserk: false,
            rear: false,
            heal: false,
            elements: Elements::empty(),
            negative_berserk: NegativePolicy::Half,
            negative_rear: NegativePolicy::None,
            unraveling: false,
            skip_shields: true,
            light_weapon_expert: false,
            wield_two_handed: false,
            skip_two_handed: false,
            forbid_names: Vec::new(),
            forbid_ids: Vec::new(),
            force_ids: Vec::new(),
            force_names: Vec::new(),
            allowed_rarities: (1..=7).collect(),
            forbid_rarities: Vec::new(),
            locale: Locale::En,
            dry_run: false,
            exhaustive: false,
            search_depth: Self::DEFAULT_SEARCH_DEPTH,
            hard_cap_depth: Self::DEFAULT_HARD_CAP_DEPTH,
        }
    }

    pub fn with_level(level: u16) -> Self {
        Self {
            level,
            ..Self::new()
        }
    }

    /// Levels accepted by [`Self::validate`]: 20, 35, ..., 230.
    pub fn supported_levels() -> impl Iterator<Item = u16> {
        (Self::MIN_LEVEL..=Self::MAX_LEVEL).step_by(usize::from(Self::LEVEL_STEP))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Self::supported_levels().any(|lv| lv == self.level) {
            return Err(ConfigError::InvalidLevel(self.level));
        }
        if !(1..=4).contains(&self.num_mastery) {
            return Err(ConfigError::InvalidMasteryCount(self.num_mastery));
        }
        if self.wield_two_handed && self.skip_two_handed {
            return Err(ConfigError::ConflictingWeaponModes);
        }
        Ok(())
    }

    /// Lowest item level considered.
    pub fn low_bound(&self) -> u16 {
        self.level.saturating_sub(self.tolerance).max(1)
    }

    /// Minimums after weapon-mode and sublimation adjustments.
    ///
    /// The two-handed wield passive trades 2 MP for 2 AP, so gear must supply
    /// 2 fewer AP and 2 more MP.
    pub fn stat_minimums(&self) -> StatMinimums {
        let mut mins = StatMinimums {
            ap: self.ap,
            mp: self.mp,
            wp: self.wp,
            ra: self.ra,
            crit: self.min_crit,
        };
        if self.unraveling {
            mins.crit = mins.crit.min(Self::UNRAVELING_CRIT_FLOOR);
        }
        if self.wield_two_handed {
            mins.ap -= 2;
            mins.mp += 2;
        }
        mins
    }

    /// Crit chance before any gear.
    pub fn base_crit_chance(&self) -> i32 {
        Self::ENGINE_CRIT_CHANCE + self.base_crit
    }

    /// Rarities that survive the allow and forbid lists.
    pub fn rarity_allowed(&self, rarity: Rarity) -> bool {
        let ordinal = rarity.ordinal();
        self.allowed_rarities.contains(&ordinal) && !self.forbid_rarities.contains(&ordinal)
    }

    /// True when any item is forced by id or name.
    pub fn has_forced_items(&self) -> bool {
        !(self.force_ids.is_empty() && self.force_names.is_empty())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_levels_are_fifteen_apart() {
        let levels: Vec<u16> = SolverConfig::supported_levels().collect();
        assert_eq!(levels.first(), Some(&20));
        assert_eq!(levels.last(), Some(&230));
        assert_eq!(levels.len(), 15);
    }

    #[test]
    fn validate_rejects_bad_input() {
        assert!(SolverConfig::new().validate().is_ok());
        assert_eq!(
            SolverConfig::with_level(100).validate(),
            Err(ConfigError::InvalidLevel(100))
        );

        let mut config = SolverConfig::new();
        config.num_mastery = 5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMasteryCount(5)));

        let mut config = SolverConfig::new();
        config.wield_two_handed = true;
        config.skip_two_handed = true;
        assert_eq!(config.validate(), Err(ConfigError::ConflictingWeaponModes));
    }

    #[test]
    fn minimums_adjust_for_modes() {
        let mut config = SolverConfig::new();
        config.wield_two_handed = true;
        let mins = config.stat_minimums();
        assert_eq!((mins.ap, mins.mp), (3, 4));

        config.unraveling = true;
        config.min_crit = 60;
        assert_eq!(config.stat_minimums().crit, 40);
    }

    #[test]
    fn low_bound_never_drops_below_one() {
        let mut config = SolverConfig::with_level(20);
        assert_eq!(config.low_bound(), 1);
        config.level = 185;
        assert_eq!(config.low_bound(), 155);
    }

    #[test]
    fn rarity_lists_combine() {
        let mut config = SolverConfig::new();
        assert!(config.rarity_allowed(Rarity::Souvenir));
        config.forbid_rarities = vec![6];
        assert!(!config.rarity_allowed(Rarity::Souvenir));
        config.allowed_rarities = vec![4, 5, 7];
        assert!(!config.rarity_allowed(Rarity::Mythic));
        assert!(config.rarity_allowed(Rarity::Epic));
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config: SolverConfig = toml::from_str("level = 185\nmelee = true\n").unwrap();
        assert_eq!(config.level, 185);
        assert!(config.melee);
        assert_eq!(config.ap, SolverConfig::DEFAULT_AP);
        assert_eq!(config.negative_berserk, NegativePolicy::Half);
    }
}
