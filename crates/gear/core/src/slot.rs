//! Equipment positions.

/// Position an item occupies when equipped.
///
/// Names follow the game's own position identifiers (`FIRST_WEAPON`,
/// `LEFT_HAND`, ...). Rings always report `LEFT_HAND`; a character wears two
/// of them, which is why ring handling is special-cased throughout the solver.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ItemSlot {
    Accessory,
    Back,
    Belt,
    Chest,
    Costume,
    FirstWeapon,
    Head,
    LeftHand,
    Legs,
    Mount,
    Neck,
    Pet,
    SecondWeapon,
    Shoulders,
}

impl ItemSlot {
    /// How many items of this position a single set can hold.
    pub const fn capacity(self) -> usize {
        match self {
            Self::LeftHand => 2,
            _ => 1,
        }
    }

    /// True for the main-hand and off-hand positions.
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::FirstWeapon | Self::SecondWeapon)
    }

    /// Pets and mounts ignore level brackets and rarity restrictions.
    pub const fn is_companion(self) -> bool {
        matches!(self, Self::Pet | Self::Mount)
    }
}
