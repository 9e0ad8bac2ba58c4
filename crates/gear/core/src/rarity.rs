//! Item rarity tiers.

/// Rarity tier as numbered in the game data (1 = Common ... 7 = Epic).
///
/// The numbering is not ordered by power: Relic (5) and Epic (7) are the
/// one-per-set tiers, Souvenir (6) is a cosmetic reissue of an existing item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Rarity {
    Common = 1,
    Uncommon = 2,
    Mythic = 3,
    Legendary = 4,
    Relic = 5,
    Souvenir = 6,
    Epic = 7,
}

impl Rarity {
    /// Numeric tier as found in the raw data.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Resolves a raw ordinal; unknown values yield `None`.
    pub const fn from_ordinal(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Common,
            2 => Self::Uncommon,
            3 => Self::Mythic,
            4 => Self::Legendary,
            5 => Self::Relic,
            6 => Self::Souvenir,
            7 => Self::Epic,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ordinals_round_trip() {
        for rarity in Rarity::iter() {
            assert_eq!(Rarity::from_ordinal(rarity.ordinal()), Some(rarity));
        }
        assert_eq!(Rarity::from_ordinal(0), None);
        assert_eq!(Rarity::from_ordinal(8), None);
    }
}
