//! Equippable item definitions.

use core::fmt;

use crate::locale::{Locale, LocalizedText};
use crate::rarity::Rarity;
use crate::slot::ItemSlot;
use crate::stats::{SimKey, Stats};

/// Equip type of daggers, the default off-hand.
pub const DAGGER_TYPE_ID: u16 = 112;
/// Equip type of shields.
pub const SHIELD_TYPE_ID: u16 = 189;

/// One equippable item from the catalog.
///
/// # Design: Classification + Stat Vector
///
/// - Classification (`item_type`, `slot`, `disables_second_weapon`) comes from
///   the equip-type table at load time
/// - `stats` holds every numeric effect, summed over the item's equip effects
/// - `titles` and `type_titles` are display data only
///
/// Items are immutable once the catalog is loaded. The solver only holds
/// references into the catalog and clones items into its final results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipableItem {
    pub id: u32,
    pub level: u16,
    pub rarity: Rarity,
    pub item_type: u16,
    pub slot: ItemSlot,
    pub disables_second_weapon: bool,
    /// Sold in the in-game shop rather than dropped or crafted.
    pub is_shop_item: bool,
    pub titles: LocalizedText,
    pub type_titles: LocalizedText,
    pub stats: Stats,
}

impl EquipableItem {
    pub fn new(id: u32, level: u16, rarity: Rarity, item_type: u16, slot: ItemSlot) -> Self {
        Self {
            id,
            level,
            rarity,
            item_type,
            slot,
            disables_second_weapon: false,
            is_shop_item: false,
            titles: LocalizedText::default(),
            type_titles: LocalizedText::default(),
            stats: Stats::default(),
        }
    }

    /// Builder-style name setter for every locale.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.titles = LocalizedText::uniform(name);
        self
    }

    /// Builder-style stat setter.
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Builder-style flag for two-handed weapons.
    #[must_use]
    pub fn two_handed(mut self) -> Self {
        self.disables_second_weapon = true;
        self
    }

    /// Synthetic dagger standing in for the Light Weapon Expert passive.
    ///
    /// The passive grants elemental mastery while an off-hand dagger is worn;
    /// modelling it as a Legendary dagger lets the regular search pick it.
    /// Id 0 keeps it out of build codes.
    pub fn light_weapon_expert(level: u16) -> Self {
        let stats = Stats {
            elemental_mastery: (f64::from(level) * 1.5) as i32,
            ..Stats::default()
        };
        let mut item = Self::new(0, level, Rarity::Legendary, DAGGER_TYPE_ID, ItemSlot::SecondWeapon)
            .with_name("LIGHT WEAPON EXPERT PLACEHOLDER")
            .with_stats(stats);
        item.type_titles = LocalizedText::uniform("Dagger");
        item
    }

    pub fn is_relic(&self) -> bool {
        self.rarity == Rarity::Relic
    }

    pub fn is_epic(&self) -> bool {
        self.rarity == Rarity::Epic
    }

    pub fn is_souvenir(&self) -> bool {
        self.rarity == Rarity::Souvenir
    }

    /// Items without a catalog identity (see [`Self::light_weapon_expert`]).
    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }

    pub fn is_dagger(&self) -> bool {
        self.item_type == DAGGER_TYPE_ID
    }

    pub fn is_shield(&self) -> bool {
        self.item_type == SHIELD_TYPE_ID
    }

    pub fn name(&self, locale: Locale) -> Option<&str> {
        self.titles.get(locale)
    }

    pub fn sim_key(&self) -> SimKey {
        self.stats.sim_key()
    }

    pub fn total_elemental_res(&self) -> i32 {
        self.stats.total_elemental_res()
    }

    /// Display adapter bound to a locale.
    pub fn display(&self, locale: Locale) -> ItemDisplay<'_> {
        ItemDisplay { item: self, locale }
    }
}

/// Formats an item as `Item id: {id} [{rarity}] {type} Lv: {lv} {name}`.
pub struct ItemDisplay<'a> {
    item: &'a EquipableItem,
    locale: Locale,
}

impl fmt::Display for ItemDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = self.item;
        let type_name = item.type_titles.get(self.locale).unwrap_or("???");
        let name = item.name(self.locale).unwrap_or("");
        write!(
            f,
            "Item id: {:>5} [{:>10}] {:>20} Lv: {:>3} {}",
            item.id,
            item.rarity.as_ref(),
            type_name,
            item.level,
            name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_weapon_expert_scales_with_level() {
        let lwx = EquipableItem::light_weapon_expert(185);
        assert_eq!(lwx.stats.elemental_mastery, 277);
        assert!(lwx.is_dagger());
        assert!(lwx.is_placeholder());
        assert_eq!(lwx.slot, ItemSlot::SecondWeapon);
        assert_eq!(lwx.rarity, Rarity::Legendary);
    }

    #[test]
    fn display_uses_requested_locale() {
        let mut item = EquipableItem::new(26494, 200, Rarity::Relic, 110, ItemSlot::FirstWeapon);
        item.titles.set(Locale::En, "Amakna Sword");
        item.titles.set(Locale::Fr, "Épée d'Amakna");
        item.type_titles = LocalizedText::uniform("Sword");

        let en = item.display(Locale::En).to_string();
        assert_eq!(
            en,
            "Item id: 26494 [     Relic]                Sword Lv: 200 Amakna Sword"
        );
        assert!(item.display(Locale::Fr).to_string().ends_with("Épée d'Amakna"));
    }

    #[test]
    fn rarity_predicates() {
        let epic = EquipableItem::new(1, 50, Rarity::Epic, 103, ItemSlot::LeftHand);
        assert!(epic.is_epic());
        assert!(!epic.is_relic());
        assert!(!epic.is_souvenir());
    }
}
