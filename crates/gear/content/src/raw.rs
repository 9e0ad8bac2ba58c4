//! Raw item records as exported by the game's data CDN (`items.json`).
//!
//! Only the fields the solver consumes are modelled; everything else in the
//! export (descriptions, graphics, use effects) is ignored by serde.

use gear_core::{EquipableItem, LocalizedText, Rarity};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::effects::apply_effect;
use crate::item_types::{COMPANION_LEVEL, COMPANION_TYPE_IDS, NON_EQUIPMENT_TYPE_IDS, equip_type};

/// Property flag marking shop items.
const SHOP_PROPERTY: u32 = 7;

/// Known nameless records in the export.
const KNOWN_NAMELESS_IDS: std::ops::RangeInclusive<u32> = 27700..=27703;

#[derive(Clone, Debug, Deserialize)]
pub struct RawItem {
    pub definition: RawDefinition,
    #[serde(default)]
    pub title: LocalizedText,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    pub item: RawItemDetails,
    #[serde(default)]
    pub equip_effects: Vec<RawEffect>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemDetails {
    pub id: u32,
    pub level: u16,
    pub base_parameters: RawBaseParameters,
    #[serde(default)]
    pub properties: Vec<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBaseParameters {
    pub item_type_id: u16,
    pub rarity: u8,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawEffect {
    pub effect: RawEffectBody,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawEffectBody {
    pub definition: RawEffectDefinition,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffectDefinition {
    pub action_id: u32,
    #[serde(default)]
    pub params: Vec<f64>,
}

impl RawItem {
    /// Converts a raw record into an [`EquipableItem`].
    ///
    /// Returns `None` for records that are not equipment, use an unknown equip
    /// type, have an unknown rarity, or carry no name in any locale. Individual
    /// effects that cannot be resolved are skipped with a warning; the rest of
    /// the item is kept.
    pub fn to_item(&self) -> Option<EquipableItem> {
        let details = &self.definition.item;
        let type_id = details.base_parameters.item_type_id;

        if NON_EQUIPMENT_TYPE_IDS.contains(&type_id) {
            return None;
        }
        let Some(equip) = equip_type(type_id) else {
            warn!(item_id = details.id, type_id, "Unknown item type");
            return None;
        };
        let Some(rarity) = Rarity::from_ordinal(details.base_parameters.rarity) else {
            warn!(item_id = details.id, rarity = details.base_parameters.rarity, "Unknown rarity");
            return None;
        };

        let companion = COMPANION_TYPE_IDS.contains(&type_id);
        let level = if companion { COMPANION_LEVEL } else { details.level };

        let mut item = EquipableItem::new(details.id, level, rarity, type_id, equip.slot);
        item.disables_second_weapon = equip.disables_second_weapon;
        item.is_shop_item = details.properties.contains(&SHOP_PROPERTY);
        item.type_titles = equip.titles();
        item.titles = non_empty_titles(&self.title);

        for raw in &self.definition.equip_effects {
            let effect = &raw.effect.definition;
            if let Err(err) = apply_effect(&mut item.stats, effect.action_id, &effect.params, companion) {
                warn!(item_id = details.id, params = ?effect.params, "Skipping effect: {err}");
            }
        }

        if item.titles.is_empty() {
            if KNOWN_NAMELESS_IDS.contains(&item.id) {
                debug!(item_id = item.id, "Skipping known nameless item");
            } else {
                warn!(item_id = item.id, "Skipping item for lack of name");
            }
            return None;
        }

        Some(item)
    }
}

fn non_empty_titles(raw: &LocalizedText) -> LocalizedText {
    let keep = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());
    LocalizedText {
        en: keep(&raw.en),
        fr: keep(&raw.fr),
        es: keep(&raw.es),
        pt: keep(&raw.pt),
    }
}

/// Parses a full `items.json` export, dropping records that do not convert.
pub fn parse_items(json: &str) -> Result<Vec<EquipableItem>, serde_json::Error> {
    let raw: Vec<RawItem> = serde_json::from_str(json)?;
    Ok(raw.iter().filter_map(RawItem::to_item).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{ItemSlot, Locale};

    fn record(id: u32, type_id: u16, rarity: u8, title: &str, effects: &str) -> String {
        format!(
            r#"{{
                "definition": {{
                    "item": {{
                        "id": {id},
                        "level": 200,
                        "baseParameters": {{ "itemTypeId": {type_id}, "rarity": {rarity} }},
                        "properties": []
                    }},
                    "equipEffects": [{effects}]
                }},
                "title": {title}
            }}"#
        )
    }

    fn effect(action: u32, params: &str) -> String {
        format!(r#"{{ "effect": {{ "definition": {{ "actionId": {action}, "params": {params} }} }} }}"#)
    }

    #[test]
    fn parses_weapon_record() {
        let effects = [effect(31, "[1, 0]"), effect(120, "[250, 0]"), effect(4242, "[1]")].join(",");
        let json = format!(
            "[{}]",
            record(1, 101, 4, r#"{ "en": "Big Axe", "fr": "Grosse Hache" }"#, &effects)
        );
        let items = parse_items(&json).unwrap();
        assert_eq!(items.len(), 1);

        let axe = &items[0];
        assert_eq!(axe.slot, ItemSlot::FirstWeapon);
        assert!(axe.disables_second_weapon);
        assert_eq!(axe.stats.ap, 1);
        assert_eq!(axe.stats.elemental_mastery, 250);
        assert_eq!(axe.name(Locale::Fr), Some("Grosse Hache"));
        assert_eq!(axe.name(Locale::Es), None);
        assert_eq!(axe.type_titles.get(Locale::En), Some("Axe"));
    }

    #[test]
    fn skips_non_equipment_and_nameless() {
        let json = format!(
            "[{}, {}, {}]",
            record(2, 812, 4, r#"{ "en": "Sublimation" }"#, ""),
            record(3, 120, 4, r#"{ "en": "" }"#, ""),
            record(4, 999, 4, r#"{ "en": "Mystery" }"#, ""),
        );
        assert!(parse_items(&json).unwrap().is_empty());
    }

    #[test]
    fn pets_are_evaluated_at_level_fifty() {
        let json = format!(
            "[{}]",
            record(5, 582, 1, r#"{ "en": "Gobbal" }"#, &effect(20, "[0, 2]"))
        );
        let pet = &parse_items(&json).unwrap()[0];
        assert_eq!(pet.level, 50);
        assert_eq!(pet.stats.hp, 100);
    }
}
