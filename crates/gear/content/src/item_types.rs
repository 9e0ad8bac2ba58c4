//! Equip-type table: maps raw item type ids to positions.

use gear_core::{ItemSlot, LocalizedText};

/// One row of the equip-type table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipType {
    pub id: u16,
    pub slot: ItemSlot,
    /// Two-handed weapons occupy the off-hand as well.
    pub disables_second_weapon: bool,
    /// Titles in en, fr, es, pt order.
    titles: [&'static str; 4],
}

impl EquipType {
    const fn one(id: u16, slot: ItemSlot, titles: [&'static str; 4]) -> Self {
        Self {
            id,
            slot,
            disables_second_weapon: false,
            titles,
        }
    }

    const fn two(id: u16, titles: [&'static str; 4]) -> Self {
        Self {
            id,
            slot: ItemSlot::FirstWeapon,
            disables_second_weapon: true,
            titles,
        }
    }

    pub fn titles(&self) -> LocalizedText {
        let [en, fr, es, pt] = self.titles;
        LocalizedText {
            en: Some(en.to_owned()),
            fr: Some(fr.to_owned()),
            es: Some(es.to_owned()),
            pt: Some(pt.to_owned()),
        }
    }
}

use ItemSlot::*;

/// Sorted by id for binary search.
static EQUIP_TYPES: [EquipType; 31] = [
    EquipType::two(101, ["Axe", "Hache", "Hacha", "Machado"]),
    EquipType::one(103, LeftHand, ["Ring", "Anneau", "Anillo", "Anel"]),
    EquipType::one(108, FirstWeapon, ["Wand", "Baguette", "Varita", "Varinha"]),
    EquipType::one(110, FirstWeapon, ["Sword", "Epée", "Espada", "Espada"]),
    EquipType::two(111, ["Shovel", "Pelle", "Pala", "Pá"]),
    EquipType::one(112, SecondWeapon, ["Dagger", "Dague", "Daga", "Adaga"]),
    EquipType::one(113, FirstWeapon, ["One-handed Staff", "Bâton", "Bastón", "Bastão"]),
    EquipType::two(114, ["Hammer", "Marteau", "Martillo", "Martelo"]),
    EquipType::one(115, FirstWeapon, ["Hand", "Aiguille", "Aguja", "Ponteiro"]),
    EquipType::two(117, ["Bow", "Arc", "Arco", "Arco"]),
    EquipType::one(119, Legs, ["Boots", "Bottes", "Botas", "Botas"]),
    EquipType::one(120, Neck, ["Amulet", "Amulette", "Amuleto", "Amuleto"]),
    EquipType::one(132, Back, ["Cloak", "Cape", "Capa", "Capa"]),
    EquipType::one(133, Belt, ["Belt", "Ceinture", "Cinturón", "Cinto"]),
    EquipType::one(134, Head, ["Helmet", "Casque", "Casco", "Capacete"]),
    EquipType::one(136, Chest, ["Breastplate", "Plastron", "Coraza", "Peitoral"]),
    EquipType::one(138, Shoulders, ["Epaulettes", "Epaulettes", "Hombreras", "Dragonas"]),
    EquipType::one(189, SecondWeapon, ["Shield", "Bouclier", "Escudo", "Escudo"]),
    EquipType::one(219, FirstWeapon, ["Fist", "Poing", "Puño", "Punho"]),
    EquipType::two(223, ["Two-handed Sword", "Epée à 2 mains", "Espada a dos manos", "Espada de 2 mãos"]),
    EquipType::two(253, ["Two-handed Staff", "Bâton à 2 mains", "Bastón a dos manos", "Bastão de 2 mãos"]),
    EquipType::one(254, FirstWeapon, ["Cards", "Cartes", "Cartas", "Cartas"]),
    EquipType::one(480, Accessory, ["Torches", "Torches", "Antorchas", "Tochas"]),
    EquipType::one(518, FirstWeapon, ["One-Handed Weapons", "Armes 1 Main", "Armas de una mano", "Armas de 1 mão"]),
    EquipType::two(519, ["Two-Handed Weapons", "Armes 2 Mains", "Armas de dos manos", "Armas de 2 mãos"]),
    EquipType::one(520, SecondWeapon, ["Second Hand", "Seconde Main", "Segunda mano", "Segunda mão"]),
    EquipType::one(537, Accessory, ["Tools", "Outils", "Herramientas", "Ferramentas"]),
    EquipType::one(582, Pet, ["Pets", "Familiers", "Mascotas", "Mascotes"]),
    EquipType::one(611, Mount, ["Mounts", "Montures", "Monturas", "Montarias"]),
    EquipType::one(646, Accessory, ["Emblem", "Emblème", "Emblema", "Emblema"]),
    EquipType::one(647, Costume, ["Costumes", "Costumes", "Trajes", "Trajes"]),
];

/// Raw type ids that are not equipment (stat scrolls, sublimations).
pub const NON_EQUIPMENT_TYPE_IDS: [u16; 3] = [511, 811, 812];

/// Pets and mounts: fixed level, effects scale with their own level.
pub const COMPANION_TYPE_IDS: [u16; 2] = [582, 611];

/// Level assigned to pets and mounts regardless of the raw data.
pub const COMPANION_LEVEL: u16 = 50;

pub fn equip_type(id: u16) -> Option<&'static EquipType> {
    EQUIP_TYPES
        .binary_search_by_key(&id, |t| t.id)
        .ok()
        .map(|idx| &EQUIP_TYPES[idx])
}

pub fn all_equip_types() -> &'static [EquipType] {
    &EQUIP_TYPES
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::Locale;

    #[test]
    fn table_is_sorted() {
        assert!(EQUIP_TYPES.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn two_handed_types() {
        let two_handed: Vec<u16> = all_equip_types()
            .iter()
            .filter(|t| t.disables_second_weapon)
            .map(|t| t.id)
            .collect();
        assert_eq!(two_handed, vec![101, 111, 114, 117, 223, 253, 519]);
        assert!(two_handed.iter().all(|id| equip_type(*id).map(|t| t.slot) == Some(FirstWeapon)));
    }

    #[test]
    fn lookup() {
        let ring = equip_type(103).unwrap();
        assert_eq!(ring.slot, LeftHand);
        assert_eq!(ring.titles().get(Locale::Fr), Some("Anneau"));
        assert_eq!(equip_type(812), None);
        assert_eq!(equip_type(999), None);
    }
}
