//! In-memory item catalog.

use std::collections::HashMap;

use gear_core::{EquipableItem, Locale};

use crate::bundle::CatalogBundle;
use crate::error::CatalogError;
use crate::raw::parse_items;

/// Read-only set of every equippable item, loaded once per process.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<EquipableItem>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    pub fn new(items: Vec<EquipableItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id, idx))
            .collect();
        Self { items, by_id }
    }

    /// Builds a catalog from a raw `items.json` export.
    pub fn from_raw_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_items(json)?))
    }

    /// Builds a catalog from packed bundle bytes.
    pub fn from_bundle_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        Ok(Self::new(CatalogBundle::decode(bytes)?.items))
    }

    pub fn to_bundle(&self) -> Result<CatalogBundle, CatalogError> {
        CatalogBundle::new(self.items.clone())
    }

    pub fn items(&self) -> &[EquipableItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&EquipableItem> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    /// All items whose name in `locale` equals `name`.
    pub fn by_name<'a>(
        &'a self,
        name: &'a str,
        locale: Locale,
    ) -> impl Iterator<Item = &'a EquipableItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.name(locale) == Some(name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{ItemSlot, Rarity};

    #[test]
    fn lookup_by_id_and_name() {
        let catalog = Catalog::new(vec![
            EquipableItem::new(1, 200, Rarity::Mythic, 103, ItemSlot::LeftHand).with_name("Ring"),
            EquipableItem::new(2, 200, Rarity::Souvenir, 103, ItemSlot::LeftHand).with_name("Ring"),
            EquipableItem::new(3, 200, Rarity::Mythic, 120, ItemSlot::Neck).with_name("Amulet"),
        ]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(3).map(|i| i.slot), Some(ItemSlot::Neck));
        assert!(catalog.get(4).is_none());
        assert_eq!(catalog.by_name("Ring", Locale::En).count(), 2);
        assert_eq!(catalog.by_name("Ring", Locale::Fr).count(), 2);
    }
}
