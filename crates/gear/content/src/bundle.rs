//! Packed catalog bundle: `gzip(bincode(CatalogBundle))`.
//!
//! The digest is computed over the bincode encoding of `items` alone, so a
//! bundle whose payload was truncated or edited fails to load instead of
//! silently feeding the solver a partial catalog.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use gear_core::EquipableItem;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogBundle {
    pub version: u32,
    /// SHA-256 of `bincode(items)`.
    pub digest: [u8; 32],
    pub items: Vec<EquipableItem>,
}

impl CatalogBundle {
    pub const VERSION: u32 = 1;

    pub fn new(items: Vec<EquipableItem>) -> Result<Self, CatalogError> {
        let digest = items_digest(&items)?;
        Ok(Self {
            version: Self::VERSION,
            digest,
            items,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, CatalogError> {
        let payload = bincode::serialize(self)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&payload).map_err(CatalogError::Compress)?;
        encoder.finish().map_err(CatalogError::Compress)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CatalogError> {
        let mut payload = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut payload)
            .map_err(CatalogError::Decompress)?;

        let bundle: Self = bincode::deserialize(&payload)?;
        if bundle.version != Self::VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: bundle.version,
                expected: Self::VERSION,
            });
        }
        if items_digest(&bundle.items)? != bundle.digest {
            return Err(CatalogError::DigestMismatch);
        }
        Ok(bundle)
    }
}

fn items_digest(items: &[EquipableItem]) -> Result<[u8; 32], CatalogError> {
    let encoded = bincode::serialize(items)?;
    Ok(Sha256::digest(&encoded).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{ItemSlot, Rarity, Stats};

    fn items() -> Vec<EquipableItem> {
        vec![
            EquipableItem::new(10, 200, Rarity::Legendary, 134, ItemSlot::Head)
                .with_name("Hat")
                .with_stats(Stats { ap: 1, ..Stats::default() }),
            EquipableItem::new(11, 215, Rarity::Epic, 103, ItemSlot::LeftHand).with_name("Ring"),
        ]
    }

    #[test]
    fn bundle_round_trips() {
        let bundle = CatalogBundle::new(items()).unwrap();
        let bytes = bundle.encode().unwrap();
        // gzip magic
        assert_eq!(hex::encode(&bytes[..2]), "1f8b");
        assert_eq!(CatalogBundle::decode(&bytes).unwrap(), bundle);
    }

    #[test]
    fn tampered_items_fail_digest() {
        let mut bundle = CatalogBundle::new(items()).unwrap();
        bundle.items.pop();
        let bytes = bundle.encode().unwrap();
        assert!(matches!(
            CatalogBundle::decode(&bytes),
            Err(CatalogError::DigestMismatch)
        ));
    }

    #[test]
    fn rejects_other_versions_and_garbage() {
        let mut bundle = CatalogBundle::new(items()).unwrap();
        bundle.version = 9;
        let bytes = bundle.encode().unwrap();
        assert!(matches!(
            CatalogBundle::decode(&bytes),
            Err(CatalogError::UnsupportedVersion { found: 9, expected: 1 })
        ));
        assert!(matches!(
            CatalogBundle::decode(b"not a bundle"),
            Err(CatalogError::Decompress(_))
        ));
    }
}
