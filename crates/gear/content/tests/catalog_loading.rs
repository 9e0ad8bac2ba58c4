//! Loads the fixture export through every on-disk format.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use gear_content::{CatalogFormat, CatalogLoader};
use gear_core::{ItemSlot, Locale, Rarity};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json")
}

#[test]
fn raw_export_drops_unusable_records() {
    let catalog = CatalogLoader::load(&fixture()).unwrap();

    // 36 records minus one sublimation and one nameless item
    assert_eq!(catalog.len(), 34);
    assert!(catalog.get(1601).is_none());
    assert!(catalog.get(27700).is_none());

    let axe = catalog.get(1102).unwrap();
    assert!(axe.disables_second_weapon);
    assert_eq!(axe.stats.ap, 2);

    let pet = catalog.get(1501).unwrap();
    assert_eq!(pet.slot, ItemSlot::Pet);
    assert_eq!(pet.level, 50);
    assert_eq!(pet.stats.elemental_mastery, 80);

    let relic = catalog.get(1201).unwrap();
    assert_eq!(relic.rarity, Rarity::Relic);
    assert_eq!(relic.name(Locale::Pt), Some("Relic Hat"));
}

#[test]
fn bundle_round_trips_through_disk() {
    let catalog = CatalogLoader::load(&fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.bin");

    CatalogLoader::save_bundle(&catalog, &path).unwrap();
    let reloaded = CatalogLoader::load(&path).unwrap();
    assert_eq!(reloaded.items(), catalog.items());
}

#[test]
fn gzip_export_matches_plain_export() {
    let json = std::fs::read(fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    assert_eq!(CatalogFormat::from_path(&path), CatalogFormat::RawJsonGz);
    let gz = CatalogLoader::load(&path).unwrap();
    let plain = CatalogLoader::load(&fixture()).unwrap();
    assert_eq!(gz.items(), plain.items());
}

#[test]
fn corrupted_bundle_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.bin");
    std::fs::write(&path, b"definitely not gzip").unwrap();

    let err = CatalogLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to decode catalog bundle"));
}
