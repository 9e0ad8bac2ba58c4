//! Item catalog ingestion and loaders.
//!
//! This crate turns the game's raw item export into [`gear_core::EquipableItem`]s
//! and stores them as a packed bundle:
//! - Equip-type table (type id → position, two-handedness, localized title)
//! - Effect dispatch table (action id → typed stat delta)
//! - Equip-condition exclusions
//! - Packed catalog bundles with integrity digest
//! - File loaders for catalogs and TOML solver configuration
//!
//! The catalog is read-only once loaded; the solver only borrows from it.

pub mod bundle;
pub mod catalog;
pub mod conditions;
pub mod effects;
pub mod error;
pub mod item_types;
pub mod raw;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bundle::CatalogBundle;
pub use catalog::Catalog;
pub use conditions::{
    CONDITIONAL_ITEMS, DEFAULT_FORBIDDEN_NAMES, UNOBTAINABLE_ITEM_IDS, has_equip_condition,
    is_unobtainable,
};
pub use effects::{EffectError, EffectKind, StatDelta, StatField, apply_effect, effect_kind};
pub use error::CatalogError;
pub use item_types::{EquipType, equip_type};
pub use raw::{RawItem, parse_items};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFormat, CatalogLoader, ConfigLoader, LoadResult};
