//! Data model and scoring rules shared across the gear solver.
//!
//! `gear-core` defines the canonical item representation ([`EquipableItem`]
//! with its [`Stats`] vector), the immutable [`SolverConfig`], and the pure
//! scoring functions in [`score`]. It performs no I/O; catalog loading lives
//! in `gear-content` and the search in `solver`.
pub mod class;
pub mod config;
pub mod error;
pub mod item;
pub mod locale;
pub mod rarity;
pub mod score;
pub mod slot;
pub mod stats;

pub use class::{ClassName, Elements};
pub use config::{ConfigError, NegativePolicy, SolverConfig, StatMinimums};
pub use error::{ErrorSeverity, GearError};
pub use item::{DAGGER_TYPE_ID, EquipableItem, ItemDisplay, SHIELD_TYPE_ID};
pub use locale::{Locale, LocalizedText};
pub use rarity::Rarity;
pub use score::{ScoreModel, SetTotals, effective_mastery};
pub use slot::ItemSlot;
pub use stats::{SimKey, Stats};
