//! Shareable build codes.
//!
//! Both formats are positional MessagePack arrays, raw-deflated and written
//! as base-2048 text:
//! - [`compact`]: the idealized [`Build`] (items, runes, deck)
//! - [`wakforge`]: Wakforge's flat 66-value [`Buildv1`]
pub mod base2048;
pub mod compact;
pub mod deflate;
pub mod error;
pub mod stats;
pub mod wakforge;

pub use compact::{
    Build, Item, PartialBuild, Slot as RuneSlot, SlotColor, decode_build, decode_partial,
    encode_build, encode_partial,
};
pub use error::{BuildCodeError, DecodeError};
pub use stats::{AllocatedStats, StatValues};
pub use wakforge::{
    Buildv1, EquippedItem, Rune, SLOT_ORDER, Slot, WakforgeElements, build_code_from_items,
    build_from_code, build_to_code,
};
