//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod inspect_catalog;
mod inspect_code;
mod pack_catalog;

pub use clean::Clean;
pub use inspect_catalog::InspectCatalog;
pub use inspect_code::InspectCode;
pub use pack_catalog::PackCatalog;
