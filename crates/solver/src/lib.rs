//! Gear-set search.
//!
//! The solver filters a borrowed [`gear_content::Catalog`] down to per-slot
//! candidate pools and prunes each pool to the best few items, keeping AP,
//! MP, range and WP carriers while there is room. It then pairs relics with
//! epics and enumerates every remaining combination around each pair. Sets
//! that miss a hard minimum are dropped; the rest compete for a bounded,
//! best-first [`TopK`] list.
//!
//! ```text
//! Catalog ─▶ ItemFilter ─▶ SlotPools / WeaponPools ─┐
//!                          RelicEpicPair list ──────┴▶ SearchSpace ─▶ TopK ─▶ Solution
//! ```
pub mod error;
pub mod filters;
pub mod forced;
pub mod pairs;
pub mod pools;
pub mod progress;
pub mod search;
pub mod solution;
pub mod solver;
pub mod topk;
pub mod weapons;

pub use error::SolveError;
pub use filters::{ItemFilter, NATION_RELIC_EPIC_IDS, is_nation_item};
pub use forced::ForcedItems;
pub use pairs::RelicEpicPair;
pub use pools::{Candidate, PruneLimits, SlotPools};
pub use progress::{NoProgress, ProgressSink, percent};
pub use search::{SEARCHED_SLOTS, score_set};
pub use solution::{CandidatePool, Solution};
pub use solver::Solver;
pub use topk::{DEFAULT_CAPACITY, Ranked, TopK};
pub use weapons::{WeaponPools, WeaponSet};
