//! Subcommand implementations.
mod codes;
mod solve;

pub use codes::{Decode, Encode};
pub use solve::Solve;
