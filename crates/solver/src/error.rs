//! Solve errors.
//!
//! Every variant is raised before the search starts; an empty result is not an
//! error.

use gear_core::{ConfigError, ErrorSeverity, GearError, ItemSlot};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "unable to force some of these items with your other conditions: \
         attempted ids {ids:?}, names {names:?}, found {found:?}"
    )]
    ForcedItemsMissing {
        ids: Vec<u32>,
        names: Vec<String>,
        found: Vec<u32>,
    },

    #[error("unable to force multiple relics into one set")]
    MultipleRelics,

    #[error("unable to force multiple epics into one set")]
    MultipleEpics,

    #[error("couldn't force the nation ring matching sword {sword_id}")]
    NationRingMissing { sword_id: u32 },

    #[error("couldn't force the nation sword matching ring {ring_id}")]
    NationSwordMissing { ring_id: u32 },

    #[error("can't force a nation ring with a non-nation sword relic")]
    NationRingWithForeignRelic,

    #[error("too many forced items in position {slot}: {count} (at most {max})")]
    TooManyForced {
        slot: ItemSlot,
        count: usize,
        max: usize,
    },

    #[error("impossible to get {required} {stat} with the specified conditions (at most {available})")]
    ImpossibleStat {
        stat: &'static str,
        required: i32,
        available: i32,
    },
}

impl GearError for SolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
            Self::ImpossibleStat { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
            Self::ForcedItemsMissing { .. } => "SOLVE_FORCED_ITEMS_MISSING",
            Self::MultipleRelics => "SOLVE_MULTIPLE_RELICS",
            Self::MultipleEpics => "SOLVE_MULTIPLE_EPICS",
            Self::NationRingMissing { .. } => "SOLVE_NATION_RING_MISSING",
            Self::NationSwordMissing { .. } => "SOLVE_NATION_SWORD_MISSING",
            Self::NationRingWithForeignRelic => "SOLVE_NATION_RING_FOREIGN_RELIC",
            Self::TooManyForced { .. } => "SOLVE_TOO_MANY_FORCED",
            Self::ImpossibleStat { .. } => "SOLVE_IMPOSSIBLE_STAT",
        }
    }
}
