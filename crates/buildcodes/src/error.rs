//! Build-code errors.

use gear_core::{ErrorSeverity, GearError, ItemSlot};

/// Malformed base-2048 text. Indices count characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid character {index}: [{codepoint}]")]
    InvalidCharacter { index: usize, codepoint: u32 },

    #[error(
        "Unexpected character {index}: [{found}] after termination sequence {tail_index}: [{tail}]"
    )]
    AfterTermination {
        index: usize,
        found: char,
        tail_index: usize,
        tail: char,
    },

    #[error("Invalid termination character {index}: [{found}]")]
    InvalidTermination { index: usize, found: char },

    #[error("Invalid tail character {index}: [{found}]")]
    InvalidTail { index: usize, found: char },
}

impl GearError for DecodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter { .. } => "B2048_INVALID_CHARACTER",
            Self::AfterTermination { .. } => "B2048_AFTER_TERMINATION",
            Self::InvalidTermination { .. } => "B2048_INVALID_TERMINATION",
            Self::InvalidTail { .. } => "B2048_INVALID_TAIL",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildCodeError {
    #[error(transparent)]
    Text(#[from] DecodeError),

    #[error("build code payload is not a valid deflate stream: {0}")]
    Inflate(#[source] std::io::Error),

    #[error("build code payload could not be compressed: {0}")]
    Deflate(#[source] std::io::Error),

    #[error("build could not be packed: {0}")]
    Pack(#[from] rmp_serde::encode::Error),

    #[error("build code payload is malformed: {0}")]
    Unpack(#[from] rmp_serde::decode::Error),

    #[error("unknown class name {0:?}")]
    UnknownClass(String),

    #[error("no free {slot} position for item {item_id}")]
    NoFreeSlot { slot: ItemSlot, item_id: u32 },

    #[error("Invalid Build String")]
    InvalidBuildString,
}

impl GearError for BuildCodeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Deflate(_) | Self::Pack(_) => ErrorSeverity::Internal,
            Self::UnknownClass(_) | Self::NoFreeSlot { .. } => ErrorSeverity::Validation,
            Self::Text(_) | Self::Inflate(_) | Self::Unpack(_) | Self::InvalidBuildString => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Text(err) => err.error_code(),
            Self::Inflate(_) => "BUILD_INFLATE",
            Self::Deflate(_) => "BUILD_DEFLATE",
            Self::Pack(_) => "BUILD_PACK",
            Self::Unpack(_) => "BUILD_UNPACK",
            Self::UnknownClass(_) => "BUILD_UNKNOWN_CLASS",
            Self::NoFreeSlot { .. } => "BUILD_NO_FREE_SLOT",
            Self::InvalidBuildString => "BUILD_INVALID_STRING",
        }
    }
}
