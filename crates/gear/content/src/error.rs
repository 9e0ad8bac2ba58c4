//! Catalog decoding errors.

use gear_core::{ErrorSeverity, GearError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog bundle is not valid gzip: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("catalog bundle could not be compressed: {0}")]
    Compress(#[source] std::io::Error),

    #[error("catalog bundle payload is malformed: {0}")]
    Payload(#[from] bincode::Error),

    #[error("raw item export is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog bundle version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("catalog bundle digest mismatch: items were modified or truncated")]
    DigestMismatch,
}

impl GearError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Compress(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Decompress(_) => "CATALOG_DECOMPRESS",
            Self::Compress(_) => "CATALOG_COMPRESS",
            Self::Payload(_) => "CATALOG_PAYLOAD",
            Self::Json(_) => "CATALOG_JSON",
            Self::UnsupportedVersion { .. } => "CATALOG_UNSUPPORTED_VERSION",
            Self::DigestMismatch => "CATALOG_DIGEST_MISMATCH",
        }
    }
}
