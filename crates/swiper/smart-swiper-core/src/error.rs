//! Error types for swiper registration and binding.

use serde::{Deserialize, Serialize};

/// Errors raised while building or attaching swipers.
///
/// Runtime misuse (unknown ids, uninitialized swipers, stale timers) never
/// surfaces here; those calls are ignored.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SwiperError {
    /// `access` must name both the start and the end port.
    #[error("access expects [startPort, endPort], got {len} entries")]
    AccessTooShort { len: usize },

    /// A definition without visible slots.
    #[error("runway is empty")]
    EmptyRunway,

    /// Definition could not be parsed or failed validation.
    #[error("invalid swiper definition: {reason}")]
    InvalidDefinition { reason: String },

    /// A required bind-time option was not supplied.
    #[error("swiper binding is missing `{field}`")]
    MissingBinding { field: &'static str },
}

impl SwiperError {
    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::AccessTooShort { .. } | Self::EmptyRunway => "config",
            Self::InvalidDefinition { .. } => "definition",
            Self::MissingBinding { .. } => "binding",
        }
    }
}

impl From<serde_json::Error> for SwiperError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDefinition {
            reason: err.to_string(),
        }
    }
}
