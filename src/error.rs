//! Error types for maneuver mining operations.
//!
//! Detector preconditions (wrong actor kind, short series, no temporal
//! overlap) are not errors: detectors yield nothing in those cases. The
//! variants here cover data-contract violations and malformed input.

use thiserror::Error;

use crate::maneuver::{ActorRole, ManeuverType};

/// Main error type for maneuver mining.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    /// The compatibility graph holds fewer negatives than requested.
    #[error("Insufficient negatives for {maneuver}: requested {requested}, available {available}")]
    InsufficientNegatives {
        maneuver: ManeuverType,
        requested: usize,
        available: usize,
    },

    /// Timestamps within a track are not strictly increasing.
    #[error("Timestamps must be strictly increasing at index {index}")]
    NonMonotonicTimestamps { index: usize },

    /// Paired series have different lengths.
    #[error("Length mismatch: {primary} primary samples vs {secondary} secondary samples")]
    LengthMismatch { primary: usize, secondary: usize },

    /// Paired series disagree on the timestamp at an index.
    #[error("Paired series are not synchronized at index {index}")]
    UnsynchronizedPair { index: usize },

    /// No detector exists for this maneuver in this actor role.
    #[error("Unsupported combination: {maneuver} cannot be mined for role {role}")]
    UnsupportedCombination {
        maneuver: ManeuverType,
        role: ActorRole,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for maneuver mining operations.
pub type Result<T> = std::result::Result<T, MiningError>;

impl MiningError {
    /// Create an insufficient negatives error.
    #[must_use]
    pub const fn insufficient_negatives(
        maneuver: ManeuverType,
        requested: usize,
        available: usize,
    ) -> Self {
        Self::InsufficientNegatives {
            maneuver,
            requested,
            available,
        }
    }

    /// Create a non-monotonic timestamps error.
    #[must_use]
    pub const fn non_monotonic(index: usize) -> Self {
        Self::NonMonotonicTimestamps { index }
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(primary: usize, secondary: usize) -> Self {
        Self::LengthMismatch { primary, secondary }
    }

    /// Create an unsupported combination error.
    #[must_use]
    pub const fn unsupported(maneuver: ManeuverType, role: ActorRole) -> Self {
        Self::UnsupportedCombination { maneuver, role }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error aborts a single event rather than the whole run.
    #[must_use]
    pub const fn is_event_scoped(&self) -> bool {
        matches!(
            self,
            Self::InsufficientNegatives { .. } | Self::UnsupportedCombination { .. }
        )
    }
}
