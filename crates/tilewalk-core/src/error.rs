//! Configuration errors.
//!
//! Per-tick operations never fail; only building a configuration can.

use thiserror::Error;

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size, rate, or divisor that must be strictly positive and finite
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A magnitude or margin that may be zero but must not be negative
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Friction is a per-tick decay base and must lie in `[0, 1]`
    #[error("friction must lie in [0, 1], got {0}")]
    FrictionOutOfRange(f32),

    /// The JSON document could not be parsed
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reject values that are not strictly positive and finite.
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Reject values that are negative or not finite. Zero is accepted.
pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
