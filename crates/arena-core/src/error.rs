//! Configuration errors.

use thiserror::Error;

/// Invalid or unreadable configuration. Raised at load/initialization time only;
/// ticks never fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("min_spawn_delay ({min}) exceeds base_spawn_delay ({base})")]
    MinDelayExceedsBase { min: f64, base: f64 },
}
