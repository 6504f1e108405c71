//! Error types for the mascot runtime

use serde::{Deserialize, Serialize};

/// Errors raised while parsing state names or loading configuration.
///
/// Scheduler operations themselves never fail; they log and ignore bad input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MascotError {
    /// Name does not match any animation state tag
    #[error("Unknown animation state: {name}")]
    UnknownState { name: String },

    /// Configuration value out of range
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl MascotError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownState { .. } => "state",
            Self::InvalidConfig { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for MascotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
