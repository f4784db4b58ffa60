//! Error types for adaptive profiling

use thiserror::Error;

/// Errors that can occur while recording interactions or classifying a profile
#[derive(Debug, Error)]
pub enum AdaptError {
    /// Classification was requested before any interaction was recorded
    #[error("Interact with the modules first so I can learn your preferences!")]
    InsufficientData,

    #[error("Failed to parse interaction log: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown interaction kind: {0}")]
    UnknownInteraction(String),

    #[error("Invalid expert threshold: {0} (expected a finite value in [0, 1))")]
    InvalidThreshold(f64),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

impl AdaptError {
    /// Whether this error only means "keep interacting", as opposed to a real failure
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AdaptError::InsufficientData)
    }
}
