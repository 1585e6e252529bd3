//! Error types for ktrait.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid dependency: {0}")]
    InvalidDependency(String),

    #[error("trait {trait_id} failed: {message}")]
    Apply { trait_id: String, message: String },

    #[error("build step {step} failed: {reason}")]
    StepFailed { step: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a failure raised while a trait mutates the environment.
    pub fn apply(trait_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Apply {
            trait_id: trait_id.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
