use thiserror::Error;

use crate::domain::Target;

/// Errors raised while loading estimators or producing a prediction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    /// An estimator could not be fetched, found or deserialized.
    #[error("model unavailable{}: {reason}", target.map(|t| format!(" ({t})")).unwrap_or_default())]
    ModelUnavailable {
        target: Option<Target>,
        reason: String,
    },

    /// The raw input or the feature record violates the estimator contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PredictionError {
    pub fn unavailable(target: Target, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            target: Some(target),
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;
