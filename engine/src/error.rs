use notesmith_providers::GenerationError;
use thiserror::Error;

use crate::Notice;

/// Why an orchestration ended without applying a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationError {
    /// No API key. Detected before any network attempt.
    #[error("Gemini API key is not configured")]
    MissingCredential,
    /// No editing context at extraction or write time.
    #[error("no active editor")]
    NoActiveEditor,
    #[error("Error calling Gemini API: {0}")]
    Generation(#[from] GenerationError),
}

impl OrchestrationError {
    /// The notice shown to the user for this failure.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingCredential => Notice::MissingApiKey,
            Self::NoActiveEditor => Notice::NoActiveEditor,
            Self::Generation(err) => Notice::GenerationFailed {
                message: err.to_string(),
            },
        }
    }
}
