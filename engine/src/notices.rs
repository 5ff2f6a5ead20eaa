//! User-visible notices.
//!
//! Every message the engine can show to the user is a variant here. Hosts
//! render them; they never construct free-form text of their own.

use std::fmt;

use notesmith_types::GeminiModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A closed set of notices shown during an orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A request was triggered without an API key.
    MissingApiKey,
    /// Shown once at startup when no API key resolves.
    ApiKeyNotConfigured,
    /// The config file exists but could not be read or parsed; defaults apply.
    ConfigUnreadable { message: String },
    NoActiveEditor,
    /// The input collector received blank instructions.
    EmptyPrompt,
    /// Persistent loading notice while the generation call is outstanding.
    Generating { model: GeminiModel },
    ResponseApplied,
    EmptyResponse,
    GenerationFailed { message: String },
    /// A second trigger arrived while a request was still in flight.
    Busy,
}

impl Notice {
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::Generating { .. } | Self::ResponseApplied | Self::EmptyResponse => {
                NoticeLevel::Info
            }
            Self::ApiKeyNotConfigured
            | Self::ConfigUnreadable { .. }
            | Self::EmptyPrompt
            | Self::Busy => NoticeLevel::Warning,
            Self::MissingApiKey | Self::NoActiveEditor | Self::GenerationFailed { .. } => {
                NoticeLevel::Error
            }
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Please configure your Gemini API key before refining notes.".to_string()
            }
            Self::ApiKeyNotConfigured => {
                "Gemini API key not configured. Please add it to your settings.".to_string()
            }
            Self::ConfigUnreadable { message } => {
                format!("Ignoring unreadable configuration: {message}")
            }
            Self::NoActiveEditor => "No active editor found.".to_string(),
            Self::EmptyPrompt => "Prompt cannot be empty.".to_string(),
            Self::Generating { model } => {
                format!("Sending prompt to {}...", model.display_name())
            }
            Self::ResponseApplied => "Gemini response received.".to_string(),
            Self::EmptyResponse => "Gemini returned empty content.".to_string(),
            Self::GenerationFailed { message } => format!("Error calling Gemini API: {message}"),
            Self::Busy => "A Gemini request is already in progress.".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
