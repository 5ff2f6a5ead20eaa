//! Gemini model enumeration.

use std::fmt;

use thiserror::Error;

const MODEL_PARSE_VALUES: &[&str] = &[
    "gemini-2.5-flash-preview-04-17",
    "gemini-2.5-pro-preview-05-06",
    "flash",
    "pro",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid model value '{raw}'; expected one of: {expected:?}")]
pub struct EnumParseError {
    raw: String,
    expected: &'static [&'static str],
}

impl EnumParseError {
    #[must_use]
    pub fn new(raw: impl Into<String>, expected: &'static [&'static str]) -> Self {
        Self {
            raw: raw.into(),
            expected,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

/// Backend variants a request can be routed to.
///
/// The set is closed: configuration that names anything else is rejected at
/// parse time, so a request can never carry an unsupported model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeminiModel {
    #[default]
    Flash,
    Pro,
}

impl GeminiModel {
    #[must_use]
    pub const fn all() -> &'static [GeminiModel] {
        &[GeminiModel::Flash, GeminiModel::Pro]
    }

    /// Wire identifier sent in the request path.
    #[must_use]
    pub const fn model_id(self) -> &'static str {
        match self {
            GeminiModel::Flash => "gemini-2.5-flash-preview-04-17",
            GeminiModel::Pro => "gemini-2.5-pro-preview-05-06",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            GeminiModel::Flash => "Gemini 2.5 Flash",
            GeminiModel::Pro => "Gemini 2.5 Pro",
        }
    }

    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            GeminiModel::Flash => "flash",
            GeminiModel::Pro => "pro",
        }
    }

    /// Parse a full model id or a short alias, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, EnumParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EnumParseError::new(trimmed, MODEL_PARSE_VALUES));
        }
        Self::all()
            .iter()
            .copied()
            .find(|model| {
                model.model_id().eq_ignore_ascii_case(trimmed)
                    || model.alias().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| EnumParseError::new(trimmed, MODEL_PARSE_VALUES))
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_id())
    }
}
