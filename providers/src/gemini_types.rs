//! Typed payloads for the Gemini GenerateContent API.
//!
//! Every field is optional: a missing field is a structural problem reported
//! by the caller, never a deserialization failure.

use serde::Deserialize;

/// Token usage data returned by Gemini API.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Top-level GenerateContent response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub candidates: Option<Vec<Candidate>>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    pub parts: Option<Vec<Part>>,
}

/// A content part in a Gemini response.
#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
    /// Whether this is thinking content
    #[serde(default)]
    pub thought: bool,
}

/// Known Gemini finish reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Language,
    Blocklist,
    ProhibitedContent,
    Spii,
    Other,
    Unknown,
}

impl FinishReason {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "STOP" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" => Self::Safety,
            "RECITATION" => Self::Recitation,
            "LANGUAGE" => Self::Language,
            "BLOCKLIST" => Self::Blocklist,
            "PROHIBITED_CONTENT" => Self::ProhibitedContent,
            "SPII" => Self::Spii,
            "OTHER" => Self::Other,
            _ => Self::Unknown,
        }
    }

    /// Returns error message if this is an error reason, None if success.
    #[must_use]
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            Self::Stop | Self::MaxTokens | Self::Unknown => None,
            Self::Safety => Some("Content filtered by safety settings"),
            Self::Recitation => Some("Response blocked: recitation"),
            Self::Language => Some("Unsupported language"),
            Self::Blocklist => Some("Content contains blocked terms"),
            Self::ProhibitedContent => Some("Prohibited content detected"),
            Self::Spii => Some("Sensitive PII detected"),
            Self::Other => Some("Generation stopped: unknown reason"),
        }
    }
}
