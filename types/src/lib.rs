//! Core domain types for notesmith.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod model;
pub use model::{EnumParseError, GeminiModel};

use std::fmt;
use std::ops::Deref;
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("prompt cannot be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ============================================================================
// Request Inputs
// ============================================================================

/// Free-form refinement instructions typed by the user.
///
/// Only constructible from non-blank text, so an empty submission is rejected
/// at the input boundary and can never reach prompt construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInstructions(NonEmptyString);

impl UserInstructions {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        NonEmptyString::new(value).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Text extracted from the active document. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotesContent(String);

impl NotesContent {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully rendered instruction prompt, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Wrap rendered template output. Callers outside the prompt builder
    /// should not need this except in tests.
    #[must_use]
    pub fn from_rendered(rendered: String) -> Self {
        Self(rendered)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// API Key Types
// ============================================================================

/// Gemini API key.
///
/// Note: `Debug` is manually implemented to redact the key value, preventing accidental
/// credential disclosure in logs or error messages.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "ApiKey(<empty>)")
        } else {
            write!(f, "ApiKey(<redacted>)")
        }
    }
}

impl ApiKey {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Whitespace-only keys count as missing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Everything a generation call needs to authenticate and route a request.
///
/// Cloned per request, so later configuration edits never reach a call that
/// is already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationCredential {
    api_key: ApiKey,
    model: GeminiModel,
}

impl GenerationCredential {
    #[must_use]
    pub fn new(api_key: ApiKey, model: GeminiModel) -> Self {
        Self { api_key, model }
    }

    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    #[must_use]
    pub const fn model(&self) -> GeminiModel {
        self.model
    }

    #[must_use]
    pub fn has_secret(&self) -> bool {
        !self.api_key.is_empty()
    }
}
