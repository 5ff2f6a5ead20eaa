//! Generation backend client.
//!
//! # Architecture
//!
//! - [`GenerationClient`] - The seam the orchestrator calls through. One call, one
//!   outbound request, one [`GenerationResult`].
//! - [`gemini`] - Google Gemini implementation (GenerateContent API, non-streaming)
//! - [`gemini_types`] - Typed response payloads for the Gemini API
//!
//! # Error Handling
//!
//! Every failure mode of a call (transport, non-2xx status, blocked content,
//! unparseable or text-less body) is folded into a single [`GenerationError`].
//! Nothing is retried and no partial text is returned alongside an error.

pub mod gemini;
pub mod gemini_types;

pub use gemini::GeminiClient;
pub use notesmith_types;

use notesmith_types::{GenerationCredential, Prompt};
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const CONNECT_TIMEOUT_SECS: u64 = 30;

const TCP_KEEPALIVE_SECS: u64 = 60;

const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Outcome of a single generation call.
pub type GenerationResult = Result<String, GenerationError>;

/// Why a generation call produced no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request never completed: DNS, TLS, connection reset, unreadable body.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    /// The backend refused to produce content for this prompt.
    #[error("{reason}")]
    Blocked { reason: String },
    /// The backend answered 2xx but the body held no usable text.
    #[error("{0}")]
    MalformedResponse(String),
}

/// A backend that turns a prompt into generated text.
///
/// Implementations perform exactly one outbound call per invocation and never
/// retry. Credential validation is the caller's job: an empty secret is passed
/// through as-is.
pub trait GenerationClient {
    fn generate(
        &self,
        prompt: &Prompt,
        credential: &GenerationCredential,
    ) -> impl Future<Output = GenerationResult> + Send;
}

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!(
                "Failed to build hardened HTTP client: {e}. Attempting minimal hardened fallback."
            );
            minimal_client_builder()
                .build()
                .expect("Minimal hardened HTTP client must build; cannot proceed without TLS")
        })
    })
}

/// TLS-only, no redirects. Every client this crate builds starts here.
fn minimal_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .https_only(true)
        .redirect(reqwest::redirect::Policy::none())
}

fn base_client_builder() -> reqwest::ClientBuilder {
    // No total timeout: an outstanding call resolves on the transport's own terms.
    minimal_client_builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
}

pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

/// Pull a human-readable message out of an error body.
///
/// Google APIs wrap errors as `{"error": {"message": ...}}`; anything else is
/// returned trimmed, or as a placeholder when the body is empty.
#[must_use]
pub fn extract_error_message(body: &str) -> String {
    let trimmed = body.trim();
    let from_json = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|payload| {
            payload
                .pointer("/error/message")
                .or_else(|| payload.pointer("/message"))
                .and_then(|value| value.as_str())
                .map(ToString::to_string)
        });
    match from_json {
        Some(message) => message,
        None if trimmed.is_empty() => "empty response body".to_string(),
        None => trimmed.to_string(),
    }
}
