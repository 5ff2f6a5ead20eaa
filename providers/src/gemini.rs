//! Google Gemini API implementation.
//!
//! Communicates with `{base}/models/{model}:generateContent`. One request per
//! call, no streaming, no retry.

use crate::gemini_types as typed;
use crate::{
    GEMINI_API_BASE_URL, GenerationClient, GenerationError, GenerationResult,
    extract_error_message, http_client, read_capped_error_body,
};
use notesmith_types::{GeminiModel, GenerationCredential, Prompt};
use serde_json::{Value, json};

const MISSING_TEXT: &str = "Gemini API response text is undefined.";

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    /// Client against the production endpoint using the shared hardened HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: http_client().clone(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    /// Client against an alternate endpoint (proxies, mock servers).
    #[must_use]
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self, model: GeminiModel) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.model_id()
        )
    }
}

/// Build the content part for a text prompt.
fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

/// Build the request body: the whole prompt as a single user turn.
fn build_request_body(prompt: &Prompt) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [text_part(prompt.as_str())]
        }]
    })
}

/// Reduce a decoded response to its text, mirroring the SDK's `response.text`:
/// the non-thought text parts of the first candidate, concatenated.
///
/// Text that is present but empty is a success. Text that is absent is not.
fn extract_text(response: typed::Response) -> GenerationResult {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GenerationError::Blocked {
            reason: format!("Prompt blocked: {reason}"),
        });
    }

    let Some(candidate) = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
    else {
        return Err(GenerationError::MalformedResponse(
            "Gemini API response contained no candidates.".to_string(),
        ));
    };

    let texts: Vec<String> = candidate
        .content
        .and_then(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    if texts.is_empty() {
        let finish_error = candidate
            .finish_reason
            .as_deref()
            .map(typed::FinishReason::parse)
            .and_then(typed::FinishReason::error_message);
        return Err(match finish_error {
            Some(reason) => GenerationError::Blocked {
                reason: reason.to_string(),
            },
            None => GenerationError::MalformedResponse(MISSING_TEXT.to_string()),
        });
    }

    Ok(texts.concat())
}

impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &Prompt, credential: &GenerationCredential) -> GenerationResult {
        let model = credential.model();
        let url = self.endpoint(model);
        let body = build_request_body(prompt);

        tracing::info!(
            model = model.model_id(),
            prompt_bytes = prompt.len(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.api_key().expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%e, "Gemini request failed before a response arrived");
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = read_capped_error_body(response).await;
            let message = extract_error_message(&error_text);
            tracing::warn!(status = status.as_u16(), %message, "Gemini API returned an error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let decoded: typed::Response = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%e, body_bytes = bytes.len(), "Invalid Gemini response payload");
            GenerationError::MalformedResponse(format!("Invalid response payload: {e}"))
        })?;

        if let Some(usage) = decoded.usage_metadata.as_ref() {
            tracing::debug!(
                input_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        let text = extract_text(decoded)?;
        tracing::info!(text_bytes = text.len(), "Received Gemini response");
        Ok(text)
    }
}
