//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use notesmith_engine::{
    GeminiClient, GeminiModel, InputCollector, InputOutcome, Notice, NotificationSink,
    PersistentNoticeId, UserInstructions,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `generateContent` path for a model, relative to the mock server root.
pub fn generate_path(model: GeminiModel) -> String {
    format!("/models/{}:generateContent", model.model_id())
}

/// Gemini client pointed at a mock server.
pub fn gemini_client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url(reqwest::Client::new(), server.uri())
}

/// A successful `generateContent` body with one text part.
pub fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 20,
            "totalTokenCount": 30
        }
    })
}

/// Mount a successful response for `model`, expected exactly `times` times.
pub async fn mount_gemini_text(server: &MockServer, model: GeminiModel, text: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(generate_path(model)))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(text)))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a Google-style JSON error.
pub async fn mount_gemini_error(server: &MockServer, model: GeminiModel, status: u16, message: &str) {
    let body = serde_json::json!({
        "error": {
            "code": status,
            "message": message,
            "status": "INVALID_ARGUMENT"
        }
    });

    Mock::given(method("POST"))
        .and(path(generate_path(model)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Input collector that replays scripted answers, cancelling once exhausted.
pub struct ScriptedInput {
    outcomes: VecDeque<InputOutcome>,
}

impl ScriptedInput {
    pub fn submitting(text: &str) -> Self {
        Self {
            outcomes: VecDeque::from([InputOutcome::Submitted(
                UserInstructions::new(text).unwrap(),
            )]),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcomes: VecDeque::new(),
        }
    }
}

impl InputCollector for ScriptedInput {
    fn collect(&mut self, _notices: &mut dyn NotificationSink) -> InputOutcome {
        self.outcomes.pop_front().unwrap_or(InputOutcome::Cancelled)
    }
}

/// Notification sink that records everything it is asked to show.
#[derive(Default)]
pub struct RecordingNotices {
    pub notified: Vec<Notice>,
    pub shown: Vec<Notice>,
    pub dismissed: Vec<PersistentNoticeId>,
}

impl NotificationSink for RecordingNotices {
    fn notify(&mut self, notice: &Notice) {
        self.notified.push(notice.clone());
    }

    fn show_persistent(&mut self, notice: &Notice) -> PersistentNoticeId {
        self.shown.push(notice.clone());
        PersistentNoticeId::new(self.shown.len() as u64)
    }

    fn dismiss(&mut self, id: PersistentNoticeId) {
        self.dismissed.push(id);
    }
}
