//! Gemini client behavior over HTTP.

use notesmith_engine::{
    ApiKey, GeminiModel, GenerationClient, GenerationCredential, GenerationError, Prompt,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{gemini_client, generate_path};

fn credential() -> GenerationCredential {
    GenerationCredential::new(ApiKey::new("k"), GeminiModel::Flash)
}

fn prompt() -> Prompt {
    Prompt::from_rendered("refine these notes".to_string())
}

async fn respond_with(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(generate_path(GeminiModel::Flash)))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
    )
    .await;

    let err = gemini_client(&server)
        .generate(&prompt(), &credential())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::Api {
            status: 500,
            message: "upstream exploded".to_string()
        }
    );
}

#[tokio::test]
async fn safety_block_is_reported() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })),
    )
    .await;

    let err = gemini_client(&server)
        .generate(&prompt(), &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Blocked { .. }));
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn candidate_without_text_is_malformed_not_empty() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": []}, "finishReason": "STOP"}]
        })),
    )
    .await;

    let err = gemini_client(&server)
        .generate(&prompt(), &credential())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::MalformedResponse("Gemini API response text is undefined.".to_string())
    );
}

#[tokio::test]
async fn multi_part_text_is_joined() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "reasoning", "thought": true},
                    {"text": "# Notes\n"},
                    {"text": "- point"}
                ]}
            }]
        })),
    )
    .await;

    let text = gemini_client(&server)
        .generate(&prompt(), &credential())
        .await
        .unwrap();

    assert_eq!(text, "# Notes\n- point");
}
