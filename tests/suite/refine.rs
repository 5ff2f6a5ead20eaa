//! The `refine` command against a real file and a mock Gemini backend.

use std::fs;
use std::path::PathBuf;

use notesmith_cli::commands::{RefineArgs, refine_with};
use notesmith_cli::document::LineRange;
use notesmith_engine::{
    ApiKey, GeminiModel, GenerationCredential, GenerationError, Notice, OrchestrationError,
    RequestOutcome,
};
use wiremock::MockServer;

use crate::common::{
    RecordingNotices, ScriptedInput, gemini_client, mount_gemini_error, mount_gemini_text,
};

const DRAFT: &str = "title\nthe sky is blue\nthe grass is green\n";

fn credential() -> GenerationCredential {
    GenerationCredential::new(ApiKey::new("refine-key"), GeminiModel::Flash)
}

fn args(file: PathBuf, lines: Option<LineRange>) -> RefineArgs {
    RefineArgs {
        file,
        lines,
        instructions: None,
    }
}

fn draft(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("notes.md");
    fs::write(&path, DRAFT).unwrap();
    path
}

#[tokio::test]
async fn applied_result_is_saved_to_disk() {
    let server = MockServer::start().await;
    mount_gemini_text(&server, GeminiModel::Flash, "# Colors\n- sky: blue", 1).await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();

    let outcome = refine_with(
        args(path.clone(), Some(LineRange { start: 2, end: 2 })),
        credential(),
        gemini_client(&server),
        &mut ScriptedInput::submitting("Summarize"),
        &mut notices,
    )
    .await
    .unwrap();

    assert_eq!(outcome, RequestOutcome::Applied);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# Colors\n- sky: blue");
    assert_eq!(notices.notified, vec![Notice::ResponseApplied]);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("the sky is blue"));
    assert!(!prompt.contains("the grass is green"));
}

#[tokio::test]
async fn empty_result_leaves_file_alone() {
    let server = MockServer::start().await;
    mount_gemini_text(&server, GeminiModel::Flash, "", 1).await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();

    let outcome = refine_with(
        args(path.clone(), None),
        credential(),
        gemini_client(&server),
        &mut ScriptedInput::submitting("Summarize"),
        &mut notices,
    )
    .await
    .unwrap();

    assert_eq!(outcome, RequestOutcome::EmptyResult);
    assert!(!outcome.is_failure());
    assert_eq!(fs::read_to_string(&path).unwrap(), DRAFT);
    assert_eq!(notices.notified, vec![Notice::EmptyResponse]);
}

#[tokio::test]
async fn server_error_fails_without_writing() {
    let server = MockServer::start().await;
    mount_gemini_error(&server, GeminiModel::Flash, 500, "Internal error").await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();

    let outcome = refine_with(
        args(path.clone(), None),
        credential(),
        gemini_client(&server),
        &mut ScriptedInput::submitting("Summarize"),
        &mut notices,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        RequestOutcome::Failed(OrchestrationError::Generation(GenerationError::Api {
            status: 500,
            message: "Internal error".to_string(),
        }))
    );
    assert!(outcome.is_failure());
    assert_eq!(fs::read_to_string(&path).unwrap(), DRAFT);
}

#[tokio::test]
async fn cancelled_input_makes_no_request() {
    let server = MockServer::start().await;
    mount_gemini_text(&server, GeminiModel::Flash, "never", 0).await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();

    let outcome = refine_with(
        args(path.clone(), None),
        credential(),
        gemini_client(&server),
        &mut ScriptedInput::cancelling(),
        &mut notices,
    )
    .await
    .unwrap();

    assert_eq!(outcome, RequestOutcome::Cancelled);
    assert!(!outcome.is_failure());
    assert_eq!(fs::read_to_string(&path).unwrap(), DRAFT);
    assert!(notices.shown.is_empty());
}

#[tokio::test]
async fn missing_key_is_reported_before_the_file_is_read() {
    let server = MockServer::start().await;
    mount_gemini_text(&server, GeminiModel::Flash, "never", 0).await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();
    let no_key = GenerationCredential::new(ApiKey::new(""), GeminiModel::Flash);

    let outcome = refine_with(
        args(path.clone(), Some(LineRange { start: 40, end: 50 })),
        no_key,
        gemini_client(&server),
        &mut ScriptedInput::submitting("Summarize"),
        &mut notices,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        RequestOutcome::Failed(OrchestrationError::MissingCredential)
    );
    assert_eq!(notices.notified, vec![Notice::MissingApiKey]);
    assert_eq!(fs::read_to_string(&path).unwrap(), DRAFT);
}

#[tokio::test]
async fn out_of_range_lines_are_an_error_with_a_key() {
    let server = MockServer::start().await;
    mount_gemini_text(&server, GeminiModel::Flash, "never", 0).await;
    let dir = tempfile::tempdir().unwrap();
    let path = draft(&dir);
    let mut notices = RecordingNotices::default();

    let err = refine_with(
        args(path.clone(), Some(LineRange { start: 40, end: 50 })),
        credential(),
        gemini_client(&server),
        &mut ScriptedInput::submitting("Summarize"),
        &mut notices,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("has no line 40"));
    assert!(notices.notified.is_empty());
}
