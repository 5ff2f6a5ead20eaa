//! Domain type tests

use notesmith_types::{ApiKey, GeminiModel, GenerationCredential, NotesContent, UserInstructions};

#[test]
fn model_parse_aliases() {
    assert_eq!(GeminiModel::parse("flash").unwrap(), GeminiModel::Flash);
    assert_eq!(GeminiModel::parse("PRO").unwrap(), GeminiModel::Pro);
    assert_eq!(
        GeminiModel::parse("gemini-2.5-pro-preview-05-06").unwrap(),
        GeminiModel::Pro
    );
    assert!(GeminiModel::parse("gemini-1.0").is_err());
    assert!(GeminiModel::parse("").is_err());
}

#[test]
fn flash_is_the_default_model() {
    assert_eq!(GeminiModel::default(), GeminiModel::Flash);
    assert_eq!(
        GeminiModel::default().model_id(),
        "gemini-2.5-flash-preview-04-17"
    );
}

#[test]
fn blank_instructions_are_unrepresentable() {
    assert!(UserInstructions::new("").is_err());
    assert!(UserInstructions::new(" \t\n").is_err());
    assert!(UserInstructions::new("Summarize").is_ok());
}

#[test]
fn empty_notes_are_valid() {
    assert!(NotesContent::new("").is_empty());
}

#[test]
fn credential_debug_never_shows_the_key() {
    let credential = GenerationCredential::new(ApiKey::new("super-secret"), GeminiModel::Pro);
    let debug = format!("{credential:?}");
    assert!(!debug.contains("super-secret"));
    assert!(credential.has_secret());
}
