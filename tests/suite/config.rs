//! Configuration store tests

use std::fs;

use notesmith_config::{NotesmithConfig, persist_gemini_value};
use notesmith_types::GeminiModel;

#[test]
fn persisted_values_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    persist_gemini_value(&path, "api_key", "from-file").unwrap();
    persist_gemini_value(&path, "model", GeminiModel::Pro.model_id()).unwrap();

    let config = NotesmithConfig::load_from(&path).unwrap().unwrap();
    let credential = config.credential();
    assert_eq!(credential.api_key().expose_secret(), "from-file");
    assert_eq!(credential.model(), GeminiModel::Pro);
}

#[test]
fn persisting_keeps_user_comments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "# my notes setup\n[gemini]\nmodel = \"flash\" # fast one\n",
    )
    .unwrap();

    persist_gemini_value(&path, "api_key", "k").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("# my notes setup"));
    assert!(raw.contains("# fast one"));
    assert!(raw.contains("api_key = \"k\""));
}

#[test]
fn unknown_model_falls_back_to_flash() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[gemini]\napi_key = \"k\"\nmodel = \"gemini-ultra\"\n").unwrap();

    let config = NotesmithConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(config.model(), GeminiModel::Flash);
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = NotesmithConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[gemini\napi_key = ").unwrap();

    let err = NotesmithConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), Some(path.as_path()));
}
