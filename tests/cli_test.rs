//! Integration tests for the langbatch binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &Path, api_url: &str, root: &Path) -> PathBuf {
    let path = dir.join("langbatch.yml");
    let content = format!(
        "system:\n  translated_applications:\n    intranet: [en]\n  paths:\n    root: {}\napi:\n  base_url: {}/api.php\n",
        root.display(),
        api_url
    );
    std::fs::write(&path, content).unwrap();
    path
}

async fn run_cli(args: Vec<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("langbatch")
            .unwrap()
            .env_remove("LANGBATCH_CONFIG")
            .args(&args)
            .assert()
    })
    .await
    .unwrap()
}

#[test]
fn test_missing_config_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("langbatch").unwrap();

    cmd.arg("--config")
        .arg(temp_dir.path().join("absent.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: Failed to load configuration"))
        .stdout(predicate::str::contains("File: src/main.rs"))
        .stdout(predicate::str::contains("Line: "));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_run_writes_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("action", "getLanguageFile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "data": "EN_PAYLOAD"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(query_param("action", "getAppletLanguages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "data": ["de"]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(query_param("action", "getAppletLanguageFile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "OK", "data": "<xml>de</xml>"})),
        )
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("app");
    let config = write_config(temp_dir.path(), &server.uri(), &root);

    run_cli(vec!["--config".into(), config.display().to_string()])
        .await
        .success()
        .stdout(predicate::str::contains("Error:").not());

    assert_eq!(
        std::fs::read_to_string(root.join("cache/intranet/en.php")).unwrap(),
        "EN_PAYLOAD"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("cache/flash/lang_de.xml")).unwrap(),
        "<xml>de</xml>"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generation_failure_prints_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ERROR", "data": false})),
        )
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), &server.uri(), &temp_dir.path().join("unused"));
    let root_override = temp_dir.path().join("override");

    run_cli(vec![
        "--config".into(),
        config.display().to_string(),
        "--root".into(),
        root_override.display().to_string(),
    ])
    .await
    .failure()
    .stdout(predicate::str::contains(
        "Error: Error during getting language file: (intranet/en): Wrong response:",
    ))
    .stdout(predicate::str::contains("File: src/application/language_batch.rs"))
    .stdout(predicate::str::contains("Line: "));

    assert!(!root_override.join("cache/intranet/en.php").exists());
}
