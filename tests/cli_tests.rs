//! Runs the binary end to end inside a scratch working directory

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn datagen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("datagen").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn read_json(path: std::path::PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn assert_last_run_is_rfc3339(config: &serde_json::Value) {
    let last_run = config["last_run"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(last_run).unwrap();
    let age = chrono::Utc::now().signed_duration_since(parsed);
    assert!(age.num_seconds().abs() < 600, "stale last_run: {}", last_run);
}

#[test]
fn test_first_run_without_config() {
    let dir = TempDir::new().unwrap();

    datagen(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("count: 10"))
        .stdout(predicate::str::contains("mean: "));

    assert!(dir.path().join("data").is_dir());
    assert!(dir.path().join("logs").is_dir());

    let data = read_json(dir.path().join("data/output.json"));
    let values = data.as_array().unwrap();
    assert_eq!(values.len(), 10);
    assert!(values
        .iter()
        .all(|v| (0..=100).contains(&v.as_i64().unwrap())));

    let config = read_json(dir.path().join("config.json"));
    assert_last_run_is_rfc3339(&config);
}

#[test]
fn test_empty_dataset_logs_no_data() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"data_size": 0, "output_file": "empty.json"}"#,
    )
    .unwrap();

    datagen(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("no data to analyze"))
        .stdout(predicate::str::contains("count:").not());

    assert_eq!(
        fs::read_to_string(dir.path().join("data/empty.json")).unwrap(),
        "[]"
    );
    let config = read_json(dir.path().join("config.json"));
    assert_eq!(config["data_size"], 0);
    assert_eq!(config["output_file"], "empty.json");
    assert_last_run_is_rfc3339(&config);
}

#[test]
fn test_seed_makes_runs_reproducible() {
    let dir = TempDir::new().unwrap();

    datagen(&dir).args(["--seed", "1234"]).assert().success();
    let first = fs::read_to_string(dir.path().join("data/output.json")).unwrap();
    datagen(&dir).args(["--seed", "1234"]).assert().success();
    let second = fs::read_to_string(dir.path().join("data/output.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_custom_config_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("alt.json"), r#"{"data_size": 3}"#).unwrap();

    datagen(&dir)
        .args(["--config", "alt.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("count: 3"));

    assert!(!dir.path().join("config.json").exists());
    assert_last_run_is_rfc3339(&read_json(dir.path().join("alt.json")));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{ data_size: ").unwrap();

    datagen(&dir)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("failed to load config"));

    assert_eq!(
        fs::read_to_string(dir.path().join("config.json")).unwrap(),
        "{ data_size: "
    );
}

#[test]
fn test_output_file_outside_data_dir_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"output_file": "../outside.json"}"#,
    )
    .unwrap();

    datagen(&dir).assert().failure();
    assert!(!dir.path().join("outside.json").exists());
}

#[test]
fn test_offsetless_last_run_from_older_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"data_size": 2, "last_run": "2024-05-01T10:00:00.123456"}"#,
    )
    .unwrap();

    datagen(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("count: 2"));

    assert_last_run_is_rfc3339(&read_json(dir.path().join("config.json")));
}

#[test]
fn test_oversized_dataset_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"data_size": 2000000000000000000}"#,
    )
    .unwrap();

    datagen(&dir)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("cannot allocate a dataset"));
}
