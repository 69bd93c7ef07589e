use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_chartdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run_json(args: &[&str]) -> Vec<Value> {
    let assert = cmd().args(args).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str::<Vec<Value>>(&stdout).unwrap()
}

fn record<'a>(records: &'a [Value], name: &str) -> &'a Value {
    records
        .iter()
        .find(|r| r["name"] == name)
        .unwrap_or_else(|| panic!("no record named {name}"))
}

// -- extraction --

#[test]
fn records_follow_declaration_order() {
    let records = run_json(&["--values", &fixture_path("values.yaml")]);
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "global.imageRegistry",
            "global.storageClass",
            "replicaCount",
            "image.repository",
            "image.tag",
            "image.pullSecrets",
            "service.ports[0].name",
            "service.ports[0].port",
            "service.extraPorts",
            "podLabels",
            "redis.enabled",
        ]
    );
}

#[test]
fn values_types_and_sections() {
    let records = run_json(&["--values", &fixture_path("values.yaml")]);

    let replicas = record(&records, "replicaCount");
    assert_eq!(replicas["value"], 3);
    assert_eq!(replicas["type"], "number");
    assert_eq!(replicas["section"], "Common parameters");

    let secrets = record(&records, "image.pullSecrets");
    assert_eq!(secrets["type"], "array");
    assert_eq!(
        secrets["value"],
        serde_json::json!(["registry-secret", "mirror-secret"])
    );

    let storage = record(&records, "global.storageClass");
    assert_eq!(storage["value"], "nil");
    assert_eq!(storage["modifier"], "nullable");

    assert_eq!(record(&records, "image.tag")["value"], "latest");
    assert_eq!(record(&records, "redis.enabled")["section"], "Redis parameters");
}

#[test]
fn skip_and_extra_flags() {
    let records = run_json(&["--values", &fixture_path("values.yaml")]);

    let skipped = record(&records, "podLabels");
    assert_eq!(skipped["skip"], true);
    assert!(skipped.get("value").is_none());

    let extra = record(&records, "service.extraPorts");
    assert_eq!(extra["extra"], true);
    assert_eq!(extra["value"], "");
    assert_eq!(extra["section"], "Common parameters");
}

#[test]
fn custom_comment_format() {
    let records = run_json(&[
        "--values",
        &fixture_path("scaling.yaml"),
        "--config",
        &fixture_path("hash-config.json"),
    ]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "replicaCount");
    assert_eq!(records[0]["section"], "Scaling");
    assert_eq!(records[0]["description"], "Number of replicas");
    assert_eq!(records[0]["value"], 3);
    assert_eq!(records[0]["type"], "number");
}

#[test]
fn default_format_ignores_single_hash() {
    let records = run_json(&["--values", &fixture_path("scaling.yaml")]);
    assert!(records.is_empty());
}

#[test]
fn output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("params.json");

    cmd()
        .args(["--values", &fixture_path("values.yaml")])
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.len(), 11);
}

// -- check --

#[test]
fn check_passes_when_in_sync() {
    cmd()
        .args(["--values", &fixture_path("values.yaml"), "--check"])
        .assert()
        .success();
}

#[test]
fn check_reports_both_directions() {
    cmd()
        .args(["--values", &fixture_path("unsynced.yaml"), "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing metadata for key: undocumented"))
        .stderr(predicate::str::contains("missing value for metadata: stale"));
}

#[test]
fn unsynced_without_check_still_succeeds() {
    let records = run_json(&["--values", &fixture_path("unsynced.yaml")]);
    assert_eq!(records.len(), 2);
    assert!(record(&records, "stale").get("value").is_none());
}

// -- dependencies --

#[test]
fn non_http_dependencies_are_skipped() {
    let records = run_json(&[
        "--values",
        &fixture_path("values.yaml"),
        "--chart",
        &fixture_path("Chart.yaml"),
    ]);
    assert_eq!(records.len(), 11);
    assert!(records.iter().all(|r| r["name"] != "redis"));
}

// -- errors --

#[test]
fn missing_values_file() {
    cmd()
        .args(["--values", "/nonexistent/values.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read /nonexistent/values.yaml"));
}

#[test]
fn malformed_yaml() {
    cmd()
        .args(["--values", &fixture_path("broken.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid YAML"));
}

#[test]
fn malformed_config() {
    let mut config = NamedTempFile::new().unwrap();
    config.write_all(b"{ \"comments\": ").unwrap();

    cmd()
        .args(["--values", &fixture_path("values.yaml")])
        .args(["--config", config.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn invalid_tag_pattern() {
    let mut config = NamedTempFile::new().unwrap();
    config
        .write_all(br#"{ "tags": { "section": "@section(" } }"#)
        .unwrap();

    cmd()
        .args(["--values", &fixture_path("values.yaml")])
        .args(["--config", config.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag `section` does not form a valid pattern"));
}
