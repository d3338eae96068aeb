use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

#[allow(deprecated)]
fn buildplan_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("buildplan").unwrap();
    cmd.env("BUILDPLAN_HOME", home)
        .env_remove("BUILDPLAN_MANIFEST")
        .env_remove("RUST_LOG");
    cmd
}

/// Copy a fixture into a fresh project directory as `buildplan.toml`.
fn project_with(fixture: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::copy(
        fixtures_dir().join(fixture),
        tmp.path().join("buildplan.toml"),
    )
    .unwrap();
    tmp
}

const WARNING_MANIFEST: &str = r#"
[application]
id = "com.example.warn"

[sdk]
compile = 34

[defaults]
signing-fallback = "debug"

[[signing]]
name = "debug"

[[variant]]
name = "release"

[[dependency]]
platform = "com.google.firebase:firebase-bom:32.7.0"

[[dependency]]
library = "com.google.firebase:firebase-auth:22.0.0"
"#;

#[test]
fn test_plan_release_prints_resolved_json() {
    let project = project_with("freeproxy.toml");

    let output = buildplan_cmd(project.path())
        .current_dir(project.path())
        .args(["plan", "release"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Planning"))
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["variant"]["variant"], "release");
    assert_eq!(json["variant"]["signing"]["value"], "debug");
    assert_eq!(json["variant"]["signing"]["provenance"], "inherited");
    assert_eq!(json["dependencies"][1]["version"], "32.7.0");
}

#[test]
fn test_plan_with_explicit_manifest_path() {
    let tmp = TempDir::new().unwrap();

    buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "debug", "--manifest"])
        .arg(fixtures_dir().join("freeproxy.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"debuggable\""));
}

#[test]
fn test_plan_prints_fingerprint() {
    let project = project_with("freeproxy.toml");

    buildplan_cmd(project.path())
        .current_dir(project.path())
        .args(["plan", "release", "--fingerprint"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Fingerprint"));
}

#[test]
fn test_plan_unknown_variant_fails() {
    let project = project_with("freeproxy.toml");

    buildplan_cmd(project.path())
        .current_dir(project.path())
        .args(["plan", "profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown variant `profile`"));
}

#[test]
fn test_plan_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "release"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_plan_reports_warnings_and_continues() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("buildplan.toml"), WARNING_MANIFEST).unwrap();

    buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "release"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("22.0.0"));
}

#[test]
fn test_plan_reports_each_warning_once() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("buildplan.toml"), WARNING_MANIFEST).unwrap();

    let output = buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "release"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8_lossy(&output);
    assert_eq!(stderr.matches("explicit 22.0.0 overrides 32.7.0").count(), 1);
}

#[test]
fn test_plan_deny_warnings_flag_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("buildplan.toml"), WARNING_MANIFEST).unwrap();

    buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "release", "--deny-warnings"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_plan_deny_warnings_from_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("buildplan.toml"), WARNING_MANIFEST).unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[policy]\ndeny-warnings = true\n",
    )
    .unwrap();

    buildplan_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["plan", "release"])
        .assert()
        .failure();
}
