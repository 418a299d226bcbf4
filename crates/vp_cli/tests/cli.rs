use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn vp() -> Command {
    let mut cmd = Command::cargo_bin("vp").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_scenario(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let p = dir.path().join("scenario.json");
    fs::write(&p, body).unwrap();
    p
}

#[test]
fn builtin_with_presets_as_text() {
    vp().assert()
        .success()
        .stdout(predicate::str::contains("Harris Paths: 71 (55.5%)"))
        .stdout(predicate::str::contains("Tie Paths: 3 (2.3%)"))
        .stdout(predicate::str::contains("Trump Paths: 54 (42.2%)"))
        .stdout(predicate::str::contains("Paths remaining: 128"));
}

#[test]
fn no_presets_json_covers_whole_universe() {
    let out = vp().args(["--no-presets", "--render", "json", "--quiet"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["rows"].as_array().unwrap().len(), 1024);
    assert_eq!(v["summary"]["remaining"], 1024);
    assert_eq!(v["summary"]["a"]["count"], 710);
    assert_eq!(v["pins"].as_array().unwrap().len(), 0);
}

#[test]
fn pins_and_outcome_filter() {
    vp().args(["--pin", "Pennsylvania=a", "--outcome", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pinned: NE-02=a, Pennsylvania=a, Texas=b, Virginia=a"))
        .stdout(predicate::str::contains("Trump Paths: 13 (100.0%)"))
        .stdout(predicate::str::contains("Paths remaining: 13"));
}

#[test]
fn unknown_pinned_region_is_validation_error() {
    vp().args(["--pin", "Ohio=a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown region: Ohio"));
}

#[test]
fn bad_flag_values_are_usage_errors() {
    vp().args(["--pin", "Georgia=c"]).assert().code(2);
    vp().args(["--outcome", "maybe"]).assert().code(2);
    vp().args(["--scenario", "https://example.org/s.json"]).assert().code(2);
}

#[test]
fn missing_scenario_file_is_io_error() {
    vp().args(["--scenario", "/definitely/not/here.json"]).assert().code(4);
}

#[test]
fn invalid_scenario_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(
        &dir,
        r#"{"schema_version":"1","candidates":{"a":{"label":"A","base":1},"b":{"label":"B","base":1}},
            "regions":[{"name":"X","weight":3},{"name":"X","weight":4}]}"#,
    );
    vp().arg("--scenario").arg(&p).assert().code(2);
}

#[test]
fn validate_only_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_scenario(
        &dir,
        r#"{"schema_version":"1","title":"Small","candidates":{"a":{"label":"A","base":260},"b":{"label":"B","base":259}},
            "regions":[{"name":"X","weight":10},{"name":"Y","weight":1}],
            "presets":[{"region":"Y","candidate":"b"}]}"#,
    );
    vp().arg("--scenario")
        .arg(&p)
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok: Small (2 regions, 4 outcomes, 1 presets) sha256:"));
}

#[test]
fn html_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.html");
    vp().args(["--render", "html", "--quiet", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("Paths remaining: 128"));
}

#[test]
fn logs_go_to_stderr_only() {
    vp().args(["--no-presets"])
        .env("RUST_LOG", "vp=info")
        .assert()
        .success()
        .stderr(predicate::str::contains("universe generated"))
        .stderr(predicate::str::contains("pool=538"))
        .stdout(predicate::str::contains("universe generated").not());
}
