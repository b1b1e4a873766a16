// crates/cf_cli/tests/cli.rs
//
// Binary-level checks: exit codes, stdout reports, written artifacts.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const TS: &str = "2025-08-12T10:00:00Z";

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(rel)
}

fn footprint() -> Command {
    let mut cmd = Command::cargo_bin("footprint").unwrap();
    cmd.env_remove("FOOTPRINT_LOG");
    cmd
}

#[test]
fn text_report_for_reference_household() {
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .args(["--render", "text", "--timestamp", TS, "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- Carbon Footprint Report ---\n"))
        .stdout(predicate::str::contains("Food: 2305.97 kg CO2e/year (21.1%)"))
        .stdout(predicate::str::contains("Travel: 6065.12 kg CO2e/year (55.4%)"))
        .stdout(predicate::str::contains("Total Annual Footprint: 10945.27 kg CO2e/year"))
        .stdout(predicate::str::contains("Which is equivalent to 10.95 tonnes of CO2e per year."));
}

#[test]
fn json_report_is_parseable() {
    let out = footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .args(["--render", "json", "--timestamp", TS])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["total"]["kg"], serde_json::json!(10945.27));
    assert_eq!(v["dominant"], "travel");
}

#[test]
fn out_dir_receives_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .arg("--out")
        .arg(dir.path())
        .args(["--timestamp", TS])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let result: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("result.json")).unwrap()).unwrap();
    let run: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("run_record.json")).unwrap()).unwrap();
    assert!(result["id"].as_str().unwrap().starts_with("RES:"));
    assert_eq!(run["outputs"]["result_id"], result["id"]);
    assert_eq!(run["timestamp_utc"], TS);
}

#[test]
fn same_inputs_same_bytes() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for dir in [&a, &b] {
        footprint()
            .arg("--answers")
            .arg(fixture("answers/reference.json"))
            .arg("--out")
            .arg(dir.path())
            .args(["--timestamp", TS, "--quiet"])
            .assert()
            .success();
    }
    for name in ["result.json", "run_record.json"] {
        assert_eq!(fs::read(a.path().join(name)).unwrap(), fs::read(b.path().join(name)).unwrap());
    }
}

#[test]
fn unknown_label_lenient_ok_strict_fails() {
    footprint()
        .arg("--answers")
        .arg(fixture("answers/bad_label.json"))
        .args(["--timestamp", TS])
        .assert()
        .code(0);

    footprint()
        .arg("--answers")
        .arg(fixture("answers/bad_label.json"))
        .args(["--strict-labels", "--timestamp", TS])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Coal"));
}

#[test]
fn validate_only_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .arg("--out")
        .arg(dir.path())
        .arg("--validate-only")
        .assert()
        .success()
        .stderr(predicate::str::contains("validate-only: inputs OK"));
    assert!(!dir.path().join("result.json").exists());
}

#[test]
fn bad_factor_table_is_validation() {
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .arg("--factors")
        .arg(fixture("factors/incomplete.json"))
        .assert()
        .code(2);
}

#[test]
fn flag_errors_are_validation() {
    footprint().assert().code(2);
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .arg("--energy")
        .arg(fixture("energy/sample.json"))
        .assert()
        .code(2);
    footprint()
        .args(["--answers", "https://example.org/answers.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
}

#[test]
fn missing_file_is_io() {
    footprint()
        .arg("--answers")
        .arg(fixture("answers/missing.json"))
        .assert()
        .code(4);
}

#[test]
fn energy_summary_text_and_file() {
    let dir = tempfile::tempdir().unwrap();
    footprint()
        .arg("--energy")
        .arg(fixture("energy/sample.json"))
        .arg("--out")
        .arg(dir.path())
        .args(["--render", "text", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("True consumption: 765.70 kWh"))
        .stdout(predicate::str::contains("EV share: 36.63%"));

    let v: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("energy_use.json")).unwrap()).unwrap();
    assert_eq!(v["true_consumption_kwh"], serde_json::json!(765.7));
}

#[test]
fn zero_odometer_is_domain_error() {
    footprint()
        .arg("--energy")
        .arg(fixture("energy/zero_odometer.json"))
        .assert()
        .code(5)
        .stderr(predicate::str::contains("odometer_km"));
}

#[test]
fn half_cent_household_passes_self_verify() {
    let dir = tempfile::tempdir().unwrap();
    footprint()
        .arg("--answers")
        .arg(fixture("answers/half_cent.json"))
        .arg("--out")
        .arg(dir.path())
        .args(["--render", "text", "--timestamp", TS, "--quiet"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Total Annual Footprint: "));

    let result: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("result.json")).unwrap()).unwrap();
    let b = &result["breakdown"];
    let sum: f64 = ["food", "travel", "home", "stuff"].iter().map(|k| b[*k].as_f64().unwrap()).sum();
    let total = result["total"].as_f64().unwrap();
    assert!((total - (sum * 100.0).round() / 100.0).abs() < 1e-9, "{result}");
}

#[test]
fn offset_timestamp_is_stored_as_utc() {
    let stamp = "2025-08-12T12:00:00+02:00";
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .args(["--timestamp", stamp, "--validate-only", "--quiet"])
        .assert()
        .code(0);

    let dir = tempfile::tempdir().unwrap();
    footprint()
        .arg("--answers")
        .arg(fixture("answers/reference.json"))
        .arg("--out")
        .arg(dir.path())
        .args(["--timestamp", stamp, "--quiet"])
        .assert()
        .code(0);
    let run: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("run_record.json")).unwrap()).unwrap();
    assert_eq!(run["timestamp_utc"], TS);
    assert!(run["id"].as_str().unwrap().starts_with("RUN:2025-08-12T10:00:00Z:"));
}
