use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const SINGLE_CHART: &str = r#"{
  "fixture": "Worked example",
  "tables": [
    {
      "description": "ceiling 70, wall 50, floor 20",
      "ceilingReflectance": 70,
      "wallReflectance": 50,
      "floorReflectance": 20,
      "cuValues": [ { "rcr": 1, "cu": 0.65 }, { "rcr": 2, "cu": 0.55 } ]
    }
  ]
}"#;

#[allow(deprecated)]
fn lumen(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lumen").expect("binary");
    cmd.current_dir(workdir).env_remove("LUMEN_CONFIG");
    cmd
}

fn workspace_with_chart() -> TempDir {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("chart.json"), SINGLE_CHART).expect("write chart");
    temp
}

fn run_json(workdir: &Path, args: &[&str]) -> (bool, Value) {
    let output = lumen(workdir).args(args).output().expect("run lumen");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

#[test]
fn lookup_interpolates_from_catalog_file() {
    let temp = workspace_with_chart();
    let (ok, body) = run_json(
        temp.path(),
        &[
            "lookup", "--catalog", "chart.json", "--ceiling", "70", "--wall", "50", "--floor",
            "20", "--rcr", "1.5", "--json",
        ],
    );
    assert!(ok, "{body}");
    assert_eq!(body["status"], "ok");
    let cu = body["data"]["cu"].as_f64().expect("cu");
    assert!((cu - 0.60).abs() < 1e-9, "{cu}");
    assert_eq!(body["data"]["flags"], serde_json::json!(["interpolated"]));
}

#[test]
fn lookup_reports_nearest_chart() {
    let temp = workspace_with_chart();
    let (ok, body) = run_json(
        temp.path(),
        &[
            "lookup", "--catalog", "chart.json", "--ceiling", "80", "--wall", "50", "--floor",
            "20", "--rcr", "1", "--json",
        ],
    );
    assert!(ok, "{body}");
    assert_eq!(body["data"]["cu"], 0.65);
    assert_eq!(body["data"]["table"]["ceiling"], 70);
    assert_eq!(
        body["data"]["flags"],
        serde_json::json!(["exact", "reflectance-approximated"])
    );
}

#[test]
fn lookup_text_output_warns_on_extrapolation() {
    let temp = workspace_with_chart();
    lumen(temp.path())
        .args([
            "lookup", "--catalog", "chart.json", "--ceiling", "70", "--wall", "50", "--floor",
            "20", "--rcr", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CU 0.650 (extrapolated)"))
        .stdout(predicate::str::contains("clamped to row 1"));
}

#[test]
fn fail_on_extrapolation_flag_fails_with_result_attached() {
    let temp = workspace_with_chart();
    let (ok, body) = run_json(
        temp.path(),
        &[
            "lookup", "--catalog", "chart.json", "--ceiling", "70", "--wall", "50", "--floor",
            "20", "--rcr", "4", "--fail-on-extrapolation", "--json",
        ],
    );
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("outside the chart rows 1..=2"));
    assert_eq!(body["data"]["cu"], 0.55);
}

#[test]
fn config_policy_applies_without_flags() {
    let temp = workspace_with_chart();
    fs::write(
        temp.path().join("lumen.toml"),
        "schema_version = 1\ncatalog = \"chart.json\"\n\n[lookup]\nfail_on_approximation = true\n",
    )
    .expect("write config");

    let (ok, body) = run_json(
        temp.path(),
        &[
            "lookup", "--ceiling", "80", "--wall", "50", "--floor", "20", "--rcr", "1", "--json",
        ],
    );
    assert!(!ok);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("nearest is 70/50/20"));
}

#[test]
fn invalid_config_is_reported_as_json_error() {
    let temp = workspace_with_chart();
    fs::write(temp.path().join("lumen.toml"), "catalgo = \"chart.json\"\n").expect("write");

    let (ok, body) = run_json(temp.path(), &["tables", "--json"]);
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("catalgo"));
}

#[test]
fn room_dimensions_use_bundled_chart_by_default() {
    let temp = tempdir().expect("tempdir");
    let (ok, body) = run_json(
        temp.path(),
        &[
            "lookup", "--ceiling", "70", "--wall", "50", "--floor", "20", "--room", "40x20x6",
            "--json",
        ],
    );
    assert!(ok, "{body}");
    assert_eq!(body["data"]["rcr"], 2.25);
    let cu = body["data"]["cu"].as_f64().expect("cu");
    assert!((cu - 0.805).abs() < 1e-9, "{cu}");
}

#[test]
fn validate_rejects_duplicate_triples() {
    let temp = tempdir().expect("tempdir");
    fs::write(
        temp.path().join("dup.json"),
        r#"{"tables": [
            {"ceilingReflectance": 80, "wallReflectance": 50, "floorReflectance": 20,
             "cuValues": [{"rcr": 0, "cu": 0.9}]},
            {"ceilingReflectance": 80, "wallReflectance": 50, "floorReflectance": 20,
             "cuValues": [{"rcr": 0, "cu": 0.8}]}
        ]}"#,
    )
    .expect("write");

    lumen(temp.path())
        .args(["validate", "dup.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate reflectance triple 80/50/20"));
}

#[test]
fn validate_summarizes_catalog() {
    let temp = workspace_with_chart();
    let (ok, body) = run_json(temp.path(), &["validate", "chart.json", "--json"]);
    assert!(ok, "{body}");
    assert_eq!(body["data"]["fixture"], "Worked example");
    assert_eq!(body["data"]["table_count"], 1);
    assert_eq!(body["data"]["tables"][0]["monotonic"], true);
}

#[test]
fn encode_then_decode_through_the_cli() {
    let temp = workspace_with_chart();
    let output = lumen(temp.path())
        .args([
            "encode", "--catalog", "chart.json", "--ceiling", "70", "--wall", "50", "--floor",
            "20",
        ])
        .output()
        .expect("encode");
    assert!(output.status.success());
    let encoded = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(encoded.trim(), r#"{"v":1,"values":[[1,0.65],[2,0.55]]}"#);

    let (ok, body) = run_json(temp.path(), &["decode", encoded.trim(), "--json"]);
    assert!(ok, "{body}");
    assert_eq!(
        body["data"]["values"],
        serde_json::json!([{"rcr": 1, "cu": 0.65}, {"rcr": 2, "cu": 0.55}])
    );
}

#[test]
fn decode_rejects_unknown_version() {
    let temp = tempdir().expect("tempdir");
    lumen(temp.path())
        .args(["decode", r#"{"v":9,"values":[]}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 1, got 9"));
}
