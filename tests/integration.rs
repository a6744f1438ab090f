use assert_cmd::Command;
use predicates::prelude::*;

fn snaffler_powerbi() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("snaffler-powerbi")
}

fn read_value(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ── convert ──────────────────────────────────────────────────────────────────

#[test]
fn convert_flattens_severity_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    snaffler_powerbi()
        .args([
            "convert",
            "tests/fixtures/snaffledShares.json",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 entries"));

    let converted = read_value(&output);
    let entries = converted["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["event"]["severity"], "Red");
    assert_eq!(entries[1]["event"]["severity"], "Green");
    // The share entry has no bucket and stays as-is.
    assert!(entries[2].get("event").is_none());
    // The wrapper is gone everywhere.
    assert!(entries[0].get("eventProperties").is_none());
}

#[test]
fn convert_derives_the_default_output_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.json");
    std::fs::copy("tests/fixtures/snaffledShares.json", &input).unwrap();

    snaffler_powerbi()
        .args(["convert", input.to_str().unwrap()])
        .assert()
        .success();

    assert!(dir.path().join("scan.powerbi.json").exists());
}

#[test]
fn convert_keep_raw_retains_the_wrapper() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    snaffler_powerbi()
        .args([
            "convert",
            "tests/fixtures/snaffledShares.json",
            "--keep-raw",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let converted = read_value(&output);
    assert!(converted["entries"][0]["rawEventProperties"]["Red"].is_object());
}

#[test]
fn convert_writes_schema_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");
    let schema_out = dir.path().join("schema.tmp.json");

    snaffler_powerbi()
        .args([
            "convert",
            "tests/fixtures/snaffledShares.json",
            "--output",
            output.to_str().unwrap(),
            "--schema-out",
            schema_out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let schema = read_value(&schema_out);
    assert_eq!(schema["entries"], serde_json::json!(["array"]));
    assert!(schema["entries[].eventProperties"].is_array());
}

#[test]
fn convert_nonexistent_input_exits_2() {
    snaffler_powerbi()
        .args(["convert", "tests/fixtures/does-not-exist.json"])
        .assert()
        .code(2);
}

// ── convert-all ──────────────────────────────────────────────────────────────

#[test]
fn convert_all_reports_converted_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        "tests/fixtures/snaffledShares.json",
        dir.path().join("a.json"),
    )
    .unwrap();
    std::fs::write(dir.path().join("broken.json"), "{nope").unwrap();

    snaffler_powerbi()
        .args(["convert-all", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 converted"))
        .stdout(predicate::str::contains("1 skipped"));

    assert!(dir.path().join("a.powerbi.json").exists());
}

#[test]
fn convert_all_json_summary_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        "tests/fixtures/snaffledShares.json",
        dir.path().join("a.json"),
    )
    .unwrap();

    let output = snaffler_powerbi()
        .args([
            "convert-all",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("summary should be valid JSON");
    assert_eq!(parsed["converted"], 1);
    assert_eq!(parsed["entries"], 3);
}

#[test]
fn convert_all_strict_aborts_on_unexpected_shape() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("shares.json"), r#"{"shares":[]}"#).unwrap();

    snaffler_powerbi()
        .args(["convert-all", dir.path().to_str().unwrap(), "--strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing 'entries' key"));
}

#[test]
fn convert_all_nonexistent_dir_exits_2() {
    snaffler_powerbi()
        .args(["convert-all", "tests/fixtures/does-not-exist"])
        .assert()
        .code(2);
}

// ── merge ────────────────────────────────────────────────────────────────────

#[test]
fn merge_concatenates_converted_documents() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.json");

    snaffler_powerbi()
        .args([
            "merge",
            "--input-dir",
            "tests/fixtures/converted",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 merged entries"));

    let merged = read_value(&output);
    let entries = merged["entries"].as_array().unwrap();
    // alpha.json sorts before beta.json.
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[1]["id"], 2);
    assert_eq!(entries[2]["id"], 3);
}

#[test]
fn merge_lenient_skips_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.json");

    snaffler_powerbi()
        .args([
            "merge",
            "--input-dir",
            "tests/fixtures/mixed",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARN]"));

    let merged = read_value(&output);
    // good.json's entry plus the object entry of bad-entry.json survive.
    assert_eq!(merged["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn merge_strict_aborts_on_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.json");

    snaffler_powerbi()
        .args([
            "merge",
            "--input-dir",
            "tests/fixtures/mixed",
            "--output",
            output.to_str().unwrap(),
            "--strict",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not an object"));

    assert!(!output.exists());
}

#[test]
fn merge_empty_dir_writes_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("converted");
    std::fs::create_dir(&input).unwrap();
    let output = dir.path().join("merged.json");

    snaffler_powerbi()
        .args([
            "merge",
            "--input-dir",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no files matched"));

    assert_eq!(read_value(&output), serde_json::json!({"entries": []}));
}

#[test]
fn merge_nonexistent_dir_exits_2() {
    snaffler_powerbi()
        .args(["merge", "--input-dir", "tests/fixtures/does-not-exist"])
        .assert()
        .code(2);
}

#[test]
fn merge_pretty_output_is_indented() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.json");

    snaffler_powerbi()
        .args([
            "merge",
            "--input-dir",
            "tests/fixtures/converted",
            "--output",
            output.to_str().unwrap(),
            "--pretty",
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("\n  \"entries\""));
    assert!(text.ends_with('\n'));
}

// ── schema ───────────────────────────────────────────────────────────────────

#[test]
fn schema_prints_sorted_paths() {
    let output = snaffler_powerbi()
        .args(["schema", "tests/fixtures/snaffledShares.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("schema should be valid JSON");

    let paths: Vec<&String> = parsed.as_object().unwrap().keys().collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
    assert_eq!(parsed["entries[].level"], serde_json::json!(["string"]));
}

#[test]
fn schema_writes_to_a_file_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("schema.json");

    snaffler_powerbi()
        .args([
            "schema",
            "tests/fixtures/snaffledShares.json",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(read_value(&out)["entries"].is_array());
}

#[test]
fn schema_nonexistent_input_exits_2() {
    snaffler_powerbi()
        .args(["schema", "tests/fixtures/does-not-exist.json"])
        .assert()
        .code(2);
}
