use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEDULE: &str = "Policy Schedule\n\
Policy Number: ABC12345\n\
Proposer Name: Ravi Kumar\n\
Premium Amount: Rs. 12,000.00\n\
The sum assured for this plan is 5,00,000\n\
Date of Commencement: 01/04/2024\n";

/// Temp dir holding an empty config file so runs ignore the user's config.
fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn insparse(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("insparse").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn write_schedule(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, SCHEDULE).unwrap();
    path
}

#[test]
fn extract_json_reports_regex_and_fuzzy_fields() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");

    let output = insparse(&config)
        .args(["extract", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["policy_number"]["value"], "ABC12345");
    assert_eq!(json["policy_number"]["confidence"], 0.95);
    assert_eq!(json["policy_number"]["method"], "regex");
    assert_eq!(json["policy_holder"]["value"], "Ravi Kumar");
    assert_eq!(json["premium"]["value"], "12,000.00");
    assert_eq!(json["start_date"]["value"], "01/04/2024");

    assert_eq!(json["sum_assured"]["value"], "5,00,000");
    assert_eq!(json["sum_assured"]["confidence"], 0.85);
    assert_eq!(json["sum_assured"]["method"], "fuzzy (score: 100)");
}

#[test]
fn extract_text_table() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");

    insparse(&config)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction Results (BASE)"))
        .stdout(predicate::str::contains("ABC12345"))
        .stdout(predicate::str::contains("Method: regex"));
}

#[test]
fn extract_writes_output_file() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");
    let output = dir.path().join("result.csv");

    insparse(&config)
        .arg("extract")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("field,value,confidence,method"));
    assert!(csv.contains("policy_number,ABC12345,0.95,regex"));
}

#[test]
fn unknown_insurer_falls_back_to_base() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");

    insparse(&config)
        .arg("extract")
        .arg(&input)
        .args(["--insurer", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction Results (BASE)"));
}

#[test]
fn extract_missing_file_fails() {
    let (dir, config) = workspace();

    insparse(&config)
        .arg("extract")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn extract_unsupported_format_fails() {
    let (dir, config) = workspace();
    let input = dir.path().join("policy.docx");
    fs::write(&input, SCHEDULE).unwrap();

    insparse(&config)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn custom_registry_without_capture_group_fails() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");
    let registry = dir.path().join("registry.json");
    fs::write(
        &registry,
        r#"{ "provider": "custom", "fields": [
            { "name": "policy_number", "pattern": "Policy Number: \\w+", "keywords": ["Policy Number"] }
        ] }"#,
    )
    .unwrap();

    insparse(&config)
        .arg("extract")
        .arg(&input)
        .arg("--registry")
        .arg(&registry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no capturing group"));
}

#[test]
fn custom_registry_is_used() {
    let (dir, config) = workspace();
    let input = write_schedule(dir.path(), "policy.txt");
    let registry = dir.path().join("registry.json");
    fs::write(
        &registry,
        r#"{ "provider": "custom", "fields": [
            { "name": "holder", "pattern": "Proposer Name:\\s*(.+)", "keywords": ["Proposer"] }
        ] }"#,
    )
    .unwrap();

    let output = insparse(&config)
        .args(["extract", "--format", "json", "--registry"])
        .arg(&registry)
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 1);
    assert_eq!(json["holder"]["value"], "Ravi Kumar");
}

#[test]
fn batch_writes_outputs_and_summary() {
    let (dir, config) = workspace();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    write_schedule(&docs, "a.txt");
    write_schedule(&docs, "b.txt");
    let out = dir.path().join("out");

    insparse(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", docs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("filename,status,policy_number"));
    assert!(lines[1].starts_with("a.txt,success,ABC12345"));
}

#[test]
fn batch_stops_at_first_failure() {
    let (dir, config) = workspace();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("a.pdf"), "%PDF-garbage").unwrap();
    write_schedule(&docs, "b.txt");
    let out = dir.path().join("out");

    insparse(&config)
        .arg("batch")
        .arg(format!("{}/*", docs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["-j", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    assert!(!out.join("b.json").exists());
}

#[test]
fn batch_continue_on_error_reports_failures() {
    let (dir, config) = workspace();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("a.pdf"), "%PDF-garbage").unwrap();
    write_schedule(&docs, "b.txt");
    let out = dir.path().join("out");

    insparse(&config)
        .arg("batch")
        .arg(format!("{}/*", docs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--continue-on-error", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"))
        .stdout(predicate::str::contains("a.pdf"));

    assert!(out.join("b.json").exists());
}

#[test]
fn batch_without_matches_fails() {
    let (dir, config) = workspace();

    insparse(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn patterns_list_shows_builtin_providers() {
    let (_dir, config) = workspace();

    insparse(&config)
        .args(["patterns", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base"))
        .stdout(predicate::str::contains("hdfc"))
        .stdout(predicate::str::contains("lic"));
}

#[test]
fn patterns_show_prints_loadable_registry() {
    let (_dir, config) = workspace();

    let output = insparse(&config)
        .args(["patterns", "show", "LIC"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["provider"], "lic");
    assert_eq!(json["fields"][0]["name"], "policy_number");
}

#[test]
fn patterns_show_unknown_provider_fails() {
    let (_dir, config) = workspace();

    insparse(&config)
        .args(["patterns", "show", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown provider"));
}

#[test]
fn config_set_then_get() {
    let (_dir, config) = workspace();

    insparse(&config)
        .args(["config", "set", "pdf.min_text_length", "120"])
        .assert()
        .success();

    insparse(&config)
        .args(["config", "get", "pdf.min_text_length"])
        .assert()
        .success()
        .stdout(predicate::str::diff("120\n"));

    insparse(&config)
        .args(["config", "set", "pdf.no_such_key", "1"])
        .assert()
        .failure();
}
