//! Integration tests for the casematch CLI
//!
//! These tests run the casematch binary against record files in a temp dir.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Get a Command for casematch, isolated from the user's global config
fn casematch(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("casematch");
    cmd.current_dir(config_dir)
        .env("CASEMATCH_CONFIG_DIR", config_dir.join("global"))
        .env_remove("CASEMATCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Water-pipe complaint plus five candidates, two of them repeats
const COMPLAINTS: &str = r#"[
    {"id": "q", "text": "Water pipe leak flooding Main Street near the bakery"},
    {"id": "c1", "text": "Burst water pipe flooding Main Street outside the bakery"},
    {"id": "c2", "text": "Streetlight broken in the park"},
    {"id": "c3", "text": "Water pipe leak flooding Main Street"},
    {"id": "c4", "text": "Electricity meter billing error on last invoice"},
    {"id": "c5", "text": "Noise complaint about late night construction"}
]"#;

/// Market complaint submitted twice among unrelated cases
const RESUBMISSIONS: &str = r#"{"documents": [
    {"id": "g-1", "title": "Overflowing garbage bins", "description": "behind the central market attract stray dogs"},
    {"id": "g-2", "text": "Overflowing garbage bins behind the central market attract stray dogs"},
    {"id": "g-3", "text": "Streetlight flickering outside school gate"},
    {"id": "g-4", "text": "Pension payment delayed for three months"},
    {"id": "g-5", "text": "Potholes on highway exit cause accidents"}
]}"#;

fn write_records(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("records.json");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();
    casematch(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: casematch"))
        .stdout(predicate::str::contains("similar"))
        .stdout(predicate::str::contains("duplicates"))
        .stdout(predicate::str::contains("tokens"));
}

#[test]
fn test_version_flag() {
    let dir = tempdir().unwrap();
    casematch(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casematch"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let dir = tempdir().unwrap();
    casematch(dir.path()).assert().failure().code(2);
}

// ============================================================================
// similar
// ============================================================================

#[test]
fn test_similar_ranks_repeats_best_first() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    let output = casematch(dir.path())
        .args(["similar", "--query", "q", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["c3  64%", "c1  42%"]);
}

#[test]
fn test_similar_json_output() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    let output = casematch(dir.path())
        .args(["--format", "json", "similar", "--query", "q", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "c3");
    assert_eq!(results[0]["percent"], 64);
    assert_eq!(results[1]["id"], "c1");
    assert!(results[0]["score"].as_f64().unwrap() > results[1]["score"].as_f64().unwrap());
}

#[test]
fn test_similar_records_output() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["--format", "records", "similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H casematch=1 records=1 mode=similar query=\"q\" threshold=0.3 results=2",
        ))
        .stdout(predicate::str::contains("R \"c3\" score="))
        .stdout(predicate::str::contains("R \"c1\" score="))
        .stdout(predicate::str::contains("percent=42"));
}

#[test]
fn test_similar_threshold_and_limit_flags() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "q", "--threshold", "0.5", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("c3  64%\n");

    casematch(dir.path())
        .args(["similar", "--query", "q", "-n", "1", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("c3  64%\n");
}

#[test]
fn test_similar_no_matches() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "c4", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar records found"));

    casematch(dir.path())
        .args(["--quiet", "similar", "--query", "c4", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_similar_reads_stdin() {
    let dir = tempdir().unwrap();

    casematch(dir.path())
        .args(["similar", "--query", "q", "--input", "-"])
        .write_stdin(COMPLAINTS)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("c3  64%"));
}

#[test]
fn test_similar_unknown_query() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "missing", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_similar_unknown_query_json_envelope() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    let output = casematch(dir.path())
        .args(["--format", "json", "similar", "--query", "missing", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "not_found");
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_record_without_id_is_rejected() {
    let dir = tempdir().unwrap();
    let input = write_records(
        &dir,
        r#"[{"id": "a", "text": "Leaking roof"}, {"text": "No identifier here"}]"#,
    );

    casematch(dir.path())
        .args(["similar", "--query", "a", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("record 1"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();

    casematch(dir.path())
        .args(["similar", "--query", "a", "--input", "absent.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_invalid_threshold_is_usage_error() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "q", "--threshold", "1.5", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_threshold_json_envelope() {
    let dir = tempdir().unwrap();

    let output = casematch(dir.path())
        .args(["--format", "json", "similar", "--query", "q", "-i", "x.json", "-t", "high"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_zero_limit_is_usage_error() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "q", "--limit", "0", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--limit"));
}

#[test]
fn test_unknown_format_is_usage_error() {
    let dir = tempdir().unwrap();

    casematch(dir.path())
        .args(["--format", "yaml", "tokens", "water pipe"])
        .assert()
        .failure()
        .code(2);
}

// ============================================================================
// duplicates
// ============================================================================

#[test]
fn test_duplicates_finds_resubmission() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, RESUBMISSIONS);

    casematch(dir.path())
        .args(["duplicates", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("g-1 <-> g-2  100%\n");
}

#[test]
fn test_duplicates_json_output() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, RESUBMISSIONS);

    let output = casematch(dir.path())
        .args(["--format", "json", "duplicates", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pairs = json.as_array().unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0]["first"], "g-1");
    assert_eq!(pairs[0]["second"], "g-2");
    assert_eq!(pairs[0]["percent"], 100);
}

#[test]
fn test_duplicates_records_output() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, RESUBMISSIONS);

    casematch(dir.path())
        .args(["--format", "records", "duplicates", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "H casematch=1 records=1 mode=duplicates documents=5 threshold=0.85 results=1",
        ))
        .stdout(predicate::str::contains("D \"g-1\" \"g-2\" score=1.0000 percent=100"));
}

#[test]
fn test_duplicates_rejects_repeated_ids() {
    let dir = tempdir().unwrap();
    let input = write_records(
        &dir,
        r#"[{"id": "a", "text": "Leaking roof"}, {"id": "a", "text": "Leaking roof again"}]"#,
    );

    casematch(dir.path())
        .args(["duplicates", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_duplicates_none_found() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["duplicates", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("No duplicate records found\n");
}

// ============================================================================
// tokens
// ============================================================================

#[test]
fn test_tokens_human() {
    let dir = tempdir().unwrap();

    casematch(dir.path())
        .args(["tokens", "The Water-pipe is LEAKING!!"])
        .assert()
        .success()
        .stdout("the waterpipe leaking\n");
}

#[test]
fn test_tokens_json() {
    let dir = tempdir().unwrap();

    let output = casematch(dir.path())
        .args(["--format", "json", "tokens", "No power at 5th Ave"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let tokens: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tokens, vec!["power", "5th", "ave"]);
}

#[test]
fn test_tokens_records() {
    let dir = tempdir().unwrap();

    casematch(dir.path())
        .args(["--format", "records", "tokens", "Broken streetlight"])
        .assert()
        .success()
        .stdout(
            "H casematch=1 records=1 mode=tokens text=\"Broken streetlight\" results=2\n\
             T broken\n\
             T streetlight\n",
        );
}

// ============================================================================
// Configuration and logging
// ============================================================================

#[test]
fn test_local_config_sets_threshold() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);
    fs::write(
        dir.path().join("casematch.toml"),
        "[similar]\nthreshold = 0.5\n",
    )
    .unwrap();

    casematch(dir.path())
        .args(["similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("c3  64%\n");

    // Flags win over the config file
    casematch(dir.path())
        .args(["similar", "--query", "q", "--threshold", "0.3", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("c3  64%\nc1  42%\n");
}

#[test]
fn test_explicit_config_sets_limit() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[similar]\nlimit = 1\n").unwrap();

    casematch(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("c3  64%\n");
}

#[test]
fn test_global_config_used_without_local() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, RESUBMISSIONS);
    fs::create_dir_all(dir.path().join("global")).unwrap();
    fs::write(
        dir.path().join("global").join("config.toml"),
        "[duplicates]\nthreshold = 1.0\n",
    )
    .unwrap();

    // Identical texts score exactly 1.0, which is not strictly above 1.0
    casematch(dir.path())
        .args(["duplicates", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("No duplicate records found\n");
}

#[test]
fn test_invalid_config_threshold() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);
    fs::write(
        dir.path().join("casematch.toml"),
        "[similar]\nthreshold = 2.0\n",
    )
    .unwrap();

    casematch(dir.path())
        .args(["similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("similar.threshold"));
}

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["--log-level", "debug", "similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("load_config"))
        .stdout(predicate::str::starts_with("c3  64%"));
}

#[test]
fn test_default_log_level_is_quiet() {
    let dir = tempdir().unwrap();
    let input = write_records(&dir, COMPLAINTS);

    casematch(dir.path())
        .args(["similar", "--query", "q", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_tokens_ignores_broken_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("casematch.toml"),
        "[similar]\nthreshold = 2.0\n",
    )
    .unwrap();

    casematch(dir.path())
        .args(["tokens", "Broken streetlight"])
        .assert()
        .success()
        .stdout("broken streetlight\n");
}

#[test]
fn test_records_output_quotes_ids() {
    let dir = tempdir().unwrap();
    let input = write_records(
        &dir,
        r#"[
            {"id": "case 1", "text": "Overflowing garbage bins behind the central market"},
            {"id": "case \"2\"", "text": "Overflowing garbage bins behind the central market"},
            {"id": "case 3", "text": "Streetlight flickering outside school gate"},
            {"id": "case 4", "text": "Pension payment delayed for three months"},
            {"id": "case 5", "text": "Potholes on highway exit cause accidents"}
        ]"#,
    );

    casematch(dir.path())
        .args(["--format", "records", "similar", "--query", "case 1", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"R "case \"2\"" score=1.0000 percent=100"#));

    casematch(dir.path())
        .args(["--format", "records", "duplicates", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"D "case 1" "case \"2\"" score=1.0000 percent=100"#,
        ));
}
