//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn itquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("itquiz").unwrap();
    cmd.env_remove("ITQUIZ_LEADERBOARD_URL")
        .env_remove("ITQUIZ_API_KEY");
    cmd
}

const TINY_BANK: &str = r#"
[bank]
id = "tiny"
name = "Tiny Bank"
points_per_correct = 50

[[questions]]
prompt = "First question"
options = ["A", "B"]
correct = "B"

[[questions]]
prompt = "Second question"
options = ["X", "Y"]
correct = "X"
"#;

/// A workspace with a file leaderboard, no feedback pause, and the tiny bank.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("itquiz.toml"),
        r#"
feedback_delay_ms = 0
leaderboard_limit = 5

[leaderboard]
type = "file"
path = "scores.json"
"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("tiny.toml"), TINY_BANK).unwrap();
    dir
}

fn read_scores(dir: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(dir.join("scores.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn validate_bundled_bank() {
    itquiz()
        .arg("validate")
        .arg("--bank")
        .arg("../itquiz-core/data/it_best_practices.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 questions"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_directory() {
    let dir = workspace();
    itquiz()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Tiny Bank"))
        .stdout(predicate::str::contains("expected 5 options"));
}

#[test]
fn validate_unplayable_bank_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, TINY_BANK.replace("correct = \"B\"", "correct = \"C\"")).unwrap();

    itquiz()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("cannot be played"));
}

#[test]
fn validate_nonexistent_file() {
    itquiz()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    itquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created itquiz.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("itquiz.toml").exists());

    itquiz()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    itquiz().current_dir(dir.path()).arg("init").assert().success();

    itquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn play_records_score_in_file_leaderboard() {
    let dir = workspace();

    itquiz()
        .current_dir(dir.path())
        .args(["play", "--config", "itquiz.toml", "--bank", "tiny.toml"])
        .args(["--no-shuffle", "--nickname", "ana"])
        .write_stdin("2\n2\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 2"))
        .stdout(predicate::str::contains("Correct: 1"))
        .stdout(predicate::str::contains("Incorrect: 1"))
        .stdout(predicate::str::contains("Score: 50"))
        .stdout(predicate::str::contains("Score saved for ana."));

    let scores = read_scores(dir.path());
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0]["nickname"], "ana");
    assert_eq!(scores[0]["score"], 50);
    assert_eq!(scores[0]["correct"], 1);
    assert_eq!(scores[0]["incorrect"], 1);
    assert!(scores[0]["timestamp"].is_string());
}

#[test]
fn play_with_seed_always_totals_every_question() {
    let dir = workspace();

    itquiz()
        .current_dir(dir.path())
        .args(["play", "--config", "itquiz.toml", "--bank", "tiny.toml"])
        .args(["--seed", "42", "--nickname", "bia"])
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Final result ==="));

    let scores = read_scores(dir.path());
    let correct = scores[0]["correct"].as_u64().unwrap();
    let incorrect = scores[0]["incorrect"].as_u64().unwrap();
    assert_eq!(correct + incorrect, 2);
    assert_eq!(scores[0]["score"].as_u64().unwrap(), correct * 50);
}

#[test]
fn play_without_submit_leaves_no_scores() {
    let dir = workspace();

    itquiz()
        .current_dir(dir.path())
        .args(["play", "--config", "itquiz.toml", "--bank", "tiny.toml"])
        .args(["--no-shuffle", "--no-submit"])
        .write_stdin("zé\n2\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Player: zé"))
        .stdout(predicate::str::contains("Score: 100"));

    assert!(!dir.path().join("scores.json").exists());
}

#[test]
fn unreachable_leaderboard_does_not_fail_the_run() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("remote.toml"),
        r#"
feedback_delay_ms = 0

[leaderboard]
type = "http"
base_url = "http://127.0.0.1:9"
timeout_secs = 2
"#,
    )
    .unwrap();

    itquiz()
        .current_dir(dir.path())
        .args(["play", "--config", "remote.toml", "--bank", "tiny.toml"])
        .args(["--no-shuffle", "--nickname", "ana"])
        .write_stdin("2\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100"))
        .stdout(predicate::str::contains("Could not save score"));
}

#[test]
fn play_rejects_unplayable_bank() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("broken.toml"),
        TINY_BANK.replace("correct = \"X\"", "correct = \"Z\""),
    )
    .unwrap();

    itquiz()
        .current_dir(dir.path())
        .args(["play", "--config", "itquiz.toml", "--bank", "broken.toml"])
        .args(["--nickname", "ana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no option matches"));
}

#[test]
fn leaderboard_lists_saved_scores() {
    let dir = workspace();

    itquiz()
        .current_dir(dir.path())
        .args(["leaderboard", "--config", "itquiz.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores yet"));

    for (name, answers) in [("low", "1\n2\n"), ("high", "2\n1\n")] {
        itquiz()
            .current_dir(dir.path())
            .args(["play", "--config", "itquiz.toml", "--bank", "tiny.toml"])
            .args(["--no-shuffle", "--nickname", name])
            .write_stdin(answers)
            .assert()
            .success();
    }

    let output = itquiz()
        .current_dir(dir.path())
        .args(["leaderboard", "--config", "itquiz.toml", "--limit", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("high"));
    assert!(!stdout.contains("low"));
}
