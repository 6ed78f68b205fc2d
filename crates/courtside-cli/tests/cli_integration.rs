//! CLI Integration Tests
//!
//! Runs the `courtside` binary end-to-end against temporary input files and
//! a temporary config, so nothing from the user's environment leaks in.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command pinned to a config file inside `dir`
fn cli_cmd(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("courtside").expect("Failed to find courtside binary");
    cmd.arg("--config")
        .arg(&config)
        .env_remove("COURTSIDE_EXPORT_URL")
        .env_remove("COURTSIDE_THEME");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Metrics Command Tests
// ============================================================================

#[test]
fn test_metrics_true_shooting() {
    let dir = TempDir::new().unwrap();

    // 20 / (2 * (15 + 0.44 * 4)) = 59.7%
    cli_cmd(&dir)
        .args(["metrics", "--pts", "20", "--fga", "15", "--fta", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TS%"))
        .stdout(predicate::str::contains("59.7 (good)"));
}

#[test]
fn test_metrics_zero_attempts_are_zero() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["metrics", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trueShootingPct\": 0.0"))
        .stdout(predicate::str::contains("NaN").not());
}

#[test]
fn test_metrics_rejects_negative_counts() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["metrics", "--pts", "-3"])
        .assert()
        .failure();
}

#[test]
fn test_metrics_huge_rebound_counts() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["metrics", "--oreb", "4294967295", "--dreb", "1", "--json"])
        .assert()
        .success();
}

// ============================================================================
// Box Score and Team Tests
// ============================================================================

#[test]
fn test_box_score_table() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "box.json",
        r#"[
            {"playerId": "p1", "name": "Ana", "number": 5, "points": 10,
             "fieldGoalsMade": 4, "fieldGoalsAttempted": 8,
             "freeThrowsMade": 2, "freeThrowsAttempted": 2},
            {"playerId": "p2", "name": "Bea", "points": 6,
             "fieldGoalsMade": 2, "fieldGoalsAttempted": 5,
             "threePointersMade": 2, "threePointersAttempted": 3}
        ]"#,
    );

    cli_cmd(&dir)
        .arg("box-score")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("#5 Ana"))
        .stdout(predicate::str::contains("Bea"))
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("6-13"));
}

#[test]
fn test_box_score_totals_saturate() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "box.json",
        r#"[
            {"playerId": "p1", "name": "Ana", "points": 4294967295},
            {"playerId": "p2", "name": "Bea", "points": 1}
        ]"#,
    );

    cli_cmd(&dir)
        .arg("box-score")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL"));
}

#[test]
fn test_box_score_empty_file() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "box.json", "[]");

    cli_cmd(&dir)
        .arg("box-score")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No players found."));
}

#[test]
fn test_box_score_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["box-score", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_team_comparison() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "matchup.json",
        r#"{
            "team": {"points": 80, "fieldGoalsMade": 30, "fieldGoalsAttempted": 65,
                     "threePointersMade": 8, "freeThrowsAttempted": 15,
                     "offensiveRebounds": 10, "defensiveRebounds": 25, "turnovers": 12},
            "opponent": {"points": 70, "fieldGoalsMade": 27, "fieldGoalsAttempted": 66,
                         "freeThrowsAttempted": 12, "offensiveRebounds": 9,
                         "defensiveRebounds": 22, "turnovers": 14}
        }"#,
    );

    cli_cmd(&dir)
        .arg("team")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("eFG%"))
        .stdout(predicate::str::contains("Offensive rating:"))
        .stdout(predicate::str::contains("Net rating: +"));
}

// ============================================================================
// Shots and Lineups Tests
// ============================================================================

#[test]
fn test_shots_zone_breakdown() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "shots.json",
        r#"[
            {"x": 25.0, "y": 6.0, "made": true, "isThree": false},
            {"x": 25.0, "y": 7.0, "made": false, "isThree": false},
            {"x": 1.0, "y": 3.0, "made": true, "isThree": true}
        ]"#,
    );

    cli_cmd(&dir)
        .args(["shots", "--cols", "3", "--rows", "3"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shots: 3"))
        .stdout(predicate::str::contains("Restricted Area"))
        .stdout(predicate::str::contains("1/2"))
        .stdout(predicate::str::contains("Corner 3"));
}

#[test]
fn test_shots_zero_grid_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "shots.json", "[]");

    cli_cmd(&dir)
        .args(["shots", "--cols", "0"])
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn test_shots_oversized_grid_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "shots.json", "[]");

    cli_cmd(&dir)
        .args(["shots", "--cols", "100000", "--rows", "100000"])
        .arg(&file)
        .assert()
        .failure();

    cli_cmd(&dir)
        .args(["shots", "--cols", "200", "--rows", "200"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_lineups_sorted_by_plus_minus() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "lineups.json",
        r#"{
            "lineups": [
                {"players": ["a","b","c","d","e"], "playerNames": ["Starters"],
                 "minutes": 20.0, "plusMinus": -4},
                {"players": ["a","b","c","d","f"], "playerNames": ["Closers"],
                 "minutes": 8.0, "plusMinus": 9}
            ],
            "pairs": [
                {"player1": "a", "player2": "f", "player1Name": "Ana",
                 "minutes": 8.0, "plusMinus": 9}
            ]
        }"#,
    );

    let output = cli_cmd(&dir)
        .args(["lineups", "--sort", "plus-minus"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let closers = stdout.find("Closers").unwrap();
    let starters = stdout.find("Starters").unwrap();
    assert!(closers < starters, "plus-minus sort should rank Closers first");
    assert!(stdout.contains("Ana + f"));
}

#[test]
fn test_lineups_unknown_sort_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "lineups.json", "{}");

    cli_cmd(&dir)
        .args(["lineups", "--sort", "vibes"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown lineup sort"));
}

// ============================================================================
// Free Throw Tests
// ============================================================================

#[test]
fn test_free_throws_missed_front_end() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["free-throws", "--one-and-one", "--results", "missed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1-and-1: missed"))
        .stdout(predicate::str::contains("0 of 1 made"))
        .stdout(predicate::str::contains("Backend calls: 1"));
}

#[test]
fn test_free_throws_partial_sequence() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["free-throws", "--attempts", "3", "--results", "made"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free throw 1 of 3: made"))
        .stdout(predicate::str::contains("Waiting on: Free throw 2 of 3"));
}

#[test]
fn test_free_throws_bad_result_fails() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["free-throws", "--results", "swish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid free-throw result"));
}

// ============================================================================
// Export and Config Tests
// ============================================================================

#[test]
fn test_export_url_from_config() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "config.toml",
        "export_base_url = \"https://stats.example.com/api\"\ntheme = \"dark\"\n",
    );

    cli_cmd(&dir)
        .args(["export", "g42", "--sections", "box_score,shot_chart", "--heat-map"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://stats.example.com/api/games/g42/export?format=pdf&sections=box_score%2Cshot_chart&theme=dark&heatmap=true",
        ));
}

#[test]
fn test_export_csv_drops_heat_map() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["export", "g42", "--format", "csv", "--theme", "light", "--heat-map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("format=csv"))
        .stdout(predicate::str::contains("heatmap=false"));
}

#[test]
fn test_export_unknown_section_fails() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["export", "g42", "--sections", "highlights"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section"));
}

#[test]
fn test_config_show() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "config.toml", "undo_toast_ms = 8000\n");

    cli_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Config file:"))
        .stdout(predicate::str::contains("undo_toast_ms = 8000"))
        .stdout(predicate::str::contains("auto_dismiss_ms = 1500"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "config.toml", "theme = \"neon\"\n");

    cli_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .failure();
}
