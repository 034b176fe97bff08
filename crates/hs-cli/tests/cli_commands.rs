//! Integration tests for the `homestead` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn homestead() -> Command {
    Command::cargo_bin("homestead").unwrap()
}

fn simulate_json(args: &[&str]) -> serde_json::Value {
    let output = homestead()
        .arg("simulate")
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("valid JSON output")
}

// ---------------------------------------------------------------------------
// rules
// ---------------------------------------------------------------------------

#[test]
fn rules_prints_transition_table() {
    homestead()
        .arg("rules")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("potato_planted")
                .and(predicate::str::contains("organic_rubble"))
                .and(predicate::str::contains("linear(1, -1)"))
                .and(predicate::str::contains("stone_wall")),
        );
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_prints_summary_tables() {
    homestead()
        .args(["simulate", "--ticks", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Simulation")
                .and(predicate::str::contains("Tile Census"))
                .and(predicate::str::contains("Characters"))
                .and(predicate::str::contains("c0 *")),
        );
}

#[test]
fn simulate_map_has_one_line_per_row() {
    let output = homestead()
        .args(["simulate", "--ticks", "1", "--width", "7", "--height", "4", "--map"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let map: Vec<&str> = text
        .lines()
        .skip_while(|l| !l.contains("Map"))
        .skip(2)
        .take_while(|l| !l.trim().is_empty())
        .collect();
    assert_eq!(map.len(), 4);
    assert!(map.iter().all(|l| l.trim().chars().count() == 7));
}

#[test]
fn simulate_json_is_deterministic() {
    let a = simulate_json(&["--ticks", "40", "--seed", "7"]);
    let b = simulate_json(&["--ticks", "40", "--seed", "7"]);
    assert_eq!(a, b);
    assert_eq!(a["ticks"], 40);
    assert_eq!(a["characters"].as_array().unwrap().len(), 3);
    let cells: u64 = a["census"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(cells, 24 * 12);
}

#[test]
fn scripted_pickup_and_equip() {
    let json = simulate_json(&["--ticks", "3", "--input", "1:interact", "--input", "2:equip=0"]);
    let player = &json["characters"][0];
    assert_eq!(player["player"], true);
    assert_eq!(player["equipped"], "bucket");
    assert_eq!(player["inventory"].as_array().unwrap().len(), 0);
    assert_eq!(json["free_bodies"], 5);
}

#[test]
fn paused_run_accumulates_no_time() {
    let json = simulate_json(&["--ticks", "10", "--input", "0:pause"]);
    assert_eq!(json["paused"], true);
    assert_eq!(json["elapsed_seconds"], 0.0);
    assert_eq!(json["tiles"]["decayed"], 0);
}

#[test]
fn joystick_moves_the_player() {
    let still = simulate_json(&["--ticks", "2", "--seed", "3"]);
    let moved = simulate_json(&["--ticks", "2", "--seed", "3", "--input", "1:joystick=1,0"]);
    let x0 = still["characters"][0]["position"][0].as_f64().unwrap();
    let x1 = moved["characters"][0]["position"][0].as_f64().unwrap();
    assert!((x1 - x0 - 96.0).abs() < 1e-9);
}

#[test]
fn simulate_verbose_shows_outcome_log() {
    homestead()
        .args(["simulate", "--ticks", "2", "--input", "1:stats", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outcome Log").and(predicate::str::contains("stats shown")));
}

#[test]
fn simulate_rejects_malformed_input() {
    homestead()
        .args(["simulate", "--input", "soon:interact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tick"));
}

#[test]
fn simulate_rejects_empty_map() {
    homestead()
        .args(["simulate", "--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("grid")));
}
