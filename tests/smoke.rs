// Integration tests for the binary using assert_cmd.
// These tests shell out the compiled binary and validate observable behavior.

use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const BIN: &str = "ant_colony_sim";

#[test]
fn prints_summary_for_generated_world() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--width", "20",
        "--height", "10",
        "--ants", "10",
        "--steps", "200",
        "--seed", "42",
        "--suppress-events",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("Colony 0"))
        .stdout(contains("Colony 1"))
        .stdout(contains("==="))
        .stdout(contains("Simulation Latency"))
        .stdout(contains("steps=200"));

    Ok(())
}

#[test]
fn runs_from_map_and_config_files() -> Result<(), Box<dyn std::error::Error>> {
    let mut map = NamedTempFile::new()?;
    writeln!(map, "0....\n.##..\n....F\n")?;
    let mut config = NamedTempFile::new()?;
    writeln!(config, "[colony]\ninitial_ants = 4\nfood_per_spawn = 0\n\n[pheromone]\nevaporation_rate = 0.05\n")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--map", map.path().to_str().unwrap(),
        "--config", config.path().to_str().unwrap(),
        "--steps", "50",
        "--seed", "7",
        "--suppress-events",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("(5x3)"))
        .stdout(contains("ants=4/4"));

    Ok(())
}

#[test]
fn starving_colony_reports_extinction() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, "[ant]\ninitial_energy = 5\n\n[world]\nfood_sources = 0\n")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--config", config.path().to_str().unwrap(),
        "--steps", "100",
        "--seed", "1",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("every ant has died by step 5"))
        .stdout(contains("survivors=0"));

    Ok(())
}

#[test]
fn save_then_load_continues_step_count() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let save = dir.path().join("world.json");

    Command::cargo_bin(BIN)?
        .args([
            "--width", "12",
            "--height", "8",
            "--steps", "30",
            "--seed", "3",
            "--suppress-events",
            "--save", save.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert!(save.exists());

    Command::cargo_bin(BIN)?
        .args([
            "--load", save.to_str().unwrap(),
            "--steps", "20",
            "--suppress-events",
        ])
        .assert()
        .success()
        .stdout(contains("steps=50"));

    Ok(())
}

#[test]
fn rejects_invalid_config() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, "[pheromone]\ndiffusion_rate = 2.0\n")?;

    Command::cargo_bin(BIN)?
        .args(["--config", config.path().to_str().unwrap(), "--steps", "1"])
        .assert()
        .failure();

    Ok(())
}
