use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const BIN: &str = "ant_colony_sim";

#[test]
fn walled_in_nest_keeps_ants_alive_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let mut f = NamedTempFile::new()?;
    writeln!(f, "###\n#0#\n###")?;

    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args([
        "--map", f.path().to_str().unwrap(),
        "--ants", "3",
        "--steps", "10",
        "--seed", "7",
        "--suppress-events",
    ]);

    // Nobody can move, but nobody runs out of energy in 10 steps either
    cmd.assert()
        .success()
        .stdout(contains("survivors=3"))
        .stdout(contains("territory=1"));

    Ok(())
}
