//! Command-line interface.

mod common;

use assert_cmd::Command;
use common::{write_grid, write_schemes, Hraw, COLS, ROWS};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn transect_needs_no_grid() {
    Command::cargo_bin("roms-grid")
        .unwrap()
        .args(["transect", "0", "0", "0", "1", "111.19"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stations: 1"))
        .stdout(predicate::str::contains("bearing_deg: 0.000"));
}

#[test]
fn transect_accepts_negative_coordinates() {
    Command::cargo_bin("roms-grid")
        .unwrap()
        .args(["transect", "-10", "30", "-9", "30", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bearing_deg: 89.7"));
}

#[test]
fn info_reports_scheme_and_window() {
    let dir = TempDir::new().unwrap();
    let grid = write_grid(dir.path(), "grd_fixture.nc", Hraw::Flat, true);
    let schemes = write_schemes(dir.path());

    Command::cargo_bin("roms-grid")
        .unwrap()
        .arg("info")
        .arg(&grid)
        .arg("--schemes")
        .arg(&schemes)
        .assert()
        .success()
        .stdout(predicate::str::contains("title: Fixture grid"))
        .stdout(predicate::str::contains(format!("raw shape: ({}, {})", ROWS, COLS)))
        .stdout(predicate::str::contains("N=12 scoord=2"))
        .stdout(predicate::str::contains("S=1 E=0 N=1 W=1"));
}

#[test]
fn unknown_grid_fails() {
    let dir = TempDir::new().unwrap();
    let grid = write_grid(dir.path(), "grd_mystery.nc", Hraw::Flat, true);
    let schemes = write_schemes(dir.path());

    Command::cargo_bin("roms-grid")
        .unwrap()
        .arg("info")
        .arg(&grid)
        .arg("--schemes")
        .arg(&schemes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vertical scheme entry"));
}

#[test]
fn boundary_prints_perimeter() {
    let dir = TempDir::new().unwrap();
    let grid = write_grid(dir.path(), "grd_fixture.nc", Hraw::Flat, true);
    let schemes = write_schemes(dir.path());

    let output = Command::cargo_bin("roms-grid")
        .unwrap()
        .arg("boundary")
        .arg(&grid)
        .arg("--schemes")
        .arg(&schemes)
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = String::from_utf8(output.stdout).unwrap().lines().count();
    assert_eq!(lines, 2 * (COLS - 1) + 2 * (ROWS - 1));
}

#[test]
fn levels_from_root_directory() {
    let dir = TempDir::new().unwrap();
    write_grid(dir.path(), "grd_fixture.nc", Hraw::Flat, true);
    let schemes = write_schemes(dir.path());

    let output = Command::cargo_bin("roms-grid")
        .unwrap()
        .args(["levels", "grd_fixture.nc", "--root"])
        .arg(dir.path())
        .arg("--schemes")
        .arg(&schemes)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // header plus one row per rho level
    assert_eq!(stdout.lines().count(), 13);
}
