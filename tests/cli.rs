//! CLI integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kicad_bom() -> Command {
    cargo_bin_cmd!("kicad-bom")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy a fixture project into a scratch directory so runs never write into
/// the source tree.
fn project(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(fixtures_dir().join(name)).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
    }
    dir
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_cli_help() {
    kicad_bom()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("KiCad"));
}

#[test]
fn test_cli_version() {
    kicad_bom()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_generates_grouped_bom() {
    let dir = project("divider");

    kicad_bom()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Read 3 components"))
        .stdout(predicate::str::contains("Exported 2 unique components"));

    assert_eq!(
        read(&dir.path().join("divider.csv")),
        "Designator,Quantity,Value,Footprint,Component type,SMD pads,THT pads,PCB side\n\
         C1,1,10nF,C_0603,SMD,2,0,Top\n\
         R1 R2,2,100,R_0805,SMD,2,0,Top\n"
    );
}

#[test]
fn test_cli_output_and_delimiter() {
    let dir = project("divider");
    let output = dir.path().join("out").join("bom.csv");
    fs::create_dir(dir.path().join("out")).unwrap();

    kicad_bom()
        .arg(dir.path())
        .args(["--output"])
        .arg(&output)
        .args(["--delimiter", ";", "--split-footprint"])
        .assert()
        .success();

    let content = read(&output);
    let header = content.lines().next().unwrap();
    assert_eq!(
        header,
        "Designator;Quantity;Value;Footprint;Footprint-lib;Footprint-part;Component type;SMD pads;THT pads;PCB side"
    );
    assert!(content.contains("R1 R2;2;100;R_0805;;R_0805;SMD;2;0;Top"));
    assert!(!dir.path().join("divider.csv").exists());
}

#[test]
fn test_cli_json_output() {
    let dir = project("divider");

    kicad_bom()
        .arg(dir.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Designator": "R1 R2""#))
        .stdout(predicate::str::contains(r#""Quantity": 2"#))
        .stdout(predicate::str::contains(r#""unique": 2"#))
        .stdout(predicate::str::contains("Exported").not());
}

#[test]
fn test_cli_preview_table() {
    let dir = project("divider");

    kicad_bom()
        .arg(dir.path())
        .arg("--preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("R1 R2"))
        .stdout(predicate::str::contains("╭"));
}

#[test]
fn test_cli_physical_only_drops_unnamed() {
    let dir = project("divider");

    kicad_bom()
        .arg(dir.path())
        .arg("--physical-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 components"));

    assert_eq!(
        read(&dir.path().join("divider.csv")),
        "Designator,Quantity,Value,Footprint\n"
    );
}

#[test]
fn test_cli_missing_directory() {
    kicad_bom()
        .arg("/definitely/not/a/kicad/project")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input not found"));
}

#[test]
fn test_cli_ambiguous_inputs() {
    let dir = project("divider");
    fs::copy(
        dir.path().join("divider.xml"),
        dir.path().join("divider-old.xml"),
    )
    .unwrap();

    kicad_bom()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected exactly one"));
}

#[test]
fn test_cli_parse_error() {
    let dir = project("divider");
    fs::write(dir.path().join("divider.xml"), "<export><components>").unwrap();

    kicad_bom()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));

    assert!(!dir.path().join("divider.csv").exists());
}

#[test]
fn test_cli_merge_integrity_error() {
    let dir = project("divider");
    let layout = read(&dir.path().join("divider.kicad_pcb")).replace("reference C1", "reference C9");
    fs::write(dir.path().join("divider.kicad_pcb"), layout).unwrap();

    kicad_bom()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing: C1"));

    assert!(!dir.path().join("divider.csv").exists());
}

#[test]
fn test_cli_invalid_delimiter() {
    let dir = project("divider");

    kicad_bom()
        .arg(dir.path())
        .args(["--delimiter", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}
