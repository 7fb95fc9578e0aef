//! End-to-end tests for the `report` and `fleet` commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn write_demand(dir: &Path) -> PathBuf {
    let path = dir.join("demand.csv");
    fs::write(
        &path,
        "timestamp,NSW1,VIC1\n\
         2020-01-01 00:00:00,100,50\n\
         2020-01-01 01:00:00,120,60\n\
         2020-01-01 02:00:00,110,40\n",
    )
    .unwrap();
    path
}

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let demand = write_demand(tmp.path());
    (tmp, demand)
}

#[test]
fn report_without_dispatch_has_no_unserved_energy() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args(["report", "--demand", demand.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Timesteps: 3 h"))
        .stdout(predicate::str::contains("Demand energy: 480.00 MWh"))
        .stdout(predicate::str::contains("No unserved energy"));
}

#[test]
fn report_counts_unserved_events() {
    let (tmp, demand) = setup();
    let unserved = tmp.path().join("unserved.csv");
    // Hours 0 and 1 are one event, hour 2 is missing, so 00:00 + 3h starts another.
    fs::write(
        &unserved,
        "timestamp,NSW1\n\
         2020-01-01 00:00:00,5\n\
         2020-01-01 01:00:00,7\n\
         2020-01-01 03:00:00,2\n",
    )
    .unwrap();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "report",
            "--demand",
            demand.to_str().unwrap(),
            "--unserved",
            unserved.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unserved total hours: 3"))
        .stdout(predicate::str::contains("Number of unserved energy events: 2"))
        .stdout(predicate::str::contains("WARNING: reliability standard exceeded"))
        .stdout(predicate::str::contains("No unserved energy").not());
}

#[test]
fn report_json_emits_metrics() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "report",
            "--demand",
            demand.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unserved_percent\""))
        .stdout(predicate::str::contains("\"hours\": 3"));
}

#[test]
fn report_lists_selected_regions() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "report",
            "--demand",
            demand.to_str().unwrap(),
            "--regions",
            "VIC1,NSW1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Regions: [NSW1, VIC1]"));
}

#[test]
fn fleet_prints_default_generators() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args(["fleet", "--demand", demand.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"technology\": \"CCGT\""))
        .stdout(predicate::str::contains("\"technology\": \"OCGT\""));
}

#[test]
fn fleet_applies_capacities_in_order() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "fleet",
            "--demand",
            demand.to_str().unwrap(),
            "--fleet",
            "wind@4,ccgt",
            "--capacities",
            "1500,99999",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"capacity\": 1500.0"))
        .stdout(predicate::str::contains("\"capacity\": 40000.0"))
        .stdout(predicate::str::contains("\"polygon\": \"4\""));
}

#[test]
fn capacity_count_mismatch_fails() {
    let (_tmp, demand) = setup();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "fleet",
            "--demand",
            demand.to_str().unwrap(),
            "--capacities",
            "100",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tunable parameters"));
}

#[test]
fn config_without_penetration_limit_fails() {
    let (tmp, demand) = setup();
    let config = tmp.path().join("gmix.toml");
    fs::write(&config, "[limits]\n").unwrap();

    cargo_bin_cmd!("gmix-cli")
        .env_remove("GMIX_CONFIG")
        .args([
            "report",
            "--demand",
            demand.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonsync-penetration"));
}

#[test]
fn config_from_environment_is_used() {
    let (tmp, demand) = setup();
    let config = tmp.path().join("gmix.toml");
    fs::write(&config, "[limits]\nnonsync-penetration = \"high\"\n").unwrap();

    cargo_bin_cmd!("gmix-cli")
        .env("GMIX_CONFIG", &config)
        .args(["report", "--demand", demand.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
}
