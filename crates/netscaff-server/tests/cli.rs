//! Command-line behaviour: exit codes, output and files on disk.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn netscaff(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("netscaff").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("NETSCAFF__SDK__EXECUTABLE")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir).args(["check", "--bogus"]).assert().code(2);
}

#[test]
fn check_accepts_a_valid_request() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .arg("check")
        .arg(fixture("shop.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Request is valid"));
}

#[test]
fn check_reports_every_violation() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .arg("check")
        .arg(fixture("invalid.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1Shop"))
        .stdout(predicate::str::contains("money"));
}

#[test]
fn check_json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = netscaff(&dir)
        .args(["--output-format", "json", "check"])
        .arg(fixture("shop.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
}

#[test]
fn malformed_request_file_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"project\": ").unwrap();

    netscaff(&dir)
        .arg("check")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid request file"));
}

#[test]
fn new_offline_writes_the_solution_and_zip() {
    let dir = TempDir::new().unwrap();
    let zip = dir.path().join("Shop.zip");

    netscaff(&dir)
        .arg("new")
        .arg(fixture("shop.json"))
        .args(["--offline", "--output"])
        .arg(dir.path())
        .arg("--zip")
        .arg(&zip)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop created"));

    let solution = dir.path().join("Shop");
    assert!(solution.join("Shop.sln").is_file());
    assert!(solution.join("src/Shop.Domain/Entities/Product.cs").is_file());
    assert!(solution.join("src/Shop.Infrastructure/DependencyInjection.cs").is_file());
    assert!(zip.is_file());
}

#[test]
fn new_refuses_an_existing_solution_without_force() {
    let dir = TempDir::new().unwrap();
    let run = |force: bool| {
        let mut cmd = netscaff(&dir);
        cmd.arg("new")
            .arg(fixture("shop.json"))
            .args(["--offline", "--output"])
            .arg(dir.path());
        if force {
            cmd.arg("--force");
        }
        cmd.assert()
    };

    run(false).success();
    run(false)
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    run(true).success();
}

#[test]
fn sdk_missing_executable_exits_with_external_code() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .env("NETSCAFF__SDK__EXECUTABLE", "/definitely/not/dotnet")
        .arg("sdk")
        .assert()
        .code(5)
        .stdout(predicate::str::contains("was not found"));
}

#[test]
fn missing_config_file_exits_with_configuration_code() {
    let dir = TempDir::new().unwrap();
    netscaff(&dir)
        .args(["--config", "/definitely/not/netscaff.toml", "check"])
        .arg(fixture("shop.json"))
        .assert()
        .code(4);
}
