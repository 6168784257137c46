use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

const SAMPLE: &str = "code,description\n\
                      01,LIVE ANIMALS\n\
                      0101,\"LIVE HORSES, ASSES, MULES AND HINNIES\"\n\
                      0102,LIVE BOVINE ANIMALS\n\
                      99,MISCELLANEOUS\n";

fn data_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file
}

fn cmd(data: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("hsn").unwrap();
    cmd.env_remove("RUST_LOG").arg("--data").arg(data.path());
    cmd
}

#[test]
fn validate_report() {
    let data = data_file();
    cmd(&data)
        .args(["validate", "01, 0101, 999999"])
        .assert()
        .success()
        .stdout(contains("LIVE ANIMALS"))
        .stdout(contains("Code not found, but parent '99' exists"))
        .stdout(contains("2 of 3 code(s) valid"));
}

#[test]
fn validate_json() {
    let data = data_file();
    let output = cmd(&data)
        .args(["validate", "0101,abc", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["0101"]["valid"], true);
    assert_eq!(json["abc"]["valid"], false);
}

#[test]
fn suggest_json() {
    let data = data_file();
    cmd(&data)
        .args(["suggest", "Live Bovine Animals", "-k", "2", "--json"])
        .assert()
        .success()
        .stdout(contains("\"code\": \"0102\""))
        .stdout(contains("\"query\": \"live bovine animals\""));
}

#[test]
fn suggest_empty_description() {
    let data = data_file();
    cmd(&data)
        .args(["suggest", "   "])
        .assert()
        .success()
        .stdout(contains("Empty description provided"));
}

#[test]
fn ask_with_markers() {
    let data = data_file();
    cmd(&data)
        .args(["ask", "action: suggest query: live horses"])
        .assert()
        .success()
        .stdout(contains("HSN Code Suggestions:"))
        .stdout(contains("0101"));
}

#[test]
fn ask_detects_codes() {
    let data = data_file();
    cmd(&data)
        .args(["ask", "is", "0101", "valid?"])
        .assert()
        .success()
        .stdout(contains("HSN Code Validation Results:"))
        .stdout(contains("**0101**: Valid"));
}

#[test]
fn stats_json() {
    let data = data_file();
    cmd(&data)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_codes\": 4"))
        .stdout(contains("\"format\": \"csv\""));
}

#[test]
fn missing_data_file_fails() {
    Command::cargo_bin("hsn")
        .unwrap()
        .args(["--data", "/nonexistent/hsn.csv", "stats"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: Reference file not found"));
}

#[test]
fn data_from_env() {
    let data = data_file();
    Command::cargo_bin("hsn")
        .unwrap()
        .env("HSN_DATA", data.path())
        .args(["validate", "01"])
        .assert()
        .success()
        .stdout(contains("1 of 1 code(s) valid"));
}

#[test]
fn duplicate_codes_need_last_wins() {
    let mut data = NamedTempFile::new().unwrap();
    data.write_all(b"code,description\n01,LIVE ANIMALS\n01,ANIMALS\n")
        .unwrap();

    cmd(&data)
        .args(["stats"])
        .assert()
        .failure()
        .stderr(contains("Duplicate code '01'"));

    cmd(&data)
        .args(["--last-wins", "validate", "01"])
        .assert()
        .success()
        .stdout(contains("ANIMALS"));
}
