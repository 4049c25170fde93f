use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn runs_without_arguments() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.assert().success().stdout(contains("Welcome to ali"));
}

#[test]
fn runs_addition() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/add.ali").arg("--minimal");

    cmd.assert()
        .success()
        .stdout(contains("ACC 30\nDR 20\nPC 5\nZF 0\nOF 0\n"))
        .stdout(contains("  0 LDI 10\n  1 XCH\n"))
        .stdout(contains("(no data)"));
}

#[test]
fn runs_countdown_loop() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/countdown.ali").arg("--minimal");

    cmd.assert()
        .success()
        .stdout(contains("ACC 0\nDR 1\nPC 13\nZF 1\nOF 0\n"))
        .stdout(contains("128 n 0\n129 one 1\n"));
}

#[test]
fn branches_on_overflow() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/overflow.ali").arg("--minimal");

    cmd.assert()
        .success()
        .stdout(contains("ACC 2147483648\nDR 2147483647\nPC 8\nZF 0\nOF 1\n"))
        .stdout(contains("128 big 2147483648\n"));
}

#[test]
fn registers_grow_without_bound() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/doubling.ali").arg("--minimal");

    cmd.assert()
        .success()
        .stdout(contains(
            "ACC 46768052394588893382517914646921056628989841375232\n\
             DR 93536104789177786765035829293842113257979682750464\n\
             PC 4\nZF 0\nOF 1\n",
        ))
        .stdout(contains(
            "128 x 93536104789177786765035829293842113257979682750464\n",
        ));
}

#[test]
fn adds_wide_literals_exactly() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/wide.ali").arg("--minimal");

    cmd.assert().success().stdout(contains(
        "ACC 0\nDR 123456789012345678901234567890\nPC 4\nZF 1\nOF 0\n",
    ));
}

#[test]
fn stops_runaway_program() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/runaway.ali");

    cmd.assert()
        .success()
        .stdout(contains("Runaway"))
        .stdout(contains("exceeding 1000 instructions"));
}

#[test]
fn rejects_unknown_opcode() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("check").arg("tests/files/unknown_opcode.ali");
    cmd.assert().failure().stderr(contains("parse::opcode"));

    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/unknown_opcode.ali");
    cmd.assert().failure().stderr(contains("unknown instruction"));
}

#[test]
fn checks_valid_program() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("check").arg("tests/files/countdown.ali");
    cmd.assert()
        .success()
        .stdout(contains("14 instructions decoded"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("run").arg("tests/files/does_not_exist.ali");
    cmd.assert().failure();
}

#[test]
fn traces_when_configured() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.env("ALI_TRACE", "1")
        .arg("run")
        .arg("tests/files/add.ali")
        .arg("--minimal");
    cmd.assert()
        .success()
        .stderr(contains("  4  ADD"))
        .stderr(contains("  5  HLT"));
}
