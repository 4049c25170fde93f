use assert_cmd::Command;
use predicates::str::contains;

fn debug(commands: &str) -> Command {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("debug")
        .arg("tests/files/add.ali")
        .arg("--minimal")
        .arg("--command")
        .arg(commands);
    cmd
}

#[test]
fn steps_then_runs() {
    debug("step 2; registers; run; quit")
        .assert()
        .success()
        .stderr(contains("ACC 0\nDR 10\nPC 2\nZF 0\nOF 0\nACC 0\nDR 10\nPC 2\n"))
        .stderr(contains("Program halted.\nACC 30\nDR 20\nPC 5\n"));
}

#[test]
fn terminated_program_does_not_step() {
    debug("a\ns\ns 3")
        .assert()
        .success()
        .stderr(contains(
            "Program halted.\nACC 30\nDR 20\nPC 5\nZF 0\nOF 0\n\
             Program halted.\nACC 30\nDR 20\nPC 5\nZF 0\nOF 0\n\
             Program halted.\nACC 30\nDR 20\nPC 5\nZF 0\nOF 0\n",
        ));
}

#[test]
fn shows_memory() {
    let mut cmd = Command::cargo_bin("ali").unwrap();
    cmd.arg("debug")
        .arg("tests/files/countdown.ali")
        .arg("--minimal")
        .arg("--command")
        .arg("run; memory; symbols");
    cmd.assert()
        .success()
        .stderr(contains(" 12 JMP 6\n 13 HLT\n128 n 0\n129 one 1\n"))
        .stderr(contains("n 128\none 129\n"));
}

#[test]
fn resets_program() {
    debug("run; reset; registers; m")
        .assert()
        .success()
        .stderr(contains("Reset program to initial state.\nACC 0\nDR 0\nPC 0\n"))
        .stderr(contains("(no data)"));
}

#[test]
fn reports_bad_commands() {
    debug("jump 4; step 0; run now; s")
        .assert()
        .success()
        .stderr(contains("Not a command: `jump`."))
        .stderr(contains("`0` is not a positive step count."))
        .stderr(contains("Expected at most 0 arguments, found 1."))
        .stderr(contains("ACC 10\nDR 0\nPC 1\n"));
}

#[test]
fn prints_help_message() {
    debug("help")
        .assert()
        .success()
        .stderr(contains(include_str!("../src/debugger/help.txt")));
}
