//! End-to-end tests driving the compiled `cparsec` binary, grounded in the
//! same `assert_cmd` + `predicates` + `tempfile` pattern used across the
//! workspace's other integration-test suites.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cparsec_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cparsec"))
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write fixture contents");
    file
}

#[test]
fn help_output_mentions_the_binary_name() {
    cparsec_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cparsec"));
}

#[test]
fn version_flag_succeeds() {
    cparsec_bin().arg("--version").assert().success();
}

#[test]
fn parses_a_simple_expression() {
    let fixture = write_fixture("1 + 2 * 3");
    cparsec_bin()
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 + (2 * 3))"));
}

#[test]
fn parses_a_type_name_with_the_flag() {
    let fixture = write_fixture("const int *");
    cparsec_bin()
        .arg(fixture.path())
        .arg("--type-name")
        .assert()
        .success()
        .stdout(predicate::str::contains("const int *"));
}

#[test]
fn reports_a_fatal_syntax_error_and_exits_nonzero() {
    let fixture = write_fixture("1 + ");
    cparsec_bin()
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Syntax error"));
}

#[test]
fn missing_input_file_exits_nonzero() {
    cparsec_bin()
        .arg("/nonexistent/path/does/not/exist.h")
        .assert()
        .failure();
}

#[test]
fn verbose_flag_is_accepted() {
    let fixture = write_fixture("x");
    cparsec_bin()
        .arg(fixture.path())
        .arg("--verbose")
        .assert()
        .success();
}
