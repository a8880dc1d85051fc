//! Exercises `cparsec_drv::Session` directly, without shelling out to the
//! compiled binary.

use std::io::Write;
use tempfile::NamedTempFile;

use cparsec_drv::{render, Session};

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write fixture contents");
    file
}

#[test]
fn session_parses_an_expression_from_disk() {
    let fixture = write_fixture("a = b = 1");
    let session = Session::read(fixture.path()).expect("read should succeed");
    let result = session.parse_expression();
    assert_eq!(render(&result).unwrap(), "(a = (b = 1))");
}

#[test]
fn session_parses_a_type_name_from_disk() {
    let fixture = write_fixture("struct Point { int x; int y; }");
    let session = Session::read(fixture.path()).expect("read should succeed");
    let result = session.parse_type_name();
    assert_eq!(
        render(&result).unwrap(),
        "struct Point { int x; int y; }"
    );
}

#[test]
fn session_read_of_a_missing_file_is_an_error() {
    let result = Session::read(std::path::Path::new("/nonexistent/file.h"));
    assert!(result.is_err());
}

#[test]
fn render_of_a_fatal_result_returns_the_error() {
    let fixture = write_fixture("(1 +");
    let session = Session::read(fixture.path()).expect("read should succeed");
    let result = session.parse_expression();
    assert!(render(&result).is_err());
}
