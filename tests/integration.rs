use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docstub")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn python_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".py").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// -- rewriting --

#[test]
fn documents_add_example() {
    let file = python_file("def add(a, b):\n    return a + b\n");
    let path = file.path().to_str().unwrap();

    cmd()
        .arg(path)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Docstrings added to {}", path)));

    let output = std::fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "def add(a, b):");
    let block: Vec<&str> = lines[1..11].iter().map(|l| l.trim_start()).collect();
    assert_eq!(
        block,
        [
            "\"\"\"",
            "add(a, b)",
            "",
            "Args:",
            "a: Description.",
            "b: Description.",
            "",
            "Returns:",
            "Description.",
            "\"\"\"",
        ]
    );
    assert_eq!(lines[11], "    return a + b");
    assert_eq!(lines.len(), 12);
}

#[test]
fn fixture_matches_expected() {
    let input = std::fs::read_to_string(fixture_path("inventory.py")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("inventory.expected.py")).unwrap();
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("inventory.py");
    std::fs::write(&target, input).unwrap();

    cmd().arg(&target).assert().success();

    let output = std::fs::read_to_string(&target).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn second_run_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("inventory.py");
    std::fs::copy(fixture_path("inventory.py"), &target).unwrap();

    cmd().arg(&target).assert().success();
    let first = std::fs::read_to_string(&target).unwrap();

    cmd().arg(&target).assert().success();
    let second = std::fs::read_to_string(&target).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fully_documented_file_is_byte_identical() {
    let src = "def f():\n    \"\"\"Doc.\"\"\"\n    return 1\n";
    let file = python_file(src);

    cmd()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("no undocumented functions"));

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), src);
}

#[test]
fn inline_body_reported_and_untouched() {
    let src = "def f(): return 1\n";
    let file = python_file(src);

    cmd()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: skipping f at line 1"));

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), src);
}

#[test]
fn continued_header_reported_and_untouched() {
    let src = "def f(): \\\n    return 1\n";
    let file = python_file(src);

    cmd()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: skipping f at line 2"));

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), src);
}

#[test]
fn mixed_line_endings_preserved_on_no_op() {
    let src = "def f():\r\n    \"\"\"Doc.\"\"\"\n    return 1\r\n";
    let file = python_file(src);

    cmd().arg(file.path()).assert().success();

    assert_eq!(std::fs::read(file.path()).unwrap(), src.as_bytes());
}

// -- failures --

#[test]
fn missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.py");
    let shown = missing.to_str().unwrap().to_string();

    cmd()
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("File not found").and(predicate::str::contains(shown)));

    assert!(!missing.exists());
}

#[test]
fn directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("File not found"));
}

#[test]
fn no_arguments_prints_usage() {
    cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Usage: docstub <python_file>"));
}

#[test]
fn two_arguments_prints_usage() {
    cmd()
        .args(["a.py", "b.py"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn syntax_error_leaves_file_alone() {
    let src = "def broken(:\n    pass\n";
    let file = python_file(src);

    cmd()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"))
        .stdout(predicate::str::contains("Docstrings added").not());

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), src);
}

#[test]
fn python2_source_rejected() {
    let src = "def greet(name):\n    print \"hello\", name\n";
    let file = python_file(src);

    cmd()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("print statement"));

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), src);
}

#[test]
fn help_exits_successfully() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("docstring"));
}
