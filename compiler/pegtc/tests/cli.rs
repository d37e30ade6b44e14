//! End-to-end tests of the `pegtc` binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const GRAMMAR: &str = "start Word;\n\nWord = { text: ^+[a-z]; };\n";

fn pegtc(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pegtc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn generates_module_and_prints_rules() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("word.peg");
    let module = dir.path().join("word.rs");
    std::fs::write(&grammar, GRAMMAR).unwrap();

    let output = pegtc(&[&grammar, &module]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), GRAMMAR);

    let generated = std::fs::read_to_string(&module).unwrap();
    assert!(generated.contains("pub struct Word {\n    pub text: Span,\n}"));
    assert!(generated.contains("pub fn parse(source: &str) -> Result<Box<Word>, ParseError> {"));
}

#[test]
fn check_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("word.peg");
    std::fs::write(&grammar, GRAMMAR).unwrap();

    let output = pegtc(&[Path::new("check"), &grammar]);
    assert!(output.status.success());
    assert!(stdout(&output).ends_with("(1 rules)\n"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn dump_prints_rules() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("word.peg");
    std::fs::write(&grammar, GRAMMAR).unwrap();

    let output = pegtc(&[Path::new("dump"), &grammar]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), GRAMMAR);
}

#[test]
fn syntax_error_is_highlighted() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("bad.peg");
    let module = dir.path().join("bad.rs");
    std::fs::write(&grammar, "start A;\nA = \"x\";\n").unwrap();

    let output = pegtc(&[&grammar, &module]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!module.exists());

    let err = stderr(&output);
    assert!(err.starts_with("error[E0001]: expected `{` or `direct`, found string literal\n"));
    assert!(err.contains("bad.peg:2:5"), "{err}");
    assert!(err.contains("A = \"x\";"));
}

#[test]
fn deeply_nested_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("deep.peg");
    let depth = 50_000;
    let source = format!(
        "start A;\nA := {}\"x\"{};\n",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    std::fs::write(&grammar, source).unwrap();

    let output = pegtc(&[Path::new("check"), &grammar]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).ends_with("(1 rules)\n"));
}

#[test]
fn unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("word.peg");
    let module = dir.path().join("missing").join("word.rs");
    std::fs::write(&grammar, GRAMMAR).unwrap();

    let output = pegtc(&[&grammar, &module]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("error[E9002]: error writing '"));
}

#[test]
fn missing_grammar_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.peg");

    let output = pegtc(&[Path::new("check"), &missing]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error[E9001]: cannot find file"));
}

#[test]
fn unknown_command() {
    let output = pegtc(&[Path::new("frobnicate")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Unknown command: frobnicate\n"));
}

#[test]
fn version() {
    let output = pegtc(&[Path::new("version")]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("pegtc {}\n", env!("CARGO_PKG_VERSION"))
    );
}
