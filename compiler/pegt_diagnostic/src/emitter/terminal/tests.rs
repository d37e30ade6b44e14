#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E0001)
        .with_message("expected `;`")
        .with_offset(14)
        .with_note("rules end with `;`")
        .with_suggestion("add `;` after the expansion")
}

fn render(emitter: TerminalEmitter<&mut Vec<u8>>, diagnostic: &Diagnostic) {
    let mut emitter = emitter;
    emitter.emit(diagnostic);
    emitter.flush();
}

#[test]
fn test_terminal_emitter_with_source() {
    let mut output = Vec::new();
    let emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
        .with_source(SourceFile::new("g.peg", "start Num;\nNum = x\n"));
    render(emitter, &sample_diagnostic());

    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text,
        "error[E0001]: expected `;`\n \
         --> g.peg:2:4\n\
         2 | Num = x\n       ^\n \
         = note: rules end with `;`\n \
         = help: add `;` after the expansion\n"
    );
}

#[test]
fn test_terminal_emitter_without_source() {
    let mut output = Vec::new();
    let emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    render(emitter, &sample_diagnostic());

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("error[E0001]: expected `;`\n"));
    assert!(!text.contains("-->"));
    assert!(text.contains("note:"));
    assert!(text.contains("help:"));
}

#[test]
fn test_terminal_emitter_with_color() {
    let mut output = Vec::new();
    let emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);
    render(emitter, &sample_diagnostic());

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("\x1b[1;31merror\x1b[0m"));
    assert!(text.contains("E0001"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.enabled(true));
    assert!(!ColorMode::Auto.enabled(false));
    assert!(ColorMode::Always.enabled(false));
    assert!(!ColorMode::Never.enabled(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

#[test]
fn test_offset_without_source_is_not_rendered() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("cannot find file 'x.peg'");
    assert_eq!(emitter.render(&diag), "error[E9001]: cannot find file 'x.peg'\n");
}
