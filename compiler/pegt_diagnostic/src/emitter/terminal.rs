//! Terminal Emitter
//!
//! Renders a [`Diagnostic`] the way the CLI prints it:
//!
//! ```text
//! error[E0001]: expected `;`
//!  --> calc.peg:2:4
//! 2 | Num = x
//!        ^
//!  = note: rules end with `;`
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::span_utils::{render_highlight, LineOffsetTable};
use crate::Diagnostic;

/// ANSI escape sequences.
mod ansi {
    pub const RED: &str = "\x1b[1;31m";
    pub const GREEN: &str = "\x1b[1;32m";
    pub const BLUE: &str = "\x1b[1;34m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// When to color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A named grammar source that diagnostic offsets resolve against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            path: path.into(),
            text: text.into(),
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.enabled(is_tty),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    fn paint(&self, out: &mut String, text: &str, style: &str) {
        if self.colors {
            let _ = write!(out, "{style}{text}{}", ansi::RESET);
        } else {
            out.push_str(text);
        }
    }

    /// The full report for `diagnostic`, newline-terminated.
    ///
    /// The location and snippet appear only when the diagnostic has an
    /// offset and a source was attached.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.paint(&mut out, "error", ansi::RED);
        self.paint(&mut out, &format!("[{}]", diagnostic.code), ansi::BOLD);
        let _ = writeln!(out, ": {}", diagnostic.message);

        if let (Some(offset), Some(source)) = (diagnostic.offset, &self.source) {
            let (line, col) =
                LineOffsetTable::build(&source.text).offset_to_line_col(&source.text, offset);
            out.push(' ');
            self.paint(&mut out, "-->", ansi::BLUE);
            let _ = writeln!(out, " {}:{line}:{col}", source.path);
            out.push_str(&render_highlight(&source.text, offset));
        }

        let trailers = diagnostic
            .notes
            .iter()
            .map(|note| ("note", ansi::BOLD, note))
            .chain(diagnostic.suggestions.iter().map(|help| ("help", ansi::GREEN, help)));
        for (label, style, text) in trailers {
            out.push_str(" = ");
            self.paint(&mut out, label, style);
            let _ = writeln!(out, ": {text}");
        }
        out
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        let report = self.render(diagnostic);
        let _ = self.writer.write_all(report.as_bytes());
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

#[cfg(test)]
mod tests;
