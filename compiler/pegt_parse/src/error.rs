//! Grammar source errors.

use pegt_diagnostic::{Diagnostic, ErrorCode};
use pegt_ir::GrammarError;

/// An error in grammar source text, located by byte offset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("unrecognized character `{ch}`")]
    UnrecognizedChar { offset: usize, ch: char },

    #[error("unterminated string literal")]
    UnterminatedString { offset: usize },

    #[error("invalid escape sequence `\\{ch}`")]
    InvalidEscape { offset: usize, ch: char },

    #[error("invalid character range: {reason}")]
    InvalidRange { offset: usize, reason: &'static str },

    #[error("rule `{rule}` is defined with `:=` but declared as `{ty}`")]
    SliceRuleType {
        offset: usize,
        rule: String,
        ty: String,
    },

    #[error("{error}")]
    Grammar { offset: usize, error: GrammarError },
}

impl ParseError {
    /// Byte offset of the error in the grammar source.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Unexpected { offset, .. }
            | ParseError::UnrecognizedChar { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidEscape { offset, .. }
            | ParseError::InvalidRange { offset, .. }
            | ParseError::SliceRuleType { offset, .. }
            | ParseError::Grammar { offset, .. } => *offset,
        }
    }

    /// Convert to a diagnostic pointing at the error offset.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = match self {
            ParseError::Unexpected { .. } => Diagnostic::error(ErrorCode::E0001),
            ParseError::UnrecognizedChar { .. } => Diagnostic::error(ErrorCode::E0002),
            ParseError::UnterminatedString { .. } => Diagnostic::error(ErrorCode::E0003)
                .with_suggestion("add a closing `\"`"),
            ParseError::InvalidEscape { .. } => Diagnostic::error(ErrorCode::E0004)
                .with_note("valid escapes are \\n \\t \\r \\\\ \\\" \\' \\] and \\-"),
            ParseError::InvalidRange { .. } => Diagnostic::error(ErrorCode::E0005),
            ParseError::SliceRuleType { .. } => Diagnostic::error(ErrorCode::E0006)
                .with_suggestion("use `=` with `direct` or `{ ... }` for typed rules"),
            ParseError::Grammar { error, .. } => error.to_diagnostic(),
        };
        diag.with_message(self.to_string()).with_offset(self.offset())
    }
}
