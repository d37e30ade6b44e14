//! Type inference errors.

use crate::ValueType;

/// A grammar whose expressions cannot be typed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("reference to unknown rule `{0}`")]
    UnknownRule(String),

    #[error("choice with no options")]
    EmptyChoice,

    #[error("sequence keeps item {keep} but has only {len} items")]
    KeepIndexOutOfBounds { keep: usize, len: usize },

    /// A non-constructing alternative produces something other than the
    /// rule's declared type.
    #[error("alternative of rule `{rule}` produces `{found}`, but the rule is declared as `{expected}`")]
    AlternativeTypeMismatch {
        rule: String,
        expected: ValueType,
        found: ValueType,
    },
}

impl TypeError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self) -> pegt_diagnostic::Diagnostic {
        use pegt_diagnostic::{Diagnostic, ErrorCode};

        match self {
            TypeError::UnknownRule(_) => {
                Diagnostic::error(ErrorCode::E2001).with_message(self.to_string())
            }
            TypeError::EmptyChoice => Diagnostic::error(ErrorCode::E2002)
                .with_message(self.to_string())
                .with_note("a choice needs at least one option to take its type from"),
            TypeError::KeepIndexOutOfBounds { .. } => {
                Diagnostic::error(ErrorCode::E2003).with_message(self.to_string())
            }
            TypeError::AlternativeTypeMismatch { expected, .. } => {
                let diag = Diagnostic::error(ErrorCode::E2004).with_message(self.to_string());
                match expected {
                    ValueType::Span => diag.with_suggestion("capture the match as a slice with `^`"),
                    _ => diag,
                }
            }
        }
    }
}
