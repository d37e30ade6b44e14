//! Errors raised while assembling a grammar.
//!
//! These are configuration errors: the grammar itself is malformed, so
//! nothing downstream can run.

/// A structural problem with a grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// The start rule does not name any rule.
    #[error("start rule `{0}` not found")]
    UnknownStartRule(String),

    /// Two rules share a name.
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    /// A sequence was built with no items.
    #[error("a sequence needs at least one item")]
    EmptySequence,

    /// A multi-item sequence has no item marked to keep.
    #[error("a sequence of {len} items needs exactly one kept item, found none")]
    NoKeptItem { len: usize },

    /// A multi-item sequence has more than one item marked to keep.
    #[error("only one item of a sequence can be kept (items {first} and {second} are both kept)")]
    MultipleKeptItems { first: usize, second: usize },

    /// A token rule was requested but no whitespace rule was configured.
    #[error("token `{0}` needs a whitespace rule; configure one with `GrammarBuilder::with_whitespace`")]
    MissingWhitespaceRule(String),
}

impl GrammarError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self) -> pegt_diagnostic::Diagnostic {
        use pegt_diagnostic::{Diagnostic, ErrorCode};

        let code = match self {
            GrammarError::UnknownStartRule(_) => ErrorCode::E1001,
            GrammarError::DuplicateRule(_) => ErrorCode::E1002,
            GrammarError::EmptySequence => ErrorCode::E1003,
            GrammarError::NoKeptItem { .. } => ErrorCode::E1004,
            GrammarError::MultipleKeptItems { .. } => ErrorCode::E1005,
            GrammarError::MissingWhitespaceRule(_) => ErrorCode::E1006,
        };
        let diag = Diagnostic::error(code).with_message(self.to_string());
        match self {
            GrammarError::NoKeptItem { .. } => {
                diag.with_suggestion("mark the item whose value the sequence produces with `#`")
            }
            GrammarError::UnknownStartRule(_) => {
                diag.with_note("the start rule is named by the `start` clause")
            }
            _ => diag,
        }
    }
}
