//! Code generation errors.
//!
//! All of these are configuration errors in the grammar: they are raised
//! before any text is produced and nothing is retried.

use pegt_diagnostic::{Diagnostic, ErrorCode};
use pegt_types::TypeError;

/// A grammar that cannot be turned into a Rust module.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("rule `{rule}` produces a slice but its alternative `{variant}` constructs a value")]
    ConstructingInOpaque { rule: String, variant: String },

    /// A type has a constructor named after itself next to other
    /// constructors, so it is neither clearly a record nor a union.
    #[error(
        "type `{ty}` has {count} constructing alternatives, one of them named `{ty}`; \
         it cannot be both a record and a union"
    )]
    AmbiguousShape { ty: String, count: usize },

    #[error("type `{0}` is declared but no alternative constructs it")]
    NoConstructor(String),

    #[error("`{name}` is not a valid {what} name")]
    InvalidIdentifier { what: &'static str, name: String },

    #[error("{what} name `{name}` is reserved in generated code")]
    ReservedName { what: &'static str, name: String },

    #[error("`{0}` is declared more than once")]
    DuplicateDeclaration(String),

    #[error("`{variant}` has more than one field named `{field}`")]
    DuplicateField { variant: String, field: String },

    #[error("`{0}` is not a valid module path")]
    InvalidNamespace(String),
}

impl CodegenError {
    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            CodegenError::Type(error) => return error.to_diagnostic(),
            CodegenError::ConstructingInOpaque { .. } => ErrorCode::E3001,
            CodegenError::AmbiguousShape { .. } => ErrorCode::E3002,
            CodegenError::NoConstructor(_) => ErrorCode::E3003,
            CodegenError::InvalidIdentifier { .. } => ErrorCode::E3004,
            CodegenError::ReservedName { .. } => ErrorCode::E3005,
            CodegenError::DuplicateDeclaration(_) => ErrorCode::E3006,
            CodegenError::DuplicateField { .. } => ErrorCode::E3007,
            CodegenError::InvalidNamespace(_) => ErrorCode::E3008,
        };
        let diag = Diagnostic::error(code).with_message(self.to_string());
        match self {
            CodegenError::ConstructingInOpaque { .. } => {
                diag.with_suggestion("declare the rule with a named type instead of `slice`")
            }
            CodegenError::AmbiguousShape { ty, .. } => diag
                .with_note("a record is declared by one alternative named after its type")
                .with_suggestion(format!("rename the `{ty}` alternative")),
            CodegenError::ReservedName { .. } => {
                diag.with_note("the generated module defines or uses this name itself")
            }
            _ => diag,
        }
    }
}
