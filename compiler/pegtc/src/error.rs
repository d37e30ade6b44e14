//! Driver errors.

use std::io;
use std::path::Path;

use pegt_codegen::CodegenError;
use pegt_diagnostic::{Diagnostic, ErrorCode};

/// Anything that stops a grammar file from becoming a parser module.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] pegt_parse::ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("{0}")]
    Read(String),

    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    pub(crate) fn read(path: &Path, error: &io::Error) -> Self {
        let path = path.display();
        DriverError::Read(match error.kind() {
            io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {error}"),
        })
    }

    pub(crate) fn write(path: &Path, error: &io::Error) -> Self {
        DriverError::Write(format!("error writing '{}': {error}", path.display()))
    }

    /// Convert to a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DriverError::Parse(error) => error.to_diagnostic(),
            DriverError::Codegen(error) => error.to_diagnostic(),
            DriverError::Read(message) => Diagnostic::error(ErrorCode::E9001).with_message(message),
            DriverError::Write(message) => {
                Diagnostic::error(ErrorCode::E9002).with_message(message)
            }
            DriverError::Usage(message) => Diagnostic::error(ErrorCode::E9003)
                .with_message(message)
                .with_suggestion("run `pegtc help` for usage"),
        }
    }
}
