//! Error codes for all pegt diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all pegt diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Grammar syntax errors
/// - E1xxx: Grammar structure errors
/// - E2xxx: Type inference errors
/// - E3xxx: Code generation errors
/// - E9xxx: Driver and I/O errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Grammar Syntax Errors (E0xxx)
    /// Unexpected token
    E0001,
    /// Unrecognized character
    E0002,
    /// Unterminated string literal
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Empty or inverted character range
    E0005,
    /// Slice rule (`:=`) with a non-slice type annotation
    E0006,

    // Grammar Structure Errors (E1xxx)
    /// Start rule not found
    E1001,
    /// Duplicate rule
    E1002,
    /// Empty sequence
    E1003,
    /// Sequence without a kept item
    E1004,
    /// Sequence with several kept items
    E1005,
    /// Token rule without a whitespace rule
    E1006,

    // Type Inference Errors (E2xxx)
    /// Reference to an unknown rule
    E2001,
    /// Empty choice
    E2002,
    /// Sequence keep index out of bounds
    E2003,
    /// Alternative produces a value of the wrong type
    E2004,

    // Code Generation Errors (E3xxx)
    /// Constructing alternative in a slice rule
    E3001,
    /// Type is both a record and a union
    E3002,
    /// Named type with no constructing alternative
    E3003,
    /// Name is not a valid identifier
    E3004,
    /// Name is reserved by the generated module
    E3005,
    /// Type or variant declared twice
    E3006,
    /// Duplicate field in a constructing alternative
    E3007,
    /// Invalid package path
    E3008,

    // Driver Errors (E9xxx)
    /// Cannot read input file
    E9001,
    /// Cannot write output file
    E9002,
    /// Invalid command-line usage
    E9003,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            // Structure
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Types
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Codegen
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            // Driver
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
