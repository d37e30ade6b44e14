//! Rust Code Generation Backend for pegt
//!
//! Turns a checked [`pegt_ir::Grammar`] into the source of one Rust module:
//! typed declarations for the values the grammar builds and a backtracking
//! recursive-descent parser producing them.
//!
//! # Architecture
//!
//! ```text
//!      Grammar
//!         ↓
//!   check_grammar     (every expression has a type)
//!         ↓
//!   Declarations      (records and enums per named type)
//!         ↓
//!   emit_rule × N     (one `parse_<Rule>` routine per rule)
//!         ↓
//!   module source     (declarations + runtime + parser)
//! ```
//!
//! Generated parsers need nothing beyond `std`; the runtime they use is
//! emitted inline.

mod context;
mod decls;
mod error;
mod expr;
mod module;
mod names;
mod rule;
mod runtime;
mod types;

pub use error::CodegenError;
pub use module::generate;

/// Options controlling the generated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Start the module with a "generated, do not edit" comment.
    pub emit_header: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            indent_width: 4,
            emit_header: true,
        }
    }
}
