//! Parser for the textual grammar syntax.
//!
//! ```text
//! package calc.ast;
//! start Num;
//!
//! Digit := [0-9];
//! Num = { value: ^+Digit; };
//! ```
//!
//! [`parse_grammar`] turns grammar source into a [`pegt_ir::Grammar`]. Errors
//! carry the byte offset they occurred at and convert to diagnostics with
//! [`ParseError::to_diagnostic`].

mod cursor;
mod error;
mod grammar;
mod lexer;

pub use error::ParseError;

use cursor::Cursor;
use grammar::Parser;

/// Parse grammar source text.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_grammar(source: &str) -> Result<pegt_ir::Grammar, ParseError> {
    let tokens = lexer::tokenize(source)?;
    tracing::trace!(tokens = tokens.len(), "lexed");
    let grammar = Parser::new(Cursor::new(source, &tokens)).parse_grammar()?;
    tracing::debug!(rules = grammar.rules().len(), "grammar parsed");
    Ok(grammar)
}
