//! Grammar intermediate representation.
//!
//! A [`Grammar`] is an immutable value tree: an ordered list of [`Rule`]s, each
//! with a declared result [`Type`] and ordered alternatives ([`Variant`]s).
//! Alternatives either construct a named value from kept [`Item`]s or forward
//! the value of a single [`Expr`].
//!
//! Grammars come from two places:
//! - the textual grammar syntax, parsed by `pegt_parse`
//! - the [`builder`] DSL, for grammars assembled in Rust code
//!
//! The `Display` impls render the textual syntax, which is what the CLI
//! prints as its rule dump.

pub mod builder;
mod display;
mod error;
mod expr;
mod grammar;

pub use error::GrammarError;
pub use expr::Expr;
pub use grammar::{Grammar, Item, Rule, Type, Variant};
