//! Diagnostic system for reporting grammar and generator errors.
//!
//! Every phase converts its error type into a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - An optional byte offset into the grammar source (where it went wrong)
//! - Notes and suggestions (why, and how to fix)
//!
//! [`emitter::TerminalEmitter`] renders diagnostics for humans, using
//! [`span_utils::render_highlight`] to point at the offending column.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
