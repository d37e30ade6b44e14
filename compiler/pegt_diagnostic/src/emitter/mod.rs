//! Diagnostic emitters.
//!
//! Only human-readable terminal output is provided; the CLI is the sole
//! consumer.

mod terminal;

pub use terminal::{ColorMode, SourceFile, TerminalEmitter};
