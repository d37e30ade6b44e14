//! Parsers generated from the grammars in `grammars/`.
//!
//! Each module is the unmodified output of `pegtc` for one grammar. The
//! `calc` and `meta` grammars declare a package, so their output already
//! contains the module nesting.

macro_rules! generated {
    ($($file:literal),* $(,)?) => {
        $(include!(concat!(env!("OUT_DIR"), "/", $file, ".rs"));)*
    };
}

/// Scenario: `Num = { value: ^+Digit; }`.
#[allow(clippy::all, clippy::pedantic)]
pub mod digits {
    generated!("digits");
}

/// Scenario: a rule with two literal alternatives.
#[allow(clippy::all, clippy::pedantic)]
pub mod choice {
    generated!("choice");
}

/// Scenario: kept and dropped record items.
#[allow(clippy::all, clippy::pedantic)]
pub mod record {
    generated!("record");
}

/// Scenario: an optional field.
#[allow(clippy::all, clippy::pedantic)]
pub mod optional {
    generated!("optional");
}

/// Repetition, optional and lookahead probes.
#[allow(clippy::all, clippy::pedantic)]
pub mod props {
    generated!("props");
}

#[allow(clippy::all, clippy::pedantic)]
mod packaged {
    generated!("calc", "meta");
}

/// A statement language over integer arithmetic.
pub use packaged::calc;
/// The grammar syntax, parsed by a parser generated from itself.
pub use packaged::pegt::meta;
