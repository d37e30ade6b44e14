//! Result type inference for grammar expressions.
//!
//! Every expression produces a value when it matches. [`infer_type`] computes
//! that value's [`ValueType`] by structural recursion, looking up the declared
//! type of referenced rules. [`check_grammar`] validates a whole grammar up
//! front so later passes can infer types without failing.

mod error;
mod infer;
mod value_type;

pub use error::TypeError;
pub use infer::{check_expr, check_grammar, infer_type};
pub use value_type::ValueType;
