//! Semantic result types of expressions.

use std::fmt;

use pegt_ir::Type;

/// The type of value an expression produces on a successful match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A span of the input.
    Span,
    /// A declared record or union.
    Named(String),
    /// Zero or more values, in match order.
    List(Box<ValueType>),
    /// A value or nothing.
    Option(Box<ValueType>),
    /// No usable value; only success matters.
    Unit,
}

impl ValueType {
    /// The type a rule with the declared type `ty` produces.
    pub fn of_rule(ty: &Type) -> Self {
        match ty {
            Type::Opaque => ValueType::Span,
            Type::Named(name) => ValueType::Named(name.clone()),
        }
    }

    pub fn list(item: ValueType) -> Self {
        ValueType::List(Box::new(item))
    }

    pub fn option(inner: ValueType) -> Self {
        ValueType::Option(Box::new(inner))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Span => f.write_str("slice"),
            ValueType::Named(name) => f.write_str(name),
            ValueType::List(item) => write!(f, "[{item}]"),
            ValueType::Option(inner) => write!(f, "{inner}?"),
            ValueType::Unit => f.write_str("()"),
        }
    }
}
