//! Rust spelling of value types.

use pegt_types::ValueType;

/// The Rust type generated code uses for values of type `ty`.
///
/// Named types are boxed so mutually recursive records have a size.
pub fn rust_type(ty: &ValueType) -> String {
    match ty {
        ValueType::Span => "Span".to_string(),
        ValueType::Named(name) => format!("Box<{name}>"),
        ValueType::List(item) => format!("Vec<{}>", rust_type(item)),
        ValueType::Option(inner) => format!("Option<{}>", rust_type(inner)),
        ValueType::Unit => "()".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rust_types() {
        assert_eq!(rust_type(&ValueType::Span), "Span");
        assert_eq!(rust_type(&ValueType::Unit), "()");
        assert_eq!(
            rust_type(&ValueType::list(ValueType::option(ValueType::Named(
                "Expr".to_string()
            )))),
            "Vec<Option<Box<Expr>>>"
        );
    }
}
