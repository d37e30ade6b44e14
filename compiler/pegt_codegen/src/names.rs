//! Rust identifiers for grammar names.

use crate::CodegenError;

/// Strict and reserved keywords of Rust 2021.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NOT_RAW: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Names the generated module defines or refers to unqualified.
const RESERVED: &[&str] = &[
    "Span", "ParseError", "Parser", "Box", "Vec", "Option", "Some", "None", "Result", "Ok",
    "Err", "String", "usize", "char", "str",
];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Check a declared type or variant name.
pub fn check_type_name(what: &'static str, name: &str) -> Result<(), CodegenError> {
    if !is_identifier(name) || is_keyword(name) {
        return Err(CodegenError::InvalidIdentifier {
            what,
            name: name.to_string(),
        });
    }
    if RESERVED.contains(&name) {
        return Err(CodegenError::ReservedName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Check a rule name. It only appears after `parse_`, so keywords are fine.
pub fn check_rule_name(name: &str) -> Result<(), CodegenError> {
    if is_identifier(name) || name == "_" {
        Ok(())
    } else {
        Err(CodegenError::InvalidIdentifier {
            what: "rule",
            name: name.to_string(),
        })
    }
}

/// The Rust spelling of a field name; keywords become raw identifiers.
pub fn field_ident(name: &str) -> Result<String, CodegenError> {
    if NOT_RAW.contains(&name) || !is_identifier(name) {
        return Err(CodegenError::InvalidIdentifier {
            what: "field",
            name: name.to_string(),
        });
    }
    if is_keyword(name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(name.to_string())
    }
}

/// Split a `.` or `::` separated module path into its segments.
pub fn module_path(namespace: &str) -> Result<Vec<&str>, CodegenError> {
    let segments: Vec<&str> = if namespace.contains("::") {
        namespace.split("::").collect()
    } else {
        namespace.split('.').collect()
    };
    if segments
        .iter()
        .all(|segment| is_identifier(segment) && !is_keyword(segment))
    {
        Ok(segments)
    } else {
        Err(CodegenError::InvalidNamespace(namespace.to_string()))
    }
}
