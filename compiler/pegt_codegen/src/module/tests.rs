#![allow(clippy::unwrap_used, clippy::expect_used)]

use pegt_ir::{Expr, Rule, Type, Variant};
use pegt_parse::parse_grammar;
use pegt_types::TypeError;
use pretty_assertions::assert_eq;

use super::*;

const NUM: &str = "start Num; Num = { value: ^+Digit; }; Digit := [0-9];";

fn generate_source(source: &str) -> Result<String, CodegenError> {
    generate(&parse_grammar(source).unwrap(), &CodegenOptions::default())
}

fn opaque(name: &str, namespace: Option<&str>) -> Grammar {
    Grammar::new(
        name,
        vec![Rule::new(name, Type::Opaque, vec![Variant::NonConstructing(Expr::AnyChar)])],
        namespace.map(str::to_string),
    )
    .unwrap()
}

#[test]
fn test_layout() {
    let code = generate_source(NUM).unwrap();
    assert!(code.starts_with("// @generated by pegtc. Do not edit.\n\n#[derive("));

    let order = [
        "pub struct Num {",
        "pub struct Span {",
        "pub struct ParseError {",
        "pub struct Parser<'s> {",
        "pub fn parse(&mut self) -> Result<Box<Num>, ParseError> {",
        "pub fn parse(source: &str) -> Result<Box<Num>, ParseError> {",
        "#[allow(unused, non_snake_case, clippy::all, clippy::pedantic)]",
        "pub fn parse_Num(&mut self) -> Result<Box<Num>, ParseError> {",
        "pub fn parse_Digit(&mut self) -> Result<Span, ParseError> {",
    ];
    let positions: Vec<usize> = order.iter().map(|s| code.find(s).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(code.ends_with("        Ok(_tmp0)\n    }\n}\n"));
}

#[test]
fn test_without_header() {
    let options = CodegenOptions {
        emit_header: false,
        ..CodegenOptions::default()
    };
    let code = generate(&parse_grammar(NUM).unwrap(), &options).unwrap();
    assert!(code.starts_with("#[derive(Clone, Debug, PartialEq, Eq)]\npub struct Num {\n"));
}

#[test]
fn test_namespace_nests_modules() {
    let code = generate_source("package calc.ast; start A; A := .;").unwrap();
    assert!(code.contains("\npub mod calc {\n    pub mod ast {\n        /// A span"));
    assert!(code.ends_with("        }\n    }\n}\n"));

    let colons = generate_source("package calc::ast; start A; A := .;").unwrap();
    assert_eq!(code, colons);
}

#[test]
fn test_indent_width() {
    let options = CodegenOptions {
        indent_width: 2,
        emit_header: true,
    };
    let code = generate(&parse_grammar(NUM).unwrap(), &options).unwrap();
    assert!(code.contains("\n  pub start: usize,\n"));
    assert!(code.contains("\n    let _tmp0 = self.char_range('0', '9', \"[0-9]\")?;\n"));
}

#[test]
fn test_deterministic() {
    let source = r#"
        start Expr;
        Expr
            | Add { lhs: Atom; drop "+"; rhs: Expr; }
            | direct Atom;
        Atom : Expr | Lit { text: ^+[0-9]; } | Neg { drop "-"; inner: Atom; };
    "#;
    assert_eq!(generate_source(source), generate_source(source));
}

#[test]
fn test_type_errors_stop_generation() {
    assert_eq!(
        generate_source(r#"start A; A := *"x";"#),
        Err(CodegenError::Type(TypeError::AlternativeTypeMismatch {
            rule: "A".to_string(),
            expected: pegt_types::ValueType::Span,
            found: pegt_types::ValueType::list(pegt_types::ValueType::Span),
        }))
    );
    assert_eq!(
        generate_source("start A; A := B;"),
        Err(CodegenError::Type(TypeError::UnknownRule("B".to_string())))
    );
}

#[test]
fn test_invalid_names() {
    let options = CodegenOptions::default();
    assert_eq!(
        generate(&opaque("A", Some("a..b")), &options),
        Err(CodegenError::InvalidNamespace("a..b".to_string()))
    );
    assert_eq!(
        generate(&opaque("A", Some("calc::fn")), &options),
        Err(CodegenError::InvalidNamespace("calc::fn".to_string()))
    );
    assert_eq!(
        generate(&opaque("bad-name", None), &options),
        Err(CodegenError::InvalidIdentifier {
            what: "rule",
            name: "bad-name".to_string(),
        })
    );
    assert!(generate(&opaque("loop", None), &options)
        .unwrap()
        .contains("pub fn parse_loop(&mut self)"));
}

#[test]
fn test_declaration_errors_stop_generation() {
    assert_eq!(
        generate_source(r#"start Parser; Parser = { x: "a"; };"#),
        Err(CodegenError::ReservedName {
            what: "type",
            name: "Parser".to_string(),
        })
    );
}
