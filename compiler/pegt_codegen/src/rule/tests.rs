#![allow(clippy::unwrap_used, clippy::expect_used)]

use pegt_ir::{Expr, Type};
use pegt_parse::parse_grammar;
use pretty_assertions::assert_eq;

use super::*;

fn emit(grammar: &Grammar, rule: &str) -> Result<String, CodegenError> {
    let mut ctx = CodegenContext::new(4);
    emit_rule(&mut ctx, grammar, grammar.rule(rule).unwrap())?;
    Ok(ctx.take_output())
}

#[test]
fn test_single_alternative_opaque_rule() {
    let grammar = parse_grammar("start Digit; Digit := [0-9];").unwrap();
    assert_eq!(
        emit(&grammar, "Digit").unwrap(),
        r#"pub fn parse_Digit(&mut self) -> Result<Span, ParseError> {
    let _tmp0 = self.char_range('0', '9', "[0-9]")?;
    Ok(_tmp0)
}
"#
    );
}

#[test]
fn test_alternatives_return_first_success() {
    let grammar = parse_grammar(r#"start A; A : slice | direct "x" | direct "y";"#).unwrap();
    assert_eq!(
        emit(&grammar, "A").unwrap(),
        r#"pub fn parse_A(&mut self) -> Result<Span, ParseError> {
    let _tmp0 = self.pos;
    let _tmp2: Result<Span, ParseError> = 'blk0: {
        let _tmp3 = match self.literal("x", "\"x\"") { Ok(v) => v, Err(e) => break 'blk0 Err(e) };
        Ok(_tmp3)
    };
    let mut _tmp1 = match _tmp2 { Ok(v) => return Ok(v), Err(e) => e };
    self.pos = _tmp0;
    let _tmp4: Result<Span, ParseError> = 'blk1: {
        let _tmp5 = match self.literal("y", "\"y\"") { Ok(v) => v, Err(e) => break 'blk1 Err(e) };
        Ok(_tmp5)
    };
    _tmp1 = match _tmp4 { Ok(v) => return Ok(v), Err(e) => _tmp1.ingest(e) };
    self.pos = _tmp0;
    Err(_tmp1)
}
"#
    );
}

#[test]
fn test_record_construction() {
    let grammar = parse_grammar(
        "start Num;\n\
         Digit := [0-9];\n\
         Num = { value: ^+Digit; };\n",
    )
    .unwrap();
    let code = emit(&grammar, "Num").unwrap();
    assert!(code.starts_with("pub fn parse_Num(&mut self) -> Result<Box<Num>, ParseError> {\n"));
    assert!(code.contains("    let _tmp5 = Span::new(_tmp0, self.pos);\n"));
    assert!(code.ends_with("    let _tmp6 = Box::new(Num { value: _tmp5 });\n    Ok(_tmp6)\n}\n"));
}

#[test]
fn test_union_construction_and_forwarding() {
    let grammar = parse_grammar(
        r#"
        start Expr;
        Expr
            | Add { lhs: Atom; drop "+"; rhs: Expr; }
            | direct Atom;
        Atom : Expr | Lit { text: ^+[0-9]; };
        "#,
    )
    .unwrap();
    let code = emit(&grammar, "Expr").unwrap();
    assert!(code.contains(
        "let _tmp3 = match self.parse_Atom() { Ok(v) => v, Err(e) => break 'blk0 Err(e) };"
    ));
    assert!(code.contains("let _tmp6 = Box::new(Expr::Add(Add { lhs: _tmp3, rhs: _tmp5 }));"));
    // The forwarding alternative passes the value through unchanged.
    assert!(code.contains(
        "let _tmp8 = match self.parse_Atom() { Ok(v) => v, Err(e) => break 'blk1 Err(e) };\n        Ok(_tmp8)\n"
    ));

    let atom = emit(&grammar, "Atom").unwrap();
    assert!(atom.starts_with("pub fn parse_Atom(&mut self) -> Result<Box<Expr>, ParseError> {\n"));
    assert!(atom.contains("Box::new(Expr::Lit(Lit { text: _tmp"));
}

#[test]
fn test_keyword_field_is_raw() {
    let grammar = parse_grammar(r#"start K; K = { type: "t"; };"#).unwrap();
    assert!(emit(&grammar, "K")
        .unwrap()
        .contains("let _tmp1 = Box::new(K { r#type: _tmp0 });"));
}

#[test]
fn test_record_without_fields() {
    let grammar = parse_grammar(r#"start E; E = { drop "e"; };"#).unwrap();
    assert!(emit(&grammar, "E")
        .unwrap()
        .contains("let _tmp1 = Box::new(E {});"));
}

#[test]
fn test_constructing_in_opaque_rule() {
    let grammar = Grammar::new(
        "S",
        vec![Rule::new(
            "S",
            Type::Opaque,
            vec![Variant::constructing("S", vec![Item::keep("x", Expr::AnyChar)])],
        )],
        None,
    )
    .unwrap();
    assert_eq!(
        emit(&grammar, "S"),
        Err(CodegenError::ConstructingInOpaque {
            rule: "S".to_string(),
            variant: "S".to_string(),
        })
    );
}

#[test]
fn test_rule_without_alternatives() {
    let grammar =
        Grammar::new("Never", vec![Rule::new("Never", Type::Opaque, vec![])], None).unwrap();
    assert_eq!(
        emit(&grammar, "Never"),
        Err(CodegenError::Type(TypeError::EmptyChoice))
    );
}
