#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn digit_rule() -> Rule {
    Rule::new(
        "Digit",
        Type::Opaque,
        vec![Variant::NonConstructing(Expr::range('0', '9'))],
    )
}

fn num_rule() -> Rule {
    Rule::new(
        "Num",
        Type::named("Num"),
        vec![Variant::constructing(
            "Num",
            vec![Item::keep(
                "value",
                Expr::as_string(Expr::many1(Expr::reference("Digit"))),
            )],
        )],
    )
}

#[test]
fn test_lookup_by_name() {
    let grammar = Grammar::new("Num", vec![digit_rule(), num_rule()], None).unwrap();
    assert_eq!(grammar.start(), "Num");
    assert_eq!(grammar.start_rule().name, "Num");
    assert_eq!(grammar.rule("Digit").map(|r| &r.ty), Some(&Type::Opaque));
    assert!(grammar.rule("Missing").is_none());
    assert_eq!(grammar.rules().len(), 2);
}

#[test]
fn test_unknown_start_rule() {
    let err = Grammar::new("Start", vec![digit_rule()], None).unwrap_err();
    assert_eq!(err, GrammarError::UnknownStartRule("Start".to_string()));
}

#[test]
fn test_duplicate_rule() {
    let err = Grammar::new("Digit", vec![digit_rule(), digit_rule()], None).unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule("Digit".to_string()));
}

#[test]
fn test_namespace() {
    let grammar = Grammar::new("Digit", vec![digit_rule()], Some("calc.ast".to_string())).unwrap();
    assert_eq!(grammar.namespace(), Some("calc.ast"));
}

#[test]
fn test_fields_skip_dropped_items() {
    let variant = Variant::constructing(
        "Seq",
        vec![
            Item::keep("a", Expr::literal("foo")),
            Item::drop(Expr::literal(",")),
            Item::keep("c", Expr::literal("bar")),
        ],
    );
    let fields: Vec<_> = variant.fields().map(|(name, _)| name).collect();
    assert_eq!(fields, vec!["a", "c"]);

    let direct = Variant::NonConstructing(Expr::AnyChar);
    assert_eq!(direct.fields().count(), 0);
}

#[test]
fn test_type_name() {
    assert_eq!(Type::Opaque.name(), None);
    assert_eq!(Type::named("Expr").name(), Some("Expr"));
}

#[test]
fn test_error_to_diagnostic() {
    use pegt_diagnostic::ErrorCode;

    let err = Grammar::new("Start", vec![digit_rule()], None).unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "start rule `Start` not found");
    assert_eq!(diag.offset, None);

    let diag = GrammarError::NoKeptItem { len: 3 }.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1004);
    assert_eq!(diag.suggestions.len(), 1);
}
