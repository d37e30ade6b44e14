#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn kept(expr: Expr) -> (bool, Expr) {
    (true, expr)
}

fn dropped(expr: Expr) -> (bool, Expr) {
    (false, expr)
}

#[test]
fn test_sequence_of_one_is_the_item() {
    assert_eq!(sequence(vec![dropped(Expr::AnyChar)]), Ok(Expr::AnyChar));
    assert_eq!(sequence(vec![kept(Expr::AnyChar)]), Ok(Expr::AnyChar));
}

#[test]
fn test_sequence_keep_index() {
    let expr = sequence(vec![
        dropped(Expr::literal("(")),
        kept(Expr::reference("Expr")),
        dropped(Expr::literal(")")),
    ])
    .unwrap();
    assert_eq!(
        expr,
        Expr::sequence(
            1,
            vec![
                Expr::literal("("),
                Expr::reference("Expr"),
                Expr::literal(")"),
            ]
        )
    );
}

#[test]
fn test_sequence_errors() {
    assert_eq!(sequence(Vec::new()), Err(GrammarError::EmptySequence));
    assert_eq!(
        sequence(vec![dropped(Expr::AnyChar), dropped(Expr::AnyChar)]),
        Err(GrammarError::NoKeptItem { len: 2 })
    );
    assert_eq!(
        sequence(vec![
            kept(Expr::AnyChar),
            dropped(Expr::AnyChar),
            kept(Expr::AnyChar)
        ]),
        Err(GrammarError::MultipleKeptItems {
            first: 0,
            second: 2
        })
    );
}

#[test]
fn test_tokens_are_deduplicated() {
    let mut g = GrammarBuilder::with_whitespace("WS");
    g.alias("WS", Type::Opaque, |s| {
        s.keep(Expr::many(Expr::literal(" ")));
    });
    let first = g.token("+");
    let second = g.token("-");
    let again = g.token("+");
    assert_eq!(first, Expr::reference("Token0"));
    assert_eq!(second, Expr::reference("Token1"));
    assert_eq!(again, first);

    let grammar = g.finish("WS", None).unwrap();
    let names: Vec<_> = grammar.rules().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["WS", "Token0", "Token1"]);

    let token = grammar.rule("Token0").unwrap();
    assert_eq!(token.ty, Type::Opaque);
    assert_eq!(
        token.alternatives,
        vec![Variant::NonConstructing(Expr::sequence(
            0,
            vec![Expr::literal("+"), Expr::reference("WS")]
        ))]
    );
}

#[test]
fn test_token_without_whitespace_rule() {
    let mut g = GrammarBuilder::new();
    g.single("Start", |f| f.token(";"));
    let err = g.finish("Start", None).unwrap_err();
    assert_eq!(err, GrammarError::MissingWhitespaceRule("Token0".to_string()));
}

#[test]
fn test_first_error_wins() {
    let mut g = GrammarBuilder::new();
    g.alias("A", Type::Opaque, |_| {});
    g.alias("B", Type::Opaque, |s| {
        s.drop(Expr::AnyChar);
        s.drop(Expr::AnyChar);
    });
    assert_eq!(g.finish("A", None), Err(GrammarError::EmptySequence));
}

#[test]
fn test_single_and_variants() {
    let mut g = GrammarBuilder::new();
    let atom = g.variants("Atom", |v| {
        v.constructing("Num", |f| {
            f.keep("digits", Expr::as_string(Expr::many1(Expr::range('0', '9'))));
        });
        v.direct(|s| {
            s.drop(Expr::literal("("));
            s.keep(Expr::reference("Sum"));
            s.drop(Expr::literal(")"));
        });
    });
    g.single_of("Sum", Type::named("Atom"), |f| {
        f.keep("first", atom.clone());
        f.keep_with("rest", |s| {
            let rest = s.grammar().repeat(0, |r| {
                r.drop(Expr::literal("+"));
                r.keep(atom.clone());
            });
            s.keep(rest);
        });
    });

    let grammar = g.finish("Sum", Some("calc")).unwrap();
    let sum = grammar.rule("Sum").unwrap();
    assert_eq!(sum.ty, Type::named("Atom"));
    assert_eq!(
        sum.alternatives,
        vec![Variant::constructing(
            "Sum",
            vec![
                Item::keep("first", Expr::reference("Atom")),
                Item::keep(
                    "rest",
                    Expr::many(Expr::sequence(
                        1,
                        vec![Expr::literal("+"), Expr::reference("Atom")]
                    ))
                ),
            ]
        )]
    );

    let atom = grammar.rule("Atom").unwrap();
    assert_eq!(atom.alternatives.len(), 2);
    assert!(matches!(
        &atom.alternatives[1],
        Variant::NonConstructing(Expr::Sequence { keep: 1, .. })
    ));
}

/// The bootstrap grammar expressed with the builder.
fn grammar_of_grammars() -> Result<Grammar, GrammarError> {
    let mut g = GrammarBuilder::with_whitespace("WS");
    let id = g.named_token("Id", |s| {
        s.keep(Expr::as_string(Expr::many1(Expr::choice(vec![
            Expr::range('a', 'z'),
            Expr::range('A', 'Z'),
        ]))));
    });
    let rule = Expr::reference("Rule");
    let expr = Expr::reference("Expr");
    let field = Expr::reference("Field");

    g.single("Grammar", |f| {
        f.token("start");
        f.keep("start", id.clone());
        f.token(";");
        f.keep("rules", Expr::many1(rule));
    });
    g.single("Rule", |f| {
        f.keep("name", id.clone());
        let ty = f.grammar().option(|s| {
            s.token(":");
            s.keep(id.clone());
        });
        f.keep("type", ty);
        f.keep("expansion", Expr::reference("Expansion"));
        f.token(";");
    });
    g.variants("Expansion", |v| {
        v.constructing("SingleConstructing", |f| {
            f.token("=");
            f.token("{");
            f.keep("fields", Expr::many(field.clone()));
            f.token("}");
        });
        v.constructing("SingleSlice", |f| {
            f.token(":=");
            f.keep("expr", expr.clone());
        });
    });
    g.variants("Field", |v| {
        v.constructing("DropItem", |f| {
            f.token("drop");
            f.keep("expr", expr.clone());
            f.token(";");
        });
        v.constructing("KeepItem", |f| {
            f.keep("name", id.clone());
            f.token(":");
            f.keep("expr", expr.clone());
            f.token(";");
        });
    });
    g.variants("Expr", |v| {
        v.constructing("Literal", |f| {
            f.drop_literal("\"");
            f.keep_with("chars", |s| {
                let chars = s.grammar().repeat(0, |r| {
                    r.drop(Expr::negate(Expr::literal("\"")));
                    r.keep(Expr::AnyChar);
                });
                s.keep(Expr::as_string(chars));
            });
            f.token("\"");
        });
        v.direct(|s| {
            s.token("(");
            s.keep(expr.clone());
            s.token(")");
        });
        v.constructing("Reference", |f| f.keep("target", id.clone()));
    });
    g.alias("WS", Type::Opaque, |s| {
        s.keep(Expr::as_string(Expr::many(Expr::choice(vec![
            Expr::literal(" "),
            Expr::literal("\n"),
        ]))));
    });
    g.finish("Grammar", Some("pegt.bootstrap"))
}

#[test]
fn test_grammar_of_grammars() {
    let grammar = grammar_of_grammars().unwrap();
    assert_eq!(grammar.start(), "Grammar");
    assert_eq!(grammar.namespace(), Some("pegt.bootstrap"));

    // One token rule per distinct literal, in first-use order.
    let tokens: Vec<_> = grammar
        .rules()
        .iter()
        .filter(|rule| rule.name.starts_with("Token"))
        .map(|rule| match &rule.alternatives[0] {
            Variant::NonConstructing(Expr::Sequence { children, .. }) => children[0].clone(),
            other => panic!("unexpected token shape: {other:?}"),
        })
        .collect();
    let literals = ["start", ";", ":", "=", "{", "}", ":=", "drop", "\"", "(", ")"];
    assert_eq!(
        tokens,
        literals.iter().map(|l| Expr::literal(*l)).collect::<Vec<_>>()
    );

    let field = grammar.rule("Field").unwrap();
    let names: Vec<_> = field
        .alternatives
        .iter()
        .map(|variant| match variant {
            Variant::Constructing { name, .. } => name.as_str(),
            Variant::NonConstructing(_) => "direct",
        })
        .collect();
    assert_eq!(names, vec!["DropItem", "KeepItem"]);
}
