//! Structural type inference over expressions.

use pegt_ir::{Expr, Grammar, Variant};
use pegt_stack::ensure_sufficient_stack;

use crate::{TypeError, ValueType};

/// Infer the type of value `expr` produces.
///
/// Only the parts of `expr` that determine its value are visited: a
/// sequence looks at its kept child, a choice at its first option. Other
/// options of a choice are not checked for agreement, so a choice whose
/// options produce different types is typed by its first option alone.
/// Use [`check_expr`] to validate every node.
pub fn infer_type(expr: &Expr, grammar: &Grammar) -> Result<ValueType, TypeError> {
    ensure_sufficient_stack(|| infer_type_inner(expr, grammar))
}

fn infer_type_inner(expr: &Expr, grammar: &Grammar) -> Result<ValueType, TypeError> {
    match expr {
        Expr::Literal(_) | Expr::CharRange(..) | Expr::AnyChar | Expr::AsString(_) => {
            Ok(ValueType::Span)
        }
        Expr::Reference(name) => grammar
            .rule(name)
            .map(|rule| ValueType::of_rule(&rule.ty))
            .ok_or_else(|| TypeError::UnknownRule(name.clone())),
        Expr::Repeat { item, .. } => Ok(ValueType::list(infer_type(item, grammar)?)),
        Expr::Negate(_) => Ok(ValueType::Unit),
        Expr::Optional(inner) => Ok(ValueType::option(infer_type(inner, grammar)?)),
        Expr::Sequence { keep, children } => match children.get(*keep) {
            Some(kept) => infer_type(kept, grammar),
            None => Err(TypeError::KeepIndexOutOfBounds {
                keep: *keep,
                len: children.len(),
            }),
        },
        Expr::Choice(options) => match options.first() {
            Some(first) => infer_type(first, grammar),
            None => Err(TypeError::EmptyChoice),
        },
    }
}

/// Check every node of `expr`: references resolve, choices are non-empty
/// and sequence keep indices are in bounds.
pub fn check_expr(expr: &Expr, grammar: &Grammar) -> Result<(), TypeError> {
    ensure_sufficient_stack(|| check_expr_inner(expr, grammar))
}

fn check_expr_inner(expr: &Expr, grammar: &Grammar) -> Result<(), TypeError> {
    match expr {
        Expr::Literal(_) | Expr::CharRange(..) | Expr::AnyChar => Ok(()),
        Expr::Reference(name) => match grammar.rule(name) {
            Some(_) => Ok(()),
            None => Err(TypeError::UnknownRule(name.clone())),
        },
        Expr::Repeat { item: inner, .. }
        | Expr::Negate(inner)
        | Expr::AsString(inner)
        | Expr::Optional(inner) => check_expr(inner, grammar),
        Expr::Sequence { keep, children } => {
            if *keep >= children.len() {
                return Err(TypeError::KeepIndexOutOfBounds {
                    keep: *keep,
                    len: children.len(),
                });
            }
            children.iter().try_for_each(|child| check_expr(child, grammar))
        }
        Expr::Choice(options) => {
            if options.is_empty() {
                return Err(TypeError::EmptyChoice);
            }
            options.iter().try_for_each(|option| check_expr(option, grammar))
        }
    }
}

/// Check every expression in the grammar, that every rule has an
/// alternative, and that each non-constructing alternative produces its
/// rule's declared type.
///
/// After this succeeds, [`infer_type`] cannot fail on any expression of the
/// grammar.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.rules().len()))]
pub fn check_grammar(grammar: &Grammar) -> Result<(), TypeError> {
    for rule in grammar.rules() {
        // Alternatives are an ordered choice and need at least one option.
        if rule.alternatives.is_empty() {
            return Err(TypeError::EmptyChoice);
        }
        for alternative in &rule.alternatives {
            match alternative {
                Variant::Constructing { items, .. } => {
                    for item in items {
                        check_expr(item.expr(), grammar)?;
                    }
                }
                Variant::NonConstructing(expr) => {
                    check_expr(expr, grammar)?;
                    let expected = ValueType::of_rule(&rule.ty);
                    let found = infer_type(expr, grammar)?;
                    if found != expected {
                        return Err(TypeError::AlternativeTypeMismatch {
                            rule: rule.name.clone(),
                            expected,
                            found,
                        });
                    }
                }
            }
        }
    }
    tracing::debug!("type check complete");
    Ok(())
}
