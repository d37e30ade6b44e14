//! Rendering of the IR in the textual grammar syntax.
//!
//! For any grammar parsed from text, parsing the rendering again yields an
//! equal grammar. IR built directly can contain shapes the syntax has no
//! spelling for (a one-child sequence, an out-of-range keep index); those
//! render as close as possible.

use std::fmt::{self, Write};

use pegt_stack::ensure_sufficient_stack;

use crate::{Expr, Grammar, Item, Rule, Type, Variant};

/// Binding strength of the context an expression is printed in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Choice,
    Sequence,
    Prefix,
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, prec: Prec) -> fmt::Result {
    ensure_sufficient_stack(|| write_expr_inner(f, expr, prec))
}

fn write_expr_inner(f: &mut fmt::Formatter<'_>, expr: &Expr, prec: Prec) -> fmt::Result {
    let own = match expr {
        Expr::Choice(options) if options.len() > 1 => Prec::Choice,
        Expr::Sequence { children, .. } if children.len() > 1 => Prec::Sequence,
        _ => Prec::Prefix,
    };
    if own < prec {
        f.write_char('(')?;
        write_expr(f, expr, Prec::Choice)?;
        return f.write_char(')');
    }

    match expr {
        Expr::Literal(text) => {
            f.write_char('"')?;
            for c in text.chars() {
                write_escaped(f, c, '"')?;
            }
            f.write_char('"')
        }
        Expr::CharRange(lo, hi) => {
            f.write_char('[')?;
            write_escaped(f, *lo, ']')?;
            f.write_char('-')?;
            write_escaped(f, *hi, ']')?;
            f.write_char(']')
        }
        Expr::Reference(name) => f.write_str(name),
        Expr::AnyChar => f.write_char('.'),
        Expr::Repeat { min, item } => {
            match min {
                0 => f.write_char('*')?,
                1 => f.write_char('+')?,
                n => write!(f, "*{n}")?,
            }
            write_expr(f, item, Prec::Prefix)
        }
        Expr::Negate(inner) => {
            f.write_char('!')?;
            write_expr(f, inner, Prec::Prefix)
        }
        Expr::AsString(inner) => {
            f.write_char('^')?;
            write_expr(f, inner, Prec::Prefix)
        }
        Expr::Optional(inner) => {
            f.write_char('?')?;
            write_expr(f, inner, Prec::Prefix)
        }
        Expr::Sequence { keep, children } => {
            for (index, child) in children.iter().enumerate() {
                if index > 0 {
                    f.write_char(' ')?;
                }
                if index == *keep && children.len() > 1 {
                    f.write_char('#')?;
                }
                write_expr(f, child, Prec::Prefix)?;
            }
            Ok(())
        }
        Expr::Choice(options) => {
            for (index, option) in options.iter().enumerate() {
                if index > 0 {
                    f.write_str(" / ")?;
                }
                write_expr(f, option, Prec::Sequence)?;
            }
            Ok(())
        }
    }
}

/// Write `c` as it appears inside a literal or a range delimited by `close`.
fn write_escaped(f: &mut fmt::Formatter<'_>, c: char, close: char) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\n"),
        '\t' => f.write_str("\\t"),
        '\r' => f.write_str("\\r"),
        '\\' => f.write_str("\\\\"),
        '-' if close == ']' => f.write_str("\\-"),
        c if c == close => {
            f.write_char('\\')?;
            f.write_char(c)
        }
        c => f.write_char(c),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, Prec::Choice)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Keep { name, expr } => write!(f, "{name}: {expr};"),
            Item::Drop(expr) => write!(f, "drop {expr};"),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Item]) -> fmt::Result {
    f.write_char('{')?;
    for item in items {
        write!(f, " {item}")?;
    }
    f.write_str(" }")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;

        if let (Type::Opaque, [Variant::NonConstructing(expr)]) = (&self.ty, &self.alternatives[..]) {
            return write!(f, "{name} := {expr};");
        }

        f.write_str(name)?;
        match &self.ty {
            Type::Opaque => f.write_str(" : slice")?,
            Type::Named(ty) if ty != name => write!(f, " : {ty}")?,
            Type::Named(_) => {}
        }

        match &self.alternatives[..] {
            [Variant::Constructing { name: variant, items }] if variant == name => {
                f.write_str(" = ")?;
                write_items(f, items)?;
            }
            [Variant::NonConstructing(expr)] => write!(f, " = direct {expr}")?,
            alternatives => {
                for alternative in alternatives {
                    f.write_str("\n    | ")?;
                    match alternative {
                        Variant::Constructing { name, items } => {
                            write!(f, "{name} ")?;
                            write_items(f, items)?;
                        }
                        Variant::NonConstructing(expr) => write!(f, "direct {expr}")?,
                    }
                }
            }
        }
        f.write_char(';')
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = self.namespace() {
            writeln!(f, "package {namespace};")?;
        }
        writeln!(f, "start {};", self.start())?;
        for rule in self.rules() {
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
