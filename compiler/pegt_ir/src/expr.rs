//! Parsing expressions.

/// A parsing expression.
///
/// Closed set of node kinds. Every pass over the IR (type inference, code
/// generation, printing) matches exhaustively, so adding a kind here forces
/// each of them to handle it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Matches the exact text.
    Literal(String),
    /// Matches one character in `lo..=hi`.
    CharRange(char, char),
    /// Matches whatever the named rule matches.
    Reference(String),
    /// Matches `item` greedily, failing if fewer than `min` matches were found.
    Repeat { min: usize, item: Box<Expr> },
    /// Zero-width negative lookahead.
    Negate(Box<Expr>),
    /// Matches any single character.
    AnyChar,
    /// Matches `inner` and produces the consumed span instead of its value.
    AsString(Box<Expr>),
    /// Matches `children` in order; the value is that of `children[keep]`.
    Sequence { keep: usize, children: Vec<Expr> },
    /// Ordered choice: the first option that matches wins.
    Choice(Vec<Expr>),
    /// Matches `inner` or nothing.
    Optional(Box<Expr>),
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn range(lo: char, hi: char) -> Self {
        Expr::CharRange(lo, hi)
    }

    pub fn reference(rule: impl Into<String>) -> Self {
        Expr::Reference(rule.into())
    }

    /// Zero or more repetitions.
    pub fn many(item: Expr) -> Self {
        Expr::repeat(0, item)
    }

    /// One or more repetitions.
    pub fn many1(item: Expr) -> Self {
        Expr::repeat(1, item)
    }

    pub fn repeat(min: usize, item: Expr) -> Self {
        Expr::Repeat {
            min,
            item: Box::new(item),
        }
    }

    pub fn negate(inner: Expr) -> Self {
        Expr::Negate(Box::new(inner))
    }

    pub fn as_string(inner: Expr) -> Self {
        Expr::AsString(Box::new(inner))
    }

    pub fn optional(inner: Expr) -> Self {
        Expr::Optional(Box::new(inner))
    }

    pub fn choice(options: Vec<Expr>) -> Self {
        Expr::Choice(options)
    }

    /// A sequence whose value is the child at `keep`.
    ///
    /// `keep` is not checked here; type inference rejects an out-of-range
    /// index. Use [`crate::builder::SequenceBuilder`] to get the check at
    /// construction time.
    pub fn sequence(keep: usize, children: Vec<Expr>) -> Self {
        Expr::Sequence { keep, children }
    }

    /// Name of the rule this expression refers to, if it is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Expr::Reference(name) => Some(name),
            _ => None,
        }
    }
}

/// Nested expressions are freed from a work list rather than by recursive
/// drop glue, so dropping `!!!…x` needs constant stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Expr {
    /// Move the children of `self` into `out`, leaving leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Repeat { item: inner, .. }
            | Expr::Negate(inner)
            | Expr::AsString(inner)
            | Expr::Optional(inner) => {
                if !inner.is_leaf() {
                    out.push(std::mem::replace(&mut **inner, Expr::AnyChar));
                }
            }
            Expr::Sequence { children, .. } | Expr::Choice(children) => out.append(children),
            Expr::Literal(_) | Expr::CharRange(..) | Expr::Reference(_) | Expr::AnyChar => {}
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(
            self,
            Expr::Literal(_) | Expr::CharRange(..) | Expr::Reference(_) | Expr::AnyChar
        )
    }
}
