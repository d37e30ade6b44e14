//! Builder DSL for assembling grammars in Rust code.
//!
//! Each rule is described through a closure that receives a nested builder:
//!
//! ```
//! use pegt_ir::builder::GrammarBuilder;
//! use pegt_ir::Expr;
//!
//! let mut g = GrammarBuilder::new();
//! let digit = g.alias("Digit", pegt_ir::Type::Opaque, |s| {
//!     s.keep(Expr::range('0', '9'));
//! });
//! g.single("Num", |f| {
//!     f.keep("value", Expr::as_string(Expr::many1(digit)));
//! });
//! let grammar = g.finish("Num", None).unwrap();
//! assert_eq!(grammar.rules().len(), 2);
//! ```
//!
//! Builders never fail mid-way. The first structural error is recorded and
//! returned by [`GrammarBuilder::finish`].

use rustc_hash::FxHashMap;

use crate::{Expr, Grammar, GrammarError, Item, Rule, Type, Variant};

/// Collects rules, anonymous tokens and the first error seen.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    whitespace: Option<String>,
    rules: Vec<Rule>,
    /// Literal text to the name of the token rule matching it.
    tokens: FxHashMap<String, String>,
    error: Option<GrammarError>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose token rules skip trailing input matched by `rule`.
    pub fn with_whitespace(rule: impl Into<String>) -> Self {
        GrammarBuilder {
            whitespace: Some(rule.into()),
            ..Self::default()
        }
    }

    /// Add an already assembled rule.
    pub fn rule(&mut self, rule: Rule) -> Expr {
        let reference = Expr::reference(rule.name.clone());
        self.rules.push(rule);
        reference
    }

    /// A rule with one constructing alternative named after the rule.
    pub fn single(&mut self, name: &str, fill: impl FnOnce(&mut ItemsBuilder<'_>)) -> Expr {
        self.single_of(name, Type::named(name), fill)
    }

    /// Like [`single`](Self::single), declaring the result type explicitly.
    ///
    /// Naming another rule's type makes this rule's value one more variant
    /// of that type.
    pub fn single_of(
        &mut self,
        name: &str,
        ty: Type,
        fill: impl FnOnce(&mut ItemsBuilder<'_>),
    ) -> Expr {
        let items = {
            let mut builder = ItemsBuilder::new(self);
            fill(&mut builder);
            builder.items
        };
        self.rule(Rule::new(name, ty, vec![Variant::constructing(name, items)]))
    }

    /// A rule with ordered alternatives, typed after the rule.
    pub fn variants(&mut self, name: &str, fill: impl FnOnce(&mut VariantsBuilder<'_>)) -> Expr {
        self.variants_of(name, Type::named(name), fill)
    }

    pub fn variants_of(
        &mut self,
        name: &str,
        ty: Type,
        fill: impl FnOnce(&mut VariantsBuilder<'_>),
    ) -> Expr {
        let variants = {
            let mut builder = VariantsBuilder::new(self);
            fill(&mut builder);
            builder.variants
        };
        self.rule(Rule::new(name, ty, variants))
    }

    /// A rule with one non-constructing alternative.
    pub fn alias(&mut self, name: &str, ty: Type, fill: impl FnOnce(&mut SequenceBuilder<'_>)) -> Expr {
        let expr = self.sequence(fill);
        self.rule(Rule::new(name, ty, vec![Variant::NonConstructing(expr)]))
    }

    /// An opaque rule matching the sequence and then any whitespace.
    pub fn named_token(&mut self, name: &str, fill: impl FnOnce(&mut SequenceBuilder<'_>)) -> Expr {
        let Some(whitespace) = self.whitespace.clone() else {
            self.record(GrammarError::MissingWhitespaceRule(name.to_string()));
            return Expr::reference(name);
        };
        let expr = self.sequence(|s| {
            fill(s);
            s.drop(Expr::reference(whitespace));
        });
        self.rule(Rule::new(name, Type::Opaque, vec![Variant::NonConstructing(expr)]))
    }

    /// Reference to an anonymous token rule for `literal`.
    ///
    /// The first request for a literal creates a rule `TokenN`, where `N` is
    /// the number of distinct literals seen before it. Later requests for the
    /// same literal reuse that rule.
    pub fn token(&mut self, literal: &str) -> Expr {
        if let Some(name) = self.tokens.get(literal) {
            return Expr::reference(name.clone());
        }
        let name = format!("Token{}", self.tokens.len());
        self.tokens.insert(literal.to_string(), name.clone());
        self.named_token(&name, |s| s.keep(Expr::literal(literal)))
    }

    /// `min` or more repetitions of a sequence.
    pub fn repeat(&mut self, min: usize, fill: impl FnOnce(&mut SequenceBuilder<'_>)) -> Expr {
        Expr::repeat(min, self.sequence(fill))
    }

    pub fn option(&mut self, fill: impl FnOnce(&mut SequenceBuilder<'_>)) -> Expr {
        Expr::optional(self.sequence(fill))
    }

    /// Validate and produce the grammar.
    ///
    /// Returns the first error recorded by any nested builder, otherwise the
    /// result of [`Grammar::new`].
    pub fn finish(self, start: &str, namespace: Option<&str>) -> Result<Grammar, GrammarError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Grammar::new(start, self.rules, namespace.map(str::to_string))
    }

    fn sequence(&mut self, fill: impl FnOnce(&mut SequenceBuilder<'_>)) -> Expr {
        let mut builder = SequenceBuilder::new(self);
        fill(&mut builder);
        builder.build()
    }

    fn record(&mut self, error: GrammarError) {
        self.error.get_or_insert(error);
    }
}

/// Collects the alternatives of one rule.
pub struct VariantsBuilder<'g> {
    grammar: &'g mut GrammarBuilder,
    variants: Vec<Variant>,
}

impl<'g> VariantsBuilder<'g> {
    fn new(grammar: &'g mut GrammarBuilder) -> Self {
        VariantsBuilder {
            grammar,
            variants: Vec::new(),
        }
    }

    /// Add an alternative constructing the variant `name`.
    pub fn constructing(&mut self, name: &str, fill: impl FnOnce(&mut ItemsBuilder<'_>)) {
        let mut builder = ItemsBuilder::new(self.grammar);
        fill(&mut builder);
        let items = builder.items;
        self.variants.push(Variant::constructing(name, items));
    }

    /// Add an alternative forwarding the value of a sequence.
    pub fn direct(&mut self, fill: impl FnOnce(&mut SequenceBuilder<'_>)) {
        let expr = self.grammar.sequence(fill);
        self.variants.push(Variant::NonConstructing(expr));
    }

    pub fn grammar(&mut self) -> &mut GrammarBuilder {
        &mut *self.grammar
    }
}

/// Collects the items of one constructing alternative.
pub struct ItemsBuilder<'g> {
    grammar: &'g mut GrammarBuilder,
    items: Vec<Item>,
}

impl<'g> ItemsBuilder<'g> {
    fn new(grammar: &'g mut GrammarBuilder) -> Self {
        ItemsBuilder {
            grammar,
            items: Vec::new(),
        }
    }

    /// Store the value of `expr` as field `name`.
    pub fn keep(&mut self, name: &str, expr: Expr) {
        self.items.push(Item::keep(name, expr));
    }

    /// Store the value of a sequence as field `name`.
    pub fn keep_with(&mut self, name: &str, fill: impl FnOnce(&mut SequenceBuilder<'_>)) {
        let expr = self.grammar.sequence(fill);
        self.items.push(Item::keep(name, expr));
    }

    pub fn drop(&mut self, expr: Expr) {
        self.items.push(Item::drop(expr));
    }

    /// Match `text` exactly, without skipping whitespace after it.
    pub fn drop_literal(&mut self, text: &str) {
        self.drop(Expr::literal(text));
    }

    /// Match the token for `literal` and discard it.
    pub fn token(&mut self, literal: &str) {
        let token = self.grammar.token(literal);
        self.drop(token);
    }

    pub fn grammar(&mut self) -> &mut GrammarBuilder {
        &mut *self.grammar
    }
}

/// Collects the children of a sequence and which one is kept.
pub struct SequenceBuilder<'g> {
    grammar: &'g mut GrammarBuilder,
    items: Vec<(bool, Expr)>,
}

impl<'g> SequenceBuilder<'g> {
    fn new(grammar: &'g mut GrammarBuilder) -> Self {
        SequenceBuilder {
            grammar,
            items: Vec::new(),
        }
    }

    /// Add the child whose value becomes the value of the sequence.
    pub fn keep(&mut self, expr: Expr) {
        self.items.push((true, expr));
    }

    pub fn drop(&mut self, expr: Expr) {
        self.items.push((false, expr));
    }

    /// Match the token for `literal` and discard it.
    pub fn token(&mut self, literal: &str) {
        let token = self.grammar.token(literal);
        self.drop(token);
    }

    pub fn grammar(&mut self) -> &mut GrammarBuilder {
        &mut *self.grammar
    }

    fn build(self) -> Expr {
        match sequence(self.items) {
            Ok(expr) => expr,
            Err(error) => {
                self.grammar.record(error);
                Expr::sequence(0, Vec::new())
            }
        }
    }
}

/// Assemble a sequence from `(kept, expr)` pairs.
///
/// A single child is returned as is, kept or not. Longer sequences need
/// exactly one kept child.
pub fn sequence(items: Vec<(bool, Expr)>) -> Result<Expr, GrammarError> {
    let mut keep = None;
    for (index, (kept, _)) in items.iter().enumerate() {
        if !kept {
            continue;
        }
        if let Some(first) = keep {
            return Err(GrammarError::MultipleKeptItems {
                first,
                second: index,
            });
        }
        keep = Some(index);
    }

    let mut children: Vec<Expr> = items.into_iter().map(|(_, expr)| expr).collect();
    match (children.len(), keep) {
        (0, _) => Err(GrammarError::EmptySequence),
        (1, _) => Ok(children.remove(0)),
        (len, None) => Err(GrammarError::NoKeptItem { len }),
        (_, Some(keep)) => Ok(Expr::sequence(keep, children)),
    }
}

#[cfg(test)]
mod tests;
