//! Grammars, rules and their alternatives.

use rustc_hash::FxHashMap;

use crate::{Expr, GrammarError};

/// Declared result type of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// The matched input span, with no parsed substructure.
    Opaque,
    /// A user-declared record or tagged union.
    Named(String),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// The declared type name, or `None` for [`Type::Opaque`].
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Opaque => None,
            Type::Named(name) => Some(name),
        }
    }
}

/// One element of a constructing alternative.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// Matched and stored as field `name` of the constructed value.
    Keep { name: String, expr: Expr },
    /// Matched and discarded.
    Drop(Expr),
}

impl Item {
    pub fn keep(name: impl Into<String>, expr: Expr) -> Self {
        Item::Keep {
            name: name.into(),
            expr,
        }
    }

    pub fn drop(expr: Expr) -> Self {
        Item::Drop(expr)
    }

    pub fn expr(&self) -> &Expr {
        match self {
            Item::Keep { expr, .. } | Item::Drop(expr) => expr,
        }
    }
}

/// One alternative of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Builds a value named `name` from the kept items, in item order.
    Constructing { name: String, items: Vec<Item> },
    /// Produces whatever the expression produces.
    NonConstructing(Expr),
}

impl Variant {
    pub fn constructing(name: impl Into<String>, items: Vec<Item>) -> Self {
        Variant::Constructing {
            name: name.into(),
            items,
        }
    }

    /// Kept items of a constructing variant as `(field, expr)` pairs.
    ///
    /// Empty for non-constructing variants.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Expr)> {
        let items: &[Item] = match self {
            Variant::Constructing { items, .. } => items,
            Variant::NonConstructing(_) => &[],
        };
        items.iter().filter_map(|item| match item {
            Item::Keep { name, expr } => Some((name.as_str(), expr)),
            Item::Drop(_) => None,
        })
    }
}

/// A named grammar rule.
///
/// With more than one alternative the rule is an ordered choice: the first
/// alternative that matches wins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub name: String,
    pub ty: Type,
    pub alternatives: Vec<Variant>,
}

impl Rule {
    pub fn new(name: impl Into<String>, ty: Type, alternatives: Vec<Variant>) -> Self {
        Rule {
            name: name.into(),
            ty,
            alternatives,
        }
    }
}

/// A complete grammar.
///
/// Built once and never mutated; construction checks that rule names are
/// unique and that the start rule exists.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: String,
    rules: Vec<Rule>,
    namespace: Option<String>,
    by_name: FxHashMap<String, usize>,
}

impl Grammar {
    pub fn new(
        start: impl Into<String>,
        rules: Vec<Rule>,
        namespace: Option<String>,
    ) -> Result<Self, GrammarError> {
        let start = start.into();
        let mut by_name = FxHashMap::default();
        for (index, rule) in rules.iter().enumerate() {
            if by_name.insert(rule.name.clone(), index).is_some() {
                return Err(GrammarError::DuplicateRule(rule.name.clone()));
            }
        }
        if !by_name.contains_key(&start) {
            return Err(GrammarError::UnknownStartRule(start));
        }
        Ok(Grammar {
            start,
            rules,
            namespace,
            by_name,
        })
    }

    /// Name of the start rule.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The start rule. Always present.
    pub fn start_rule(&self) -> &Rule {
        &self.rules[self.by_name[&self.start]]
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Module namespace the generated code is placed in, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.by_name.get(name).map(|&index| &self.rules[index])
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.rules == other.rules && self.namespace == other.namespace
    }
}

impl Eq for Grammar {}

#[cfg(test)]
mod tests;
