//! Recursive-descent parser for grammar source.
//!
//! ```text
//! grammar   := ("package" path ";")? "start" IDENT ";" rule+
//! rule      := IDENT (":" IDENT)? expansion ";"
//! expansion := "=" "{" field* "}" | "=" "direct" expr | ":=" expr | variant+
//! variant   := "|" "direct" expr | "|" IDENT "{" field* "}"
//! field     := "drop" expr ";" | IDENT ":" expr ";"
//! expr      := seq ("/" seq)*
//! seq       := ("#"? prefix)+
//! prefix    := ("!" | "*" NUMBER? | "+" | "?" | "^") prefix | atom
//! atom      := STRING | RANGE | "." | "(" expr ")" | IDENT
//! ```

use rustc_hash::FxHashMap;

use pegt_ir::builder::sequence;
use pegt_ir::{Expr, Grammar, GrammarError, Item, Rule, Type, Variant};
use pegt_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::lexer::TokenKind;
use crate::ParseError;

/// Type annotation naming the opaque span type.
const SLICE: &str = "slice";

pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Parser { cursor }
    }

    pub fn parse_grammar(&mut self) -> Result<Grammar, ParseError> {
        let namespace = if self.cursor.check_word("package") {
            self.cursor.advance();
            let path = self.parse_path()?;
            self.cursor.expect(TokenKind::Semi)?;
            Some(path)
        } else {
            None
        };

        self.cursor.expect_word("start")?;
        let (start, start_offset) = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::Semi)?;

        let mut rules = Vec::new();
        let mut seen: FxHashMap<String, usize> = FxHashMap::default();
        loop {
            let (rule, offset) = self.parse_rule()?;
            if seen.insert(rule.name.clone(), offset).is_some() {
                return Err(ParseError::Grammar {
                    offset,
                    error: GrammarError::DuplicateRule(rule.name),
                });
            }
            rules.push(rule);
            if self.cursor.is_at_end() {
                break;
            }
        }

        Grammar::new(start, rules, namespace).map_err(|error| ParseError::Grammar {
            offset: start_offset,
            error,
        })
    }

    /// `IDENT (("." | "::") IDENT)*`, kept as written.
    fn parse_path(&mut self) -> Result<String, ParseError> {
        let (first, _) = self.cursor.expect_ident()?;
        let mut path = first.to_string();
        loop {
            let separator = match self.cursor.current_kind() {
                TokenKind::Dot => ".",
                TokenKind::DoubleColon => "::",
                _ => return Ok(path),
            };
            self.cursor.advance();
            let (segment, _) = self.cursor.expect_ident()?;
            path.push_str(separator);
            path.push_str(segment);
        }
    }

    /// A rule and the offset of its name.
    fn parse_rule(&mut self) -> Result<(Rule, usize), ParseError> {
        let (name, offset) = self.cursor.expect_ident()?;
        let annotation = if self.cursor.eat(TokenKind::Colon) {
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };
        let declared = |default: Type| match annotation {
            Some((SLICE, _)) => Type::Opaque,
            Some((ty, _)) => Type::named(ty),
            None => default,
        };

        let rule = match self.cursor.current_kind() {
            TokenKind::ColonEq => {
                if let Some((ty, ty_offset)) = annotation.filter(|(ty, _)| *ty != SLICE) {
                    return Err(ParseError::SliceRuleType {
                        offset: ty_offset,
                        rule: name.to_string(),
                        ty: ty.to_string(),
                    });
                }
                self.cursor.advance();
                let expr = self.parse_expr()?;
                Rule::new(name, Type::Opaque, vec![Variant::NonConstructing(expr)])
            }
            TokenKind::Eq => {
                self.cursor.advance();
                let alternative = if self.cursor.check(TokenKind::LBrace) {
                    Variant::constructing(name, self.parse_fields()?)
                } else if self.cursor.check_word("direct") {
                    self.cursor.advance();
                    Variant::NonConstructing(self.parse_expr()?)
                } else {
                    return Err(self.cursor.unexpected("`{` or `direct`"));
                };
                Rule::new(name, declared(Type::named(name)), vec![alternative])
            }
            TokenKind::Pipe => {
                let mut alternatives = Vec::new();
                while self.cursor.eat(TokenKind::Pipe) {
                    alternatives.push(self.parse_variant()?);
                }
                Rule::new(name, declared(Type::named(name)), alternatives)
            }
            _ => return Err(self.cursor.unexpected("`=`, `:=` or `|`")),
        };
        self.cursor.expect(TokenKind::Semi)?;
        Ok((rule, offset))
    }

    /// One alternative, after its `|`.
    fn parse_variant(&mut self) -> Result<Variant, ParseError> {
        if self.cursor.check_word("direct") && self.cursor.peek_kind() != TokenKind::LBrace {
            self.cursor.advance();
            return Ok(Variant::NonConstructing(self.parse_expr()?));
        }
        let (name, _) = self.cursor.expect_ident()?;
        Ok(Variant::constructing(name, self.parse_fields()?))
    }

    /// `"{" field* "}"`
    fn parse_fields(&mut self) -> Result<Vec<Item>, ParseError> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        while !self.cursor.eat(TokenKind::RBrace) {
            let item = if self.cursor.check_word("drop")
                && self.cursor.peek_kind() != TokenKind::Colon
            {
                self.cursor.advance();
                Item::drop(self.parse_expr()?)
            } else {
                let (name, _) = self
                    .cursor
                    .expect_ident()
                    .map_err(|_| self.cursor.unexpected("field or `}`"))?;
                self.cursor.expect(TokenKind::Colon)?;
                Item::keep(name, self.parse_expr()?)
            };
            self.cursor.expect(TokenKind::Semi)?;
            items.push(item);
        }
        Ok(items)
    }

    /// `seq ("/" seq)*`
    ///
    /// Parenthesised groups re-enter here, so the stack may grow.
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_seq()?;
        if !self.cursor.check(TokenKind::Slash) {
            return Ok(first);
        }
        let mut options = vec![first];
        while self.cursor.eat(TokenKind::Slash) {
            options.push(self.parse_seq()?);
        }
        Ok(Expr::choice(options))
    }

    /// `("#"? prefix)+`
    fn parse_seq(&mut self) -> Result<Expr, ParseError> {
        let offset = self.cursor.offset();
        let mut items = Vec::new();
        loop {
            let kept = self.cursor.eat(TokenKind::Hash);
            if !kept && !self.cursor.current_kind().starts_prefix() {
                break;
            }
            items.push((kept, self.parse_prefix()?));
        }
        if items.is_empty() {
            return Err(self.cursor.unexpected("expression"));
        }
        sequence(items).map_err(|error| ParseError::Grammar { offset, error })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_prefix_inner())
    }

    fn parse_prefix_inner(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Bang => {
                self.cursor.advance();
                Ok(Expr::negate(self.parse_prefix()?))
            }
            TokenKind::Star => {
                self.cursor.advance();
                let min = if self.cursor.check(TokenKind::Number) {
                    let count = self
                        .cursor
                        .text()
                        .parse()
                        .map_err(|_| self.cursor.unexpected("a repetition count"))?;
                    self.cursor.advance();
                    count
                } else {
                    0
                };
                Ok(Expr::repeat(min, self.parse_prefix()?))
            }
            TokenKind::Plus => {
                self.cursor.advance();
                Ok(Expr::many1(self.parse_prefix()?))
            }
            TokenKind::Question => {
                self.cursor.advance();
                Ok(Expr::optional(self.parse_prefix()?))
            }
            TokenKind::Caret => {
                self.cursor.advance();
                Ok(Expr::as_string(self.parse_prefix()?))
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let offset = self.cursor.offset();
        match self.cursor.current_kind() {
            TokenKind::String => {
                let text = self.cursor.advance_text();
                let body = &text[1..text.len() - 1];
                Ok(Expr::literal(unescape(body, offset + 1)?))
            }
            TokenKind::Range => {
                let text = self.cursor.advance_text();
                let (lo, hi) = parse_range(&text[1..text.len() - 1], offset + 1)?;
                Ok(Expr::range(lo, hi))
            }
            TokenKind::Dot => {
                self.cursor.advance();
                Ok(Expr::AnyChar)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident => {
                let (name, _) = self.cursor.expect_ident()?;
                Ok(Expr::reference(name))
            }
            _ => Err(self.cursor.unexpected("expression")),
        }
    }
}

impl<'a> Cursor<'a> {
    /// Consume the current token, returning its text.
    fn advance_text(&mut self) -> &'a str {
        let text = self.text();
        self.advance();
        text
    }
}

/// Decode one character or escape at the start of `text`.
///
/// Returns the character and the number of bytes it occupied.
fn decode_char(text: &str, offset: usize) -> Result<(char, usize), ParseError> {
    let mut chars = text.chars();
    match chars.next() {
        Some('\\') => {
            let escaped = chars.next().ok_or(ParseError::InvalidEscape { offset, ch: ' ' })?;
            let ch = match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '\\' | '"' | '\'' | ']' | '-' => escaped,
                other => return Err(ParseError::InvalidEscape { offset, ch: other }),
            };
            Ok((ch, 1 + escaped.len_utf8()))
        }
        Some(ch) => Ok((ch, ch.len_utf8())),
        None => Err(ParseError::InvalidRange {
            offset,
            reason: "expected a character",
        }),
    }
}

/// Unescape a string literal body starting at byte `offset` in the source.
fn unescape(body: &str, offset: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(body.len());
    let mut at = 0;
    while at < body.len() {
        let (ch, len) = decode_char(&body[at..], offset + at)?;
        out.push(ch);
        at += len;
    }
    Ok(out)
}

/// Parse a range body `lo-hi` starting at byte `offset` in the source.
fn parse_range(body: &str, offset: usize) -> Result<(char, char), ParseError> {
    let (lo, lo_len) = decode_char(body, offset)?;
    let rest = &body[lo_len..];
    let Some(rest) = rest.strip_prefix('-') else {
        return Err(ParseError::InvalidRange {
            offset: offset + lo_len,
            reason: "expected `-` between the bounds",
        });
    };
    let hi_offset = offset + lo_len + 1;
    let (hi, hi_len) = decode_char(rest, hi_offset)?;
    if hi_len != rest.len() {
        return Err(ParseError::InvalidRange {
            offset: hi_offset + hi_len,
            reason: "expected `]` after the upper bound",
        });
    }
    if lo > hi {
        return Err(ParseError::InvalidRange {
            offset,
            reason: "lower bound is greater than upper bound",
        });
    }
    Ok((lo, hi))
}
