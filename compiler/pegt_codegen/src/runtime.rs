//! Runtime emitted into every generated module.
//!
//! Generated parsers depend on nothing but `std`: the span type, the error
//! type and the cursor with its matching primitives are written out inline.
//!
//! - **`Span`**: byte range of the input a value was matched from
//! - **`ParseError`**: failure position and what was expected there, with
//!   the furthest-failure merge
//! - **`Parser`**: cursor over the source plus the furthest failure seen

use crate::context::CodegenContext;

const SPAN: &str = r#"/// A span of the parsed source, in byte offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// The matched text. `source` must be the text that was parsed.
    pub fn as_str<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}"#;

const PARSE_ERROR: &str = r#"/// A match failure at a byte offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub pos: usize,
    pub expected: &'static str,
}

impl ParseError {
    /// Keep whichever failure got further; ties keep `self`.
    pub fn ingest(self, other: ParseError) -> ParseError {
        if other.pos > self.pos {
            other
        } else {
            self
        }
    }
}

impl ::std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        write!(f, "expected {} at byte {}", self.expected, self.pos)
    }
}

impl ::std::error::Error for ParseError {}"#;

const PARSER: &str = r#"/// Backtracking parser over one source text.
pub struct Parser<'s> {
    source: &'s str,
    pos: usize,
    furthest: Option<ParseError>,
}

#[allow(dead_code)]
impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        Parser {
            source,
            pos: 0,
            furthest: None,
        }
    }

    /// Byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Record a failure at `pos` and return it.
    fn fail(&mut self, pos: usize, expected: &'static str) -> ParseError {
        let error = ParseError { pos, expected };
        self.furthest = Some(match self.furthest.take() {
            Some(furthest) => furthest.ingest(error.clone()),
            None => error.clone(),
        });
        error
    }

    /// Take the furthest failure, merged with `error`.
    fn furthest_failure(&mut self, error: ParseError) -> ParseError {
        match self.furthest.take() {
            Some(furthest) => error.ingest(furthest),
            None => error,
        }
    }

    fn literal(&mut self, text: &str, expected: &'static str) -> Result<Span, ParseError> {
        if self.source[self.pos..].starts_with(text) {
            let start = self.pos;
            self.pos += text.len();
            Ok(Span::new(start, self.pos))
        } else {
            Err(self.fail(self.pos, expected))
        }
    }

    fn char_range(&mut self, lo: char, hi: char, expected: &'static str) -> Result<Span, ParseError> {
        match self.source[self.pos..].chars().next() {
            Some(c) if lo <= c && c <= hi => {
                let start = self.pos;
                self.pos += c.len_utf8();
                Ok(Span::new(start, self.pos))
            }
            _ => Err(self.fail(self.pos, expected)),
        }
    }

    fn any_char(&mut self) -> Result<Span, ParseError> {
        match self.source[self.pos..].chars().next() {
            Some(c) => {
                let start = self.pos;
                self.pos += c.len_utf8();
                Ok(Span::new(start, self.pos))
            }
            None => Err(self.fail(self.pos, "any character")),
        }
    }
}"#;

/// Rust runtime code generator.
pub struct RustRuntime;

impl RustRuntime {
    /// Emit the `Span` and `ParseError` types.
    pub fn emit_types(ctx: &mut CodegenContext) {
        ctx.write_lines(SPAN);
        ctx.newline();
        ctx.write_lines(PARSE_ERROR);
    }

    /// Emit the `Parser` struct and its matching primitives.
    pub fn emit_parser(ctx: &mut CodegenContext) {
        ctx.write_lines(PARSER);
    }
}
