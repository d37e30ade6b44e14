//! Token cursor for navigating the token stream.

use crate::lexer::{Token, TokenKind};
use crate::ParseError;

/// Cursor over the tokens of one grammar source.
///
/// Invariant: the token list is non-empty and ends with
/// [`TokenKind::Eof`]; the cursor never moves past it.
pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Byte offset where the current token starts.
    pub fn offset(&self) -> usize {
        self.current().span.start
    }

    /// Source text of the current token.
    pub fn text(&self) -> &'a str {
        &self.source[self.current().span.clone()]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Whether the current token is the identifier `word`.
    pub fn check_word(&self, word: &str) -> bool {
        self.check(TokenKind::Ident) && self.text() == word
    }

    /// Advance to the next token and return the consumed token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    /// Consume the identifier `word` or fail.
    pub fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.check_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(format!("`{word}`")))
        }
    }

    /// Consume an identifier, returning its text and offset.
    pub fn expect_ident(&mut self) -> Result<(&'a str, usize), ParseError> {
        if self.check(TokenKind::Ident) {
            let text = self.text();
            let offset = self.offset();
            self.advance();
            Ok((text, offset))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// An error at the current token.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let found = match self.current_kind() {
            TokenKind::Ident => format!("identifier `{}`", self.text()),
            kind => kind.to_string(),
        };
        ParseError::Unexpected {
            offset: self.offset(),
            expected: expected.into(),
            found,
        }
    }
}
