//! Grammar source tokens.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // Identifiers; `package`, `start`, `direct`, `drop` and `slice` are
    // keywords only where the parser expects them.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    // Literals; contents are unescaped by the parser.
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,
    #[regex(r#""([^"\\]|\\.)*"#, priority = 1)]
    UnterminatedString,
    #[regex(r"\[([^\]\\\n]|\\.)*\]")]
    Range,

    // Symbols
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token(":=")]
    ColonEq,
    #[token("=")]
    Eq,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("/")]
    Slash,
    #[token("#")]
    Hash,

    // Operators
    #[token("!")]
    Bang,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("^")]
    Caret,
    #[token(".")]
    Dot,

    Eof,
}

impl TokenKind {
    /// Whether this token can begin a prefix expression.
    pub fn starts_prefix(self) -> bool {
        matches!(
            self,
            TokenKind::Bang
                | TokenKind::Star
                | TokenKind::Plus
                | TokenKind::Question
                | TokenKind::Caret
                | TokenKind::String
                | TokenKind::Range
                | TokenKind::Dot
                | TokenKind::LParen
                | TokenKind::Ident
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String | TokenKind::UnterminatedString => "string literal",
            TokenKind::Range => "character range",
            TokenKind::Semi => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::ColonEq => "`:=`",
            TokenKind::Eq => "`=`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Pipe => "`|`",
            TokenKind::Slash => "`/`",
            TokenKind::Hash => "`#`",
            TokenKind::Bang => "`!`",
            TokenKind::Star => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Question => "`?`",
            TokenKind::Caret => "`^`",
            TokenKind::Dot => "`.`",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Split `source` into tokens, ending with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(TokenKind::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { offset: span.start });
            }
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                let ch = source[span.start..].chars().next().unwrap_or('\0');
                return Err(ParseError::UnrecognizedChar {
                    offset: span.start,
                    ch,
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: source.len()..source.len(),
    });
    Ok(tokens)
}
