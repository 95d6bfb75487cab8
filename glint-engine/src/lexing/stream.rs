//! Lexer adapter
//!
//!     Wraps the logos lexer for one decoded file and hands out positioned [`Token`]s on
//!     demand. Once the input is exhausted it keeps returning an `Eof` token located at the end
//!     of the text, so callers driving a one-token lookahead always have a "next" token.
//!
//!     The adapter also remembers whether the last significant token closed an operand. A `/`
//!     that cannot be a division there opens a slashy string, which the adapter extends up to
//!     its closing `/`.

use super::tokens::{slashy_len, TokenKind};
use crate::source::SourceText;
use logos::Logos;
use serde::Serialize;
use thiserror::Error;

/// A lexeme with its source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    /// 1-based start line
    pub line: usize,
    /// 0-based start column, in characters
    pub column: usize,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, line: usize, column: usize) -> Self {
        Self {
            kind,
            text,
            line,
            column,
        }
    }
}

/// The lexer met a character sequence it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected input {snippet:?} at line {line}, column {column}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

const SNIPPET_LIMIT: usize = 16;

/// Pull-based token stream over a single file.
pub struct TokenStream<'src> {
    source: &'src SourceText,
    lexer: logos::Lexer<'src, TokenKind>,
    after_operand: bool,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src SourceText) -> Self {
        Self {
            source,
            lexer: TokenKind::lexer(source.as_str()),
            after_operand: false,
        }
    }

    /// Next token, or the `Eof` sentinel once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        match self.lexer.next() {
            Some(Ok(kind)) => {
                let kind = if self.opens_slashy_string(kind) {
                    TokenKind::StringLiteral
                } else {
                    kind
                };
                let span = self.lexer.span();
                let text = &self.source.as_str()[span.clone()];
                let kind = kind.refine(text);
                if !kind.is_whitespace() && !kind.is_comment() {
                    self.after_operand = kind.ends_operand(text);
                }
                let (line, column) = self.source.position(span.start);
                Ok(Token::new(kind, text, line, column))
            }
            Some(Err(())) => {
                let span = self.lexer.span();
                let (line, column) = self.source.position(span.start);
                let snippet = self.source.as_str()[span.start..]
                    .chars()
                    .take_while(|c| *c != '\n' && *c != '\r')
                    .take(SNIPPET_LIMIT)
                    .collect();
                Err(LexError {
                    line,
                    column,
                    snippet,
                })
            }
            None => {
                let end = self.source.as_str().len();
                let (line, column) = self.source.position(end);
                Ok(Token::new(TokenKind::Eof, "", line, column))
            }
        }
    }
}

impl TokenStream<'_> {
    /// Extend a `/` or `/=` operator into a slashy string when no operand precedes it.
    fn opens_slashy_string(&mut self, kind: TokenKind) -> bool {
        if self.after_operand
            || !matches!(kind, TokenKind::Arithmetic | TokenKind::Assign)
            || !self.lexer.slice().starts_with('/')
        {
            return false;
        }
        let span = self.lexer.span();
        match slashy_len(&self.source.as_str()[span.start + 1..]) {
            Some(len) => {
                self.lexer.bump((1 + len).saturating_sub(span.len()));
                true
            }
            None => false,
        }
    }
}

/// Tokenize a whole file, sentinel excluded.
pub fn tokenize(source: &SourceText) -> Result<Vec<Token<'_>>, LexError> {
    let mut stream = TokenStream::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = stream.next_token()?;
        if token.kind.is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
