//! Span building
//!
//!     Turns each classified token into a [`ClassifiedSpan`]: its start and end position, the
//!     image used for copy/paste detection, and its optional highlighting category.
//!
//!     For a token spanning several physical lines (triple-quoted strings, block comments) the
//!     end column is the length of the token's last line, not of its whole text.

use crate::highlighting::HighlightCategory;
use crate::lexing::{Token, TokenKind};
use crate::source::split_last_line;
use serde::Serialize;

/// Image standing in for every plain string literal, so that literals of the same shape
/// compare equal for copy/paste detection.
pub const LITERAL_IMAGE: &str = "LITERAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSpan {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub image: String,
    /// `None` when the token is present but not highlighted, e.g. punctuation
    pub category: Option<HighlightCategory>,
}

impl ClassifiedSpan {
    pub fn from_token(token: &Token<'_>, category: Option<HighlightCategory>) -> Self {
        let (breaks, last_line) = split_last_line(token.text);
        let end_col = if breaks == 0 {
            token.column + token.text.chars().count()
        } else {
            last_line.chars().count()
        };

        Self {
            start_line: token.line,
            start_col: token.column,
            end_line: token.line + breaks,
            end_col,
            image: image_of(token),
            category,
        }
    }

    pub fn is_multi_line(&self) -> bool {
        self.end_line > self.start_line
    }
}

fn image_of(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::StringLiteral => LITERAL_IMAGE.to_string(),
        _ => token.text.to_string(),
    }
}

/// Collects the spans of one file, in token order.
#[derive(Debug, Default)]
pub struct SpanBuilder {
    spans: Vec<ClassifiedSpan>,
}

impl SpanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `token`, unless it is layout (blank text or a line continuation).
    pub fn push(&mut self, token: &Token<'_>, category: Option<HighlightCategory>) {
        if token.kind.is_whitespace() || token.text.trim().is_empty() {
            return;
        }
        self.spans.push(ClassifiedSpan::from_token(token, category));
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn finish(self) -> Vec<ClassifiedSpan> {
        self.spans
    }
}
