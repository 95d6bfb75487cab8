//! Line and comment accounting
//!
//!     [`LineAccount`] consumes the token stream with one token of lookahead and derives the
//!     per-file line measures:
//!
//!     - whitespace tokens are ignored;
//!     - a comment token is credited with every physical line from its own line up to the line
//!       of the token that follows it, minus the lines that are only a comment fence
//!       (`/**`, `/*`, `*`, `*/`, `//`). A comment starting on line 1 is a header comment and
//!       is not credited when header comments are ignored;
//!     - any other token marks its line as code, once per line.

use crate::lexing::Token;
use crate::source::SourceText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lines that carry no information beyond opening or closing a comment.
pub const EMPTY_COMMENT_LINES: [&str; 5] = ["/**", "/*", "*", "*/", "//"];

/// Final line measures for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMeasures {
    /// Lines with at least one code token
    pub ncloc: usize,
    pub comment_lines: usize,
    /// The "has code" marker, one entry per line counted in `ncloc`
    pub code_lines: BTreeSet<usize>,
}

/// Mutable counters for the file being lexed.
#[derive(Debug)]
pub struct LineAccount {
    ignore_header_comments: bool,
    ncloc: usize,
    comment_lines: usize,
    current_line: usize,
    code_lines: BTreeSet<usize>,
}

impl LineAccount {
    pub fn new(ignore_header_comments: bool) -> Self {
        Self {
            ignore_header_comments,
            ncloc: 0,
            comment_lines: 0,
            current_line: 0,
            code_lines: BTreeSet::new(),
        }
    }

    /// Account for `token`, given the start line of the token after it.
    pub fn handle(&mut self, token: &Token<'_>, next_line: usize, source: &SourceText) {
        let kind = token.kind;
        if kind.is_whitespace() || kind.is_eof() {
            return;
        }

        if kind.is_comment() {
            if !self.is_ignored_header(token.line) {
                let spanned = (next_line + 1).saturating_sub(token.line);
                let empty = empty_comment_lines(source, token.line, next_line);
                self.comment_lines += spanned.saturating_sub(empty);
            }
        } else if token.line != self.current_line {
            self.ncloc += 1;
            self.code_lines.insert(token.line);
            self.current_line = token.line;
        }
    }

    fn is_ignored_header(&self, line: usize) -> bool {
        line == 1 && self.ignore_header_comments
    }

    pub fn finish(self) -> LineMeasures {
        LineMeasures {
            ncloc: self.ncloc,
            comment_lines: self.comment_lines,
            code_lines: self.code_lines,
        }
    }
}

fn empty_comment_lines(source: &SourceText, first: usize, last: usize) -> usize {
    (first..=last)
        .filter_map(|line| source.line(line))
        .filter(|text| EMPTY_COMMENT_LINES.contains(&text.trim()))
        .count()
}
