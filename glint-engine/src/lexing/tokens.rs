//! Token definitions for Groovy sources
//!
//!     The token kinds are derived with logos. Unlike a compiler front end, nothing is skipped:
//!     whitespace, newlines and comments are all real tokens, because line accounting needs to
//!     see the token that directly follows every comment.
//!
//!     Quoted strings and block comments are matched by callbacks instead of regexes so that
//!     escapes and multi-line bodies are handled in one place, and so that an unterminated
//!     literal is a recognition failure rather than a silent fallback to operator tokens.
//!
//!     Slashy strings (`/\d+/`) cannot be told apart from division by their characters alone.
//!     logos always yields `/` as an operator; the stream adapter turns it into a string when
//!     the previous significant token cannot end an operand, see [`slashy_len`].

use logos::{Lexer, Logos};
use serde::Serialize;

/// All lexical kinds produced by the Groovy lexer.
///
/// `Eof` has no pattern: it is never produced by logos, only by the stream adapter as the
/// end-of-stream sentinel.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    // Layout
    #[regex(r"[ \t\x0C]+")]
    #[regex(r"\\(\r\n|\r|\n)")]
    Whitespace,
    #[regex(r"\r\n|\r|\n")]
    Newline,

    // Comments
    #[regex(r"//[^\r\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r"#![^\r\n]*")]
    Shebang,

    // Keywords
    #[token("abstract")]
    Abstract,
    #[token("as")]
    As,
    #[token("assert")]
    Assert,
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("def")]
    Def,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("in")]
    In,
    #[token("instanceof")]
    Instanceof,
    #[token("interface")]
    Interface,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("record")]
    Record,
    #[token("return")]
    Return,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("threadsafe")]
    Threadsafe,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("trait")]
    Trait,
    #[token("transient")]
    Transient,
    #[token("try")]
    Try,
    #[token("var")]
    Var,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,
    #[token("yield")]
    Yield,

    #[token("boolean")]
    #[token("byte")]
    #[token("char")]
    #[token("short")]
    #[token("int")]
    #[token("long")]
    #[token("float")]
    #[token("double")]
    BuiltInPrimitiveType,

    // Literals
    #[regex(r"[0-9][0-9_]*[lLiIgG]?")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*[lLiIgG]?")]
    #[regex(r"0[bB][01][01_]*[lLiIgG]?")]
    IntegerLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?[fFdDgG]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*[fFdDgG]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatingPointLiteral,
    #[token("true")]
    #[token("false")]
    BooleanLiteral,
    #[token("null")]
    NullLiteral,
    #[token("'", |lex| quoted(lex, '\''))]
    #[token("\"", |lex| quoted(lex, '"'))]
    #[token("'''", |lex| delimited(lex, "'''", true))]
    #[token("\"\"\"", |lex| delimited(lex, "\"\"\"", true))]
    #[token("$/", |lex| delimited(lex, "/$", false))]
    StringLiteral,
    /// A string literal carrying `$` interpolation. Never matched directly: the stream adapter
    /// refines `StringLiteral` into this kind, see [`TokenKind::refine`].
    GString,

    #[regex(r"[a-zA-Z_$\u{80}-\u{10FFFF}][a-zA-Z0-9_$\u{80}-\u{10FFFF}]*")]
    Identifier,

    // Annotation sigil and member access
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("?.")]
    SafeDot,
    #[token("??.")]
    SafeChainDot,
    #[token("*.")]
    SpreadDot,
    #[token(".&")]
    MethodPointer,
    #[token("::")]
    MethodReference,
    #[token("..")]
    Range,
    #[token("..<")]
    RangeExclusive,
    #[token("...")]
    Ellipsis,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    // Operators
    #[token("?:")]
    Elvis,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("=~")]
    RegexFind,
    #[token("==~")]
    RegexMatch,
    #[token("=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("**=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>=")]
    #[token("?=")]
    Assign,
    #[token("==")]
    #[token("!=")]
    #[token("===")]
    #[token("!==")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    Comparison,
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("**")]
    #[token("++")]
    #[token("--")]
    Arithmetic,
    #[token("!")]
    #[token("~")]
    #[token("&&")]
    #[token("||")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token(">>>")]
    Logical,

    /// End-of-stream sentinel.
    Eof,
}

impl TokenKind {
    /// Whitespace-only kinds never touch line accounting.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Comment-marker kinds, counted as comment lines rather than code.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Shebang
        )
    }

    pub fn is_eof(self) -> bool {
        self == TokenKind::Eof
    }

    /// Refine a raw logos kind using its text.
    ///
    /// Double-quoted, triple-double-quoted, slashy and dollar-slashy strings are GStrings when
    /// their body interpolates (`$name` or `${expr}`); everything else keeps its kind.
    pub fn refine(self, text: &str) -> TokenKind {
        if self == TokenKind::StringLiteral && is_interpolated(text) {
            TokenKind::GString
        } else {
            self
        }
    }

    /// True when a token of this kind can close an operand, so that a `/` after it divides.
    pub fn ends_operand(self, text: &str) -> bool {
        match self {
            TokenKind::Identifier
            | TokenKind::IntegerLiteral
            | TokenKind::FloatingPointLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::NullLiteral
            | TokenKind::StringLiteral
            | TokenKind::GString
            | TokenKind::BuiltInPrimitiveType
            | TokenKind::This
            | TokenKind::Super
            | TokenKind::RParen
            | TokenKind::RBrack
            | TokenKind::RBrace => true,
            TokenKind::Arithmetic => text == "++" || text == "--",
            _ => false,
        }
    }
}

fn is_interpolated(text: &str) -> bool {
    let body = if text.starts_with('"') {
        text.trim_matches('"')
    } else if let Some(body) = text.strip_prefix("$/") {
        body.strip_suffix("/$").unwrap_or(body)
    } else if let Some(body) = text.strip_prefix('/') {
        body.strip_suffix('/').unwrap_or(body)
    } else {
        return false;
    };

    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' => match chars.peek() {
                Some('{') => return true,
                Some(&next) if next.is_alphabetic() || next == '_' => return true,
                _ => {}
            },
            _ => {}
        }
    }
    false
}

/// Single-line quoted string: ends at the matching quote, may not cross a line break.
fn quoted(lex: &mut Lexer<TokenKind>, quote: char) -> bool {
    match quoted_len(lex.remainder(), quote) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

/// Length of a quoted body, closing quote included. In double-quoted strings a `${ }`
/// expression is skipped as a whole, so quotes nested inside it do not close the string.
fn quoted_len(body: &str, quote: char) -> Option<usize> {
    let mut at = 0;
    while let Some(c) = body[at..].chars().next() {
        match c {
            '\\' => {
                at += 1;
                at += body[at..].chars().next().map_or(0, char::len_utf8);
            }
            '\n' | '\r' => return None,
            '$' if quote == '"' && body[at + 1..].starts_with('{') => {
                at += 2 + interpolation_len(&body[at + 2..])?;
            }
            c if c == quote => return Some(at + c.len_utf8()),
            c => at += c.len_utf8(),
        }
    }
    None
}

/// Length of a `${ }` expression after its opening brace, closing brace included.
fn interpolation_len(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut at = 0;
    while let Some(c) = body[at..].chars().next() {
        match c {
            '{' => {
                depth += 1;
                at += 1;
            }
            '}' if depth == 0 => return Some(at + 1),
            '}' => {
                depth -= 1;
                at += 1;
            }
            '"' | '\'' => at += 1 + quoted_len(&body[at + 1..], c)?,
            '\n' | '\r' => return None,
            c => at += c.len_utf8(),
        }
    }
    None
}

/// Length of a slashy string body after its opening `/`, closing `/` included.
///
/// A backslash only protects the character after it; the body may span lines.
pub fn slashy_len(body: &str) -> Option<usize> {
    let mut chars = body.char_indices();
    while let Some((at, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '/' if at > 0 => return Some(at + 1),
            '/' => return None,
            _ => {}
        }
    }
    None
}

/// Multi-line literal ending at `close`. Backslash escapes are honoured when `escapes` is set.
fn delimited(lex: &mut Lexer<TokenKind>, close: &str, escapes: bool) -> bool {
    let remainder = lex.remainder();
    let mut chars = remainder.char_indices();
    while let Some((at, c)) = chars.next() {
        if escapes && c == '\\' {
            chars.next();
            continue;
        }
        if remainder[at..].starts_with(close) {
            lex.bump(at + close.len());
            return true;
        }
    }
    false
}

fn block_comment(lex: &mut Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(at) => {
            lex.bump(at + 2);
            true
        }
        None => false,
    }
}
