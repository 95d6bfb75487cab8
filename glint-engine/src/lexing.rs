//! Lexer
//!
//!     Tokenization of Groovy sources in two layers:
//!         1. [tokens]: the logos-derived [`TokenKind`] set. Layout and comments are kept as
//!            tokens; nothing is skipped.
//!         2. [stream]: the adapter that positions each lexeme (1-based line, 0-based char
//!            column), refines string kinds, and ends with an `Eof` sentinel.
//!
//!     The lexer does not validate grammar. It only fails on character sequences it cannot
//!     recognize at all, such as a stray `#` or an unterminated string.

pub mod stream;
pub mod tokens;

pub use stream::{tokenize, LexError, Token, TokenStream};
pub use tokens::TokenKind;
