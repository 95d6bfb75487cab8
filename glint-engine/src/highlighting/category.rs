//! Highlighting categories and the kind→category table
//!
//!     The table is declared as an ordered list of category → kind-set mappings and flattened
//!     once, on first use, into a read-only map shared by every file being analyzed. The first
//!     mapping that lists a kind wins; in a valid table no kind appears twice.

use crate::lexing::TokenKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    Keyword,
    String,
    Constant,
    Comment,
    StructuredComment,
    Annotation,
}

impl HighlightCategory {
    /// Short CSS class used by highlighting stores.
    pub fn css_class(self) -> &'static str {
        match self {
            HighlightCategory::Keyword => "k",
            HighlightCategory::String => "s",
            HighlightCategory::Constant => "c",
            HighlightCategory::Comment => "cd",
            HighlightCategory::StructuredComment => "j",
            HighlightCategory::Annotation => "a",
        }
    }
}

const KEYWORDS: &[TokenKind] = &[
    TokenKind::Abstract,
    TokenKind::As,
    TokenKind::Assert,
    TokenKind::Break,
    TokenKind::Case,
    TokenKind::Catch,
    TokenKind::Class,
    TokenKind::Const,
    TokenKind::Continue,
    TokenKind::Def,
    TokenKind::Default,
    TokenKind::Do,
    TokenKind::Else,
    TokenKind::Enum,
    TokenKind::Extends,
    TokenKind::Final,
    TokenKind::Finally,
    TokenKind::For,
    TokenKind::Goto,
    TokenKind::If,
    TokenKind::Implements,
    TokenKind::Import,
    TokenKind::In,
    TokenKind::Instanceof,
    TokenKind::Interface,
    TokenKind::Native,
    TokenKind::New,
    TokenKind::Package,
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::Public,
    TokenKind::Record,
    TokenKind::Return,
    TokenKind::Static,
    TokenKind::Strictfp,
    TokenKind::Super,
    TokenKind::Switch,
    TokenKind::Synchronized,
    TokenKind::This,
    TokenKind::Threadsafe,
    TokenKind::Throw,
    TokenKind::Throws,
    TokenKind::Trait,
    TokenKind::Transient,
    TokenKind::Try,
    TokenKind::Var,
    TokenKind::Void,
    TokenKind::Volatile,
    TokenKind::While,
    TokenKind::Yield,
];

const STRINGS: &[TokenKind] = &[TokenKind::StringLiteral, TokenKind::GString];

const CONSTANTS: &[TokenKind] = &[
    TokenKind::IntegerLiteral,
    TokenKind::FloatingPointLiteral,
    TokenKind::BooleanLiteral,
    TokenKind::NullLiteral,
];

const COMMENTS: &[TokenKind] = &[
    TokenKind::LineComment,
    TokenKind::BlockComment,
    TokenKind::Shebang,
];

/// Ordered category → kinds mapping.
pub const HIGHLIGHTING_MAPPING: &[(HighlightCategory, &[TokenKind])] = &[
    (HighlightCategory::Keyword, KEYWORDS),
    (HighlightCategory::String, STRINGS),
    (HighlightCategory::Constant, CONSTANTS),
    (HighlightCategory::Comment, COMMENTS),
];

static CATEGORY_BY_KIND: Lazy<HashMap<TokenKind, HighlightCategory>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (category, kinds) in HIGHLIGHTING_MAPPING {
        for kind in kinds.iter() {
            table.entry(*kind).or_insert(*category);
        }
    }
    table
});

/// Category a kind maps to by table lookup alone.
pub fn category_of(kind: TokenKind) -> Option<HighlightCategory> {
    CATEGORY_BY_KIND.get(&kind).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_sets_are_disjoint() {
        let mut seen = HashSet::new();
        for (category, kinds) in HIGHLIGHTING_MAPPING {
            for kind in kinds.iter() {
                assert!(seen.insert(*kind), "{kind:?} listed again under {category:?}");
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(category_of(TokenKind::Class), Some(HighlightCategory::Keyword));
        assert_eq!(
            category_of(TokenKind::GString),
            Some(HighlightCategory::String)
        );
        assert_eq!(
            category_of(TokenKind::NullLiteral),
            Some(HighlightCategory::Constant)
        );
        assert_eq!(
            category_of(TokenKind::BlockComment),
            Some(HighlightCategory::Comment)
        );
        assert_eq!(category_of(TokenKind::Dot), None);
        assert_eq!(category_of(TokenKind::At), None);
        assert_eq!(category_of(TokenKind::Identifier), None);
    }

    #[test]
    fn test_structured_comment_is_never_a_table_entry() {
        assert!(HIGHLIGHTING_MAPPING
            .iter()
            .all(|(category, _)| *category != HighlightCategory::StructuredComment));
    }
}
