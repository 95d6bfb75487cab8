//! Token classification for syntax highlighting
//!
//!     [`TokenClassifier::classify`] decides a token's [`HighlightCategory`] in three steps:
//!         1. table lookup on the token kind (see [category]);
//!         2. a comment whose text opens with `/**` is upgraded to a structured comment;
//!         3. otherwise, annotation tracking. An annotation is `@` followed by a dotted name
//!            (`@groovy.transform.CompileStatic`), which spans several token kinds, so the
//!            classifier carries one bit of state across calls: the `@` enters the annotation,
//!            identifiers and dots stay in it, anything else leaves it.
//!
//!     The state lives on the classifier, and a classifier is created per file.

pub mod category;

pub use category::{category_of, HighlightCategory, HIGHLIGHTING_MAPPING};

use crate::lexing::TokenKind;

const DOC_COMMENT_MARKER: &str = "/**";

#[derive(Debug, Default)]
pub struct TokenClassifier {
    in_annotation: bool,
}

impl TokenClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_annotation(&self) -> bool {
        self.in_annotation
    }

    pub fn classify(&mut self, kind: TokenKind, text: &str) -> Option<HighlightCategory> {
        match category_of(kind) {
            Some(HighlightCategory::Comment) if text.starts_with(DOC_COMMENT_MARKER) => {
                Some(HighlightCategory::StructuredComment)
            }
            Some(category) => Some(category),
            None if kind == TokenKind::At || self.in_annotation => {
                self.in_annotation = is_part_of_annotation(kind);
                self.in_annotation.then_some(HighlightCategory::Annotation)
            }
            None => None,
        }
    }
}

fn is_part_of_annotation(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::At | TokenKind::Identifier | TokenKind::Dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_path() {
        let mut classifier = TokenClassifier::new();
        let classified: Vec<_> = [
            (TokenKind::At, "@"),
            (TokenKind::Identifier, "groovy"),
            (TokenKind::Dot, "."),
            (TokenKind::Identifier, "Foo"),
            (TokenKind::LParen, "("),
        ]
        .into_iter()
        .map(|(kind, text)| classifier.classify(kind, text))
        .collect();

        assert_eq!(
            classified,
            vec![
                Some(HighlightCategory::Annotation),
                Some(HighlightCategory::Annotation),
                Some(HighlightCategory::Annotation),
                Some(HighlightCategory::Annotation),
                None,
            ]
        );
        assert!(!classifier.in_annotation());
    }

    #[test]
    fn test_identifier_outside_annotation() {
        let mut classifier = TokenClassifier::new();
        assert_eq!(classifier.classify(TokenKind::Identifier, "foo"), None);
        assert_eq!(classifier.classify(TokenKind::Dot, "."), None);
    }

    #[test]
    fn test_whitespace_ends_annotation() {
        let mut classifier = TokenClassifier::new();
        classifier.classify(TokenKind::At, "@");
        classifier.classify(TokenKind::Identifier, "Override");
        assert_eq!(classifier.classify(TokenKind::Newline, "\n"), None);
        assert_eq!(classifier.classify(TokenKind::Identifier, "run"), None);
    }

    #[test]
    fn test_keyword_inside_annotation_keeps_state() {
        // `@interface` declares an annotation type; the keyword wins and tracking stays on
        let mut classifier = TokenClassifier::new();
        classifier.classify(TokenKind::At, "@");
        assert_eq!(
            classifier.classify(TokenKind::Interface, "interface"),
            Some(HighlightCategory::Keyword)
        );
        assert!(classifier.in_annotation());
    }

    #[test]
    fn test_structured_comment() {
        let mut classifier = TokenClassifier::new();
        assert_eq!(
            classifier.classify(TokenKind::BlockComment, "/** doc */"),
            Some(HighlightCategory::StructuredComment)
        );
        assert_eq!(
            classifier.classify(TokenKind::BlockComment, "/* plain */"),
            Some(HighlightCategory::Comment)
        );
        assert_eq!(
            classifier.classify(TokenKind::LineComment, "// /** not doc"),
            Some(HighlightCategory::Comment)
        );
    }
}
