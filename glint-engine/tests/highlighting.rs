//! Highlighting and span positions for small Groovy snippets

use glint_engine::spans::LITERAL_IMAGE;
use glint_engine::testing::{analyze_text, render_spans};
use glint_engine::{HighlightCategory, Settings};
use rstest::rstest;

#[test]
fn test_annotated_declaration() {
    let analysis = analyze_text("@Test\ndef x = \"a\" // c\n", &Settings::default());

    insta::assert_snapshot!(render_spans(&analysis.spans), @r"
    1:0-1:1 a @
    1:1-1:5 a Test
    2:0-2:3 k def
    2:4-2:5 - x
    2:6-2:7 - =
    2:8-2:11 s LITERAL
    2:12-2:16 cd // c
    ");
}

#[rstest]
#[case::keyword("return", Some(HighlightCategory::Keyword))]
#[case::integer("42", Some(HighlightCategory::Constant))]
#[case::float("4.2", Some(HighlightCategory::Constant))]
#[case::boolean("true", Some(HighlightCategory::Constant))]
#[case::null("null", Some(HighlightCategory::Constant))]
#[case::single_quoted("'x'", Some(HighlightCategory::String))]
#[case::gstring("\"hi $name\"", Some(HighlightCategory::String))]
#[case::line_comment("// x", Some(HighlightCategory::Comment))]
#[case::block_comment("/* x */", Some(HighlightCategory::Comment))]
#[case::doc_comment("/** x */", Some(HighlightCategory::StructuredComment))]
#[case::identifier("value", None)]
#[case::punctuation("{", None)]
fn test_single_token_category(#[case] text: &str, #[case] category: Option<HighlightCategory>) {
    let analysis = analyze_text(text, &Settings::default());
    assert_eq!(analysis.spans.len(), 1);
    assert_eq!(analysis.spans[0].category, category);
}

#[rstest]
#[case::regex_find("def m = (s =~ /\\d+/)\n", 8, 6, LITERAL_IMAGE)]
#[case::regex_match("assert s ==~ /it's/\n", 4, 3, LITERAL_IMAGE)]
#[case::after_return("return /a|b/", 2, 1, LITERAL_IMAGE)]
#[case::after_comma("f(x, /y/)", 6, 4, LITERAL_IMAGE)]
#[case::nested_quotes("def g = \"a ${\"b\"} c\"\n", 4, 3, "\"a ${\"b\"} c\"")]
fn test_string_forms(
    #[case] text: &str,
    #[case] span_count: usize,
    #[case] index: usize,
    #[case] image: &str,
) {
    let analysis = analyze_text(text, &Settings::default());
    assert_eq!(analysis.spans.len(), span_count, "{}", render_spans(&analysis.spans));
    assert_eq!(analysis.spans[index].category, Some(HighlightCategory::String));
    assert_eq!(analysis.spans[index].image, image);
}

#[test]
fn test_division_stays_an_operator() {
    let analysis = analyze_text("x = a / b / 2", &Settings::default());
    assert!(analysis
        .spans
        .iter()
        .all(|span| span.category != Some(HighlightCategory::String)));
    assert_eq!(analysis.spans.len(), 7);
}

#[test]
fn test_line_continuation_has_no_span() {
    let analysis = analyze_text("def x = 1 + \\\n  2\n", &Settings::default());
    let images: Vec<_> = analysis.spans.iter().map(|span| span.image.as_str()).collect();
    assert_eq!(images, vec!["def", "x", "=", "1", "+", "2"]);
}

#[test]
fn test_annotation_ends_at_arguments() {
    let analysis = analyze_text("@a.B(1)", &Settings::default());
    let categories: Vec<_> = analysis.spans.iter().map(|span| span.category).collect();
    assert_eq!(
        categories,
        vec![
            Some(HighlightCategory::Annotation),
            Some(HighlightCategory::Annotation),
            Some(HighlightCategory::Annotation),
            Some(HighlightCategory::Annotation),
            None,
            Some(HighlightCategory::Constant),
            None,
        ]
    );
}

#[test]
fn test_multi_line_string_span() {
    let analysis = analyze_text("def s = '''a\nbc'''\n", &Settings::default());
    let span = &analysis.spans[3];

    assert_eq!(span.image, LITERAL_IMAGE);
    assert_eq!(span.category, Some(HighlightCategory::String));
    assert_eq!((span.start_line, span.start_col), (1, 8));
    assert_eq!((span.end_line, span.end_col), (2, 5));
    assert!(span.is_multi_line());
}

#[test]
fn test_gstring_keeps_its_text() {
    let analysis = analyze_text("x = \"${a}\"", &Settings::default());
    assert_eq!(analysis.spans[2].image, "\"${a}\"");
}

#[test]
fn test_columns_count_characters() {
    let analysis = analyze_text("s = 'héllo'; t", &Settings::default());
    let last = analysis.spans.last().unwrap();
    assert_eq!((last.start_col, last.end_col), (13, 14));
}
