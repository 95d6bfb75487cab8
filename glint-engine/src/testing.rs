//! Test helpers
//!
//!     Shortcuts used by the unit and integration tests: analyze a string with given settings,
//!     and render spans in a compact one-line-per-span form that is easy to eyeball in
//!     assertions and snapshots.

use crate::engine::{analyze_source, FileAnalysis, Settings};
use crate::source::SourceText;
use crate::spans::ClassifiedSpan;

/// Analyze `text`, panicking on lex errors.
pub fn analyze_text(text: &str, settings: &Settings) -> FileAnalysis {
    analyze_source(&SourceText::new(text), settings).expect("source should lex")
}

/// Settings with header comments counted.
pub fn counting_headers() -> Settings {
    Settings {
        ignore_header_comments: false,
    }
}

/// `start_line:start_col-end_line:end_col category image`, one span per line.
pub fn render_spans(spans: &[ClassifiedSpan]) -> String {
    spans
        .iter()
        .map(|span| {
            let category = span
                .category
                .map_or("-", |category| category.css_class());
            format!(
                "{}:{}-{}:{} {} {}",
                span.start_line,
                span.start_col,
                span.end_line,
                span.end_col,
                category,
                span.image.escape_debug()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
