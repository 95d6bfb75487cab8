//! Emission of per-file results
//!
//!     Persistence belongs to the caller. The engine talks to it through [`AnalysisSink`], and
//!     [`emit_spans`] turns a file's finished span list into the two record streams:
//!     highlighting ranges for spans that carry a category, and copy/paste tokens for every
//!     span of a non-test file. A file without spans produces neither stream.

use crate::accounting::LineMeasures;
use crate::complexity::ComplexityMeasures;
use crate::highlighting::HighlightCategory;
use crate::spans::ClassifiedSpan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub category: HighlightCategory,
}

/// A token as seen by copy/paste detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpdToken {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub image: String,
}

/// Failure signal for a file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub kind: String,
    pub message: String,
}

/// Receiver of everything the engine produces.
///
/// Implementations are driven from a single aggregation point and need no locking.
pub trait AnalysisSink {
    fn save_measures(&mut self, file: &str, measures: &LineMeasures);

    fn save_highlighting(&mut self, file: &str, ranges: Vec<HighlightRange>);

    fn save_cpd_tokens(&mut self, file: &str, tokens: Vec<CpdToken>);

    fn save_complexity(&mut self, file: &str, measures: &ComplexityMeasures);

    fn report_failure(&mut self, file: &str, failure: FileFailure);
}

/// Walk `spans` once and dispatch highlighting and copy/paste records to `sink`.
pub fn emit_spans(
    file: &str,
    is_test: bool,
    spans: Vec<ClassifiedSpan>,
    sink: &mut dyn AnalysisSink,
) {
    if spans.is_empty() {
        return;
    }

    let mut ranges = Vec::new();
    let mut tokens = Vec::with_capacity(if is_test { 0 } else { spans.len() });
    for span in spans {
        if let Some(category) = span.category {
            ranges.push(HighlightRange {
                start_line: span.start_line,
                start_col: span.start_col,
                end_line: span.end_line,
                end_col: span.end_col,
                category,
            });
        }
        if !is_test {
            tokens.push(CpdToken {
                start_line: span.start_line,
                start_col: span.start_col,
                end_line: span.end_line,
                end_col: span.end_col,
                image: span.image,
            });
        }
    }

    sink.save_highlighting(file, ranges);
    if !is_test {
        sink.save_cpd_tokens(file, tokens);
    }
}
