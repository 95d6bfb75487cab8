//! Per-file engine
//!
//!     A file goes through two stages:
//!
//!     1. [`analyze_file`] reads, decodes and lexes the file in a single pass. Each token is
//!        accounted with the start line of the token after it, classified, and turned into a
//!        span. Nothing escapes this stage until the `Eof` sentinel is reached, so a failure
//!        leaves no partial state behind.
//!     2. [`publish`] hands the outcome to a sink: measures and spans on success, the failure
//!        signal alone otherwise.
//!
//!     The stages are separate so that analysis can run on worker threads while publishing
//!     stays on one aggregation point (see [batch](crate::batch)).

use crate::accounting::{LineAccount, LineMeasures};
use crate::emission::{emit_spans, AnalysisSink, FileFailure};
use crate::highlighting::TokenClassifier;
use crate::input::InputFile;
use crate::lexing::{LexError, TokenStream};
use crate::source::{DecodeError, SourceText};
use crate::spans::{ClassifiedSpan, SpanBuilder};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use tracing::{debug, error};

/// Engine settings, shared read-only by every file of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Do not count a comment starting on line 1 (usually a licence banner)
    pub ignore_header_comments: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore_header_comments: true,
        }
    }
}

/// Why a file could not be analyzed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot decode file: {0}")]
    Decode(#[from] DecodeError),
    #[error("cannot lex file: {0}")]
    Lex(#[from] LexError),
    #[error("cannot read file: {0}")]
    Io(#[from] io::Error),
    #[error("analysis panicked: {0}")]
    Panicked(String),
}

impl AnalysisError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Decode(_) => "decode",
            AnalysisError::Lex(_) => "lex",
            AnalysisError::Io(_) => "io",
            AnalysisError::Panicked(_) => "panic",
        }
    }

    pub fn to_failure(&self) -> FileFailure {
        FileFailure {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Result of analyzing one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    pub measures: LineMeasures,
    pub spans: Vec<ClassifiedSpan>,
}

pub fn analyze_file(file: &InputFile, settings: &Settings) -> Result<FileAnalysis, AnalysisError> {
    let bytes = file.read_bytes()?;
    let source = SourceText::decode(&bytes, file.encoding())?;
    Ok(analyze_source(&source, settings)?)
}

/// Lex `source` once, driving accounting, classification and span building together.
pub fn analyze_source(source: &SourceText, settings: &Settings) -> Result<FileAnalysis, LexError> {
    let mut stream = TokenStream::new(source);
    let mut account = LineAccount::new(settings.ignore_header_comments);
    let mut classifier = TokenClassifier::new();
    let mut spans = SpanBuilder::new();

    let mut token = stream.next_token()?;
    while !token.kind.is_eof() {
        let next = stream.next_token()?;
        account.handle(&token, next.line, source);
        let category = classifier.classify(token.kind, token.text);
        spans.push(&token, category);
        token = next;
    }

    Ok(FileAnalysis {
        measures: account.finish(),
        spans: spans.finish(),
    })
}

/// Publish the outcome of [`analyze_file`] for `file`.
pub fn publish(
    file: &InputFile,
    outcome: Result<FileAnalysis, AnalysisError>,
    sink: &mut dyn AnalysisSink,
) {
    match outcome {
        Ok(analysis) => {
            debug!(
                file = file.id(),
                ncloc = analysis.measures.ncloc,
                comment_lines = analysis.measures.comment_lines,
                spans = analysis.spans.len(),
                "analyzed file"
            );
            sink.save_measures(file.id(), &analysis.measures);
            emit_spans(file.id(), file.is_test(), analysis.spans, sink);
        }
        Err(err) => {
            error!(file = file.id(), kind = err.kind(), error = %err, "skipping file");
            sink.report_failure(file.id(), err.to_failure());
        }
    }
}

/// Analyze and publish one file.
pub fn process_file(file: &InputFile, settings: &Settings, sink: &mut dyn AnalysisSink) {
    publish(file, analyze_file(file, settings), sink);
}
