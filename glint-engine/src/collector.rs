//! In-memory sink
//!
//!     [`ReportCollector`] keeps everything published for a file in a [`FileReport`], keyed by
//!     file id in a sorted map so serialized output is stable across runs.

use crate::accounting::LineMeasures;
use crate::complexity::ComplexityMeasures;
use crate::emission::{AnalysisSink, CpdToken, FileFailure, HighlightRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything published for one file. Fields stay `None` until published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measures: Option<LineMeasures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ComplexityMeasures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighting: Option<Vec<HighlightRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpd_tokens: Option<Vec<CpdToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FileFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportCollector {
    files: BTreeMap<String, FileReport>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, file: &str) -> Option<&FileReport> {
        self.files.get(file)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileReport)> {
        self.files.iter().map(|(id, report)| (id.as_str(), report))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &FileFailure)> {
        self.files
            .iter()
            .filter_map(|(id, report)| report.failure.as_ref().map(|f| (id.as_str(), f)))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn entry(&mut self, file: &str) -> &mut FileReport {
        self.files.entry(file.to_string()).or_default()
    }
}

impl AnalysisSink for ReportCollector {
    fn save_measures(&mut self, file: &str, measures: &LineMeasures) {
        self.entry(file).measures = Some(measures.clone());
    }

    fn save_highlighting(&mut self, file: &str, ranges: Vec<HighlightRange>) {
        self.entry(file).highlighting = Some(ranges);
    }

    fn save_cpd_tokens(&mut self, file: &str, tokens: Vec<CpdToken>) {
        self.entry(file).cpd_tokens = Some(tokens);
    }

    fn save_complexity(&mut self, file: &str, measures: &ComplexityMeasures) {
        self.entry(file).complexity = Some(measures.clone());
    }

    fn report_failure(&mut self, file: &str, failure: FileFailure) {
        self.entry(file).failure = Some(failure);
    }
}
