//! Rendering of a finished run

use glint_engine::{BatchSummary, ReportCollector};
use glint_surefire::UnitTestIndex;
use serde::Serialize;
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["summary", "json", "yaml"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "yaml" => Some(OutputFormat::Yaml),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot render json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot render yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything a run produced.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub summary: BatchSummary,
    pub files: ReportCollector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<UnitTestIndex>,
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, OutputError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(report)?,
        OutputFormat::Summary => render_summary(report),
    })
}

fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "{} files analyzed, {} failed, {} abandoned",
        summary.analyzed,
        summary.failed,
        summary.abandoned.len()
    );

    let mut ncloc = 0;
    let mut comment_lines = 0;
    for (file, file_report) in report.files.files() {
        if let Some(measures) = &file_report.measures {
            ncloc += measures.ncloc;
            comment_lines += measures.comment_lines;
            let _ = write!(
                out,
                "  {file}: ncloc={} comments={}",
                measures.ncloc, measures.comment_lines
            );
            if let Some(complexity) = &file_report.complexity {
                let _ = write!(
                    out,
                    " classes={} functions={} complexity={}",
                    complexity.classes, complexity.functions, complexity.complexity
                );
            }
            out.push('\n');
        }
    }
    let _ = writeln!(out, "total: ncloc={ncloc} comments={comment_lines}");

    for (file, failure) in report.files.failures() {
        let _ = writeln!(out, "failed {file} ({}): {}", failure.kind, failure.message);
    }
    for file in &summary.abandoned {
        let _ = writeln!(out, "abandoned {file}");
    }

    if let Some(tests) = &report.tests {
        let (mut count, mut failures, mut errors, mut skipped, mut duration) = (0, 0, 0, 0, 0);
        for (_, class) in tests.classes() {
            count += class.tests;
            failures += class.failures;
            errors += class.errors;
            skipped += class.skipped;
            duration += class.duration_ms;
        }
        let _ = writeln!(
            out,
            "tests: classes={} tests={count} failures={failures} errors={errors} skipped={skipped} duration_ms={duration}",
            tests.len()
        );
    }
    out
}
