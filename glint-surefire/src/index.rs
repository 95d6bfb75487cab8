//! Per-class index of test results

use crate::reader::{read_report, ReportError};
use crate::report::UnitTestClassReport;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnitTestIndex {
    classes: BTreeMap<String, UnitTestClassReport>,
}

impl UnitTestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for `class_name`, created empty on first use.
    pub fn index(&mut self, class_name: &str) -> &mut UnitTestClassReport {
        self.classes.entry(class_name.to_string()).or_default()
    }

    pub fn get(&self, class_name: &str) -> Option<&UnitTestClassReport> {
        self.classes.get(class_name)
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, &UnitTestClassReport)> {
        self.classes.iter().map(|(name, report)| (name.as_str(), report))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Fold `other` into this index, adding up reports of the same class.
    pub fn merge(&mut self, other: UnitTestIndex) {
        for (class_name, report) in other.classes {
            self.index(&class_name).add_all(report);
        }
    }

    pub fn parse_reader<R: BufRead>(&mut self, source: R) -> Result<(), ReportError> {
        read_report(source, self)
    }

    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(BufReader::new(file))
    }

    /// Index every `TEST-*.xml` report in `dir`.
    ///
    /// A malformed report is logged and left out; the other reports are still indexed.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReportError> {
        let dir = dir.as_ref();
        let mut index = Self::new();
        for path in report_files(dir)? {
            let mut report = Self::new();
            match report.parse_file(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), classes = report.len(), "parsed test report");
                    index.merge(report);
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping test report"),
            }
        }
        Ok(index)
    }
}

fn report_files(dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let io_error = |source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_report = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("TEST-") && name.ends_with(".xml"));
        if is_report && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
