//! Source discovery
//!
//!     Walks the given roots with `ignore` (so `.gitignore`d build output is skipped), keeps
//!     files with a configured suffix and classifies each one as main or test code by matching
//!     its root-relative path against the test patterns.

use glint_config::SourcesConfig;
use glint_engine::{Encoding, FileKind, InputFile};
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SourceDiscovery {
    suffixes: Vec<String>,
    test_patterns: Vec<Regex>,
    encoding: Encoding,
}

impl SourceDiscovery {
    pub fn new(sources: &SourcesConfig, encoding: Encoding) -> Result<Self, regex::Error> {
        let test_patterns = sources
            .test_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<_, _>>()?;
        let suffixes = sources
            .suffixes
            .iter()
            .map(|suffix| suffix.trim_start_matches('.').to_string())
            .collect();
        Ok(Self {
            suffixes,
            test_patterns,
            encoding,
        })
    }

    /// Every source file under `roots`, sorted by path. A root that is a file is taken as is.
    pub fn discover(&self, roots: &[PathBuf]) -> Vec<InputFile> {
        let mut found: Vec<(PathBuf, FileKind)> = Vec::new();
        for root in roots {
            if root.is_file() {
                found.push((root.clone(), self.kind_of(&slashed(root))));
                continue;
            }
            for entry in WalkBuilder::new(root).build() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(root = %root.display(), error = %err, "cannot walk sources");
                        continue;
                    }
                };
                let path = entry.path();
                if !entry.file_type().is_some_and(|kind| kind.is_file()) || !self.has_suffix(path) {
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(path);
                found.push((path.to_path_buf(), self.kind_of(&slashed(relative))));
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        found.dedup_by(|a, b| a.0 == b.0);
        found
            .into_iter()
            .map(|(path, kind)| InputFile::from_path(path, kind, self.encoding))
            .collect()
    }

    fn has_suffix(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.suffixes.iter().any(|suffix| suffix == extension))
    }

    pub fn kind_of(&self, relative_path: &str) -> FileKind {
        if self
            .test_patterns
            .iter()
            .any(|pattern| pattern.is_match(relative_path))
        {
            FileKind::Test
        } else {
            FileKind::Main
        }
    }
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
