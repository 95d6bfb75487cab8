//! Concurrent batch driver
//!
//!     Files share no mutable state, so [`Batch::run`] analyzes them on tokio's blocking pool,
//!     at most `workers` at a time. Outcomes are gathered at one point and published to the
//!     sink in input order, which keeps output identical from run to run whatever the
//!     scheduling was. A file whose analysis panics is published as a failure like any other.
//!
//!     An optional deadline bounds the whole batch. When it expires, unfinished files are
//!     abandoned and listed in the [`BatchSummary`]; everything that finished is still published.

use crate::engine::{analyze_file, publish, AnalysisError, FileAnalysis, Settings};
use crate::emission::AnalysisSink;
use crate::input::InputFile;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{info, warn};

type Outcome = Result<FileAnalysis, AnalysisError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub failed: usize,
    pub abandoned: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Batch {
    settings: Arc<Settings>,
    workers: usize,
    deadline: Option<Duration>,
}

impl Batch {
    pub fn new(settings: Settings) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            settings: Arc::new(settings),
            workers,
            deadline: None,
        }
    }

    /// Maximum number of files analyzed at once (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn run(&self, files: Vec<InputFile>, sink: &mut dyn AnalysisSink) -> BatchSummary {
        let files: Vec<Arc<InputFile>> = files.into_iter().map(Arc::new).collect();
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for (index, file) in files.iter().enumerate() {
            let file = Arc::clone(file);
            let settings = Arc::clone(&self.settings);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let outcome =
                    tokio::task::spawn_blocking(move || analyze_file(&file, &settings)).await;
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<Outcome>> = files.iter().map(|_| None).collect();
        let gather = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, joined)) => outcomes[index] = Some(settle(joined)),
                    Err(err) => warn!(error = %err, "batch task failed"),
                }
            }
        };

        match self.deadline {
            Some(deadline) => {
                if tokio::time::timeout(deadline, gather).await.is_err() {
                    warn!(?deadline, "batch deadline reached, abandoning remaining files");
                    tasks.abort_all();
                }
            }
            None => gather.await,
        }

        let mut summary = BatchSummary::default();
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Some(outcome) => {
                    if outcome.is_err() {
                        summary.failed += 1;
                    } else {
                        summary.analyzed += 1;
                    }
                    publish(file, outcome, sink);
                }
                None => summary.abandoned.push(file.id().to_string()),
            }
        }

        info!(
            analyzed = summary.analyzed,
            failed = summary.failed,
            abandoned = summary.abandoned.len(),
            "batch finished"
        );
        summary
    }
}

/// A blocking task that panicked still yields a failure for its file.
fn settle(joined: Result<Outcome, JoinError>) -> Outcome {
    joined.unwrap_or_else(|err| Err(AnalysisError::Panicked(err.to_string())))
}
