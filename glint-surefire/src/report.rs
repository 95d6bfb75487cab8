//! Test results and their per-class accumulation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Ok,
    Skipped,
    Failure,
    Error,
}

/// One executed test case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitTestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl UnitTestResult {
    pub fn is_error_or_failure(&self) -> bool {
        matches!(self.status, TestStatus::Failure | TestStatus::Error)
    }
}

/// Counters and results for one test class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitTestClassReport {
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<UnitTestResult>,
}

impl UnitTestClassReport {
    pub fn add(&mut self, result: UnitTestResult) {
        match result.status {
            TestStatus::Skipped => self.skipped += 1,
            TestStatus::Failure => self.failures += 1,
            TestStatus::Error => self.errors += 1,
            TestStatus::Ok => {}
        }
        self.tests += 1;
        self.duration_ms += result.duration_ms;
        self.results.push(result);
    }

    /// Fold every result of `other` into this report.
    pub fn add_all(&mut self, other: UnitTestClassReport) {
        for result in other.results {
            self.add(result);
        }
    }

    /// Tests that actually ran.
    pub fn executed(&self) -> usize {
        self.tests - self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: TestStatus, duration_ms: u64) -> UnitTestResult {
        UnitTestResult {
            name: "t".to_string(),
            status,
            duration_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_counters() {
        let mut report = UnitTestClassReport::default();
        report.add(result(TestStatus::Ok, 10));
        report.add(result(TestStatus::Skipped, 0));
        report.add(result(TestStatus::Failure, 5));
        report.add(result(TestStatus::Error, 1));

        assert_eq!(report.tests, 4);
        assert_eq!(report.executed(), 3);
        assert_eq!(
            (report.failures, report.errors, report.skipped),
            (1, 1, 1)
        );
        assert_eq!(report.duration_ms, 16);
    }

    #[test]
    fn test_add_all() {
        let mut left = UnitTestClassReport::default();
        left.add(result(TestStatus::Ok, 1));
        let mut right = UnitTestClassReport::default();
        right.add(result(TestStatus::Error, 2));

        left.add_all(right);
        assert_eq!(left.tests, 2);
        assert_eq!(left.errors, 1);
        assert_eq!(left.duration_ms, 3);
        assert!(left.results[1].is_error_or_failure());
    }
}
