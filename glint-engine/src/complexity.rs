//! Aggregation of external complexity results
//!
//!     Class, method and cyclomatic-complexity figures come from an external analyzer. The
//!     engine only folds that analyzer's per-class results into per-file counters and
//!     publishes them.

use crate::emission::AnalysisSink;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the metric carrying cyclomatic complexity.
pub const CYCLOMATIC_COMPLEXITY_METRIC_NAME: &str = "CyclomaticComplexity";

const TOTAL_VALUE: &str = "total";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricResult {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, i64>,
}

/// Analyzer results for one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassResults {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<MetricResult>,
}

impl ClassResults {
    fn cyclomatic_complexity(&self) -> Option<i64> {
        self.metrics
            .iter()
            .find(|metric| metric.name == CYCLOMATIC_COMPLEXITY_METRIC_NAME)
            .and_then(|metric| metric.values.get(TOTAL_VALUE).copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityMeasures {
    pub classes: usize,
    pub functions: usize,
    pub complexity: i64,
}

pub fn aggregate(results: &[ClassResults]) -> ComplexityMeasures {
    results
        .iter()
        .fold(ComplexityMeasures::default(), |mut measures, class| {
            measures.classes += 1;
            measures.functions += class.methods.len();
            measures.complexity += class.cyclomatic_complexity().unwrap_or(0);
            measures
        })
}

/// Publish the aggregated measures of every file in `results_by_file`.
pub fn publish_complexity(
    results_by_file: &BTreeMap<String, Vec<ClassResults>>,
    sink: &mut dyn AnalysisSink,
) {
    for (file, results) in results_by_file {
        sink.save_complexity(file, &aggregate(results));
    }
}
