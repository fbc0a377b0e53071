//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::AnalysisResult;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single analysis result as JSON
    pub fn report(&self, result: &AnalysisResult) -> String {
        self.render(result, "{}")
    }

    /// Report multiple results as JSON array
    pub fn report_many(&self, results: &[AnalysisResult]) -> String {
        self.render(results, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, results: &[AnalysisResult], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results,
            summary: stats,
        };
        self.render(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [AnalysisResult],
    summary: &'a AggregateStats,
}
