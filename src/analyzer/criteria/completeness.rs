//! Completeness: does every statement say what the system does, and do
//! non-functional statements carry a measurable target?

use super::{finding, CriterionRule};
use crate::analyzer::lexicon::Lexicon;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Category, Criterion, Finding, FindingKind, Requirement, Severity, Verdict};

/// Total gaps in a bucket: one per statement without an action verb, plus
/// (non-functional only) one per statement without a measurable value.
pub fn missing_count<S: AsRef<str>>(bucket: &[S], is_nfr: bool, lexicon: &dyn Lexicon) -> usize {
    bucket
        .iter()
        .map(|stmt| {
            let stmt: &str = stmt.as_ref();
            let mut missing = 0;
            if !lexicon.has_action(stmt) {
                missing += 1;
            }
            if is_nfr && !lexicon.has_measurable(stmt) {
                missing += 1;
            }
            missing
        })
        .sum()
}

/// Verdict from the absolute gap count (not a rate)
pub fn evaluate_completeness<S: AsRef<str>>(
    bucket: &[S],
    is_nfr: bool,
    lexicon: &dyn Lexicon,
) -> Verdict {
    ScoreCalculator::verdict_for_count(missing_count(bucket, is_nfr, lexicon))
}

/// Rule for the Completeness row
pub struct CompletenessRule;

impl CompletenessRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompletenessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for CompletenessRule {
    fn criterion(&self) -> Criterion {
        Criterion::Completeness
    }

    fn findings(
        &self,
        bucket: &[Requirement],
        category: Category,
        lexicon: &dyn Lexicon,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();
        let is_nfr = category == Category::NonFunctional;

        for req in bucket {
            if !lexicon.has_action(&req.text) {
                findings.push(finding(
                    FindingKind::MissingActionVerb,
                    Severity::Warning,
                    req,
                    format!("No action or modal verb in '{}'", req.text),
                    "State the obligation explicitly, e.g. 'The system shall ...'",
                ));
            }
            if is_nfr && !lexicon.has_measurable(&req.text) {
                findings.push(finding(
                    FindingKind::MissingMeasurableValue,
                    Severity::Warning,
                    req,
                    format!("No measurable target in '{}'", req.text),
                    "Add a number, percentage or unit, e.g. 'within 2 seconds' or '99.9% uptime'",
                ));
            }
        }

        findings
    }

    fn evaluate(
        &self,
        bucket: &[Requirement],
        category: Category,
        lexicon: &dyn Lexicon,
    ) -> Verdict {
        evaluate_completeness(bucket, category == Category::NonFunctional, lexicon)
    }
}
