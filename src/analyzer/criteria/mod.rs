//! Quality criteria: one rule per matrix row

pub mod clarity;
pub mod completeness;
pub mod correctness;

pub use clarity::{evaluate_clarity, unclear_count, ClarityRule, DEFAULT_MIN_WORDS};
pub use completeness::{evaluate_completeness, missing_count, CompletenessRule};
pub use correctness::{ambiguous_count, evaluate_correctness, CorrectnessRule};

use super::lexicon::Lexicon;
use crate::{Category, Criterion, Finding, FindingKind, Requirement, Severity, Verdict};

/// Trait for criterion rules
pub trait CriterionRule {
    /// Matrix row this rule fills
    fn criterion(&self) -> Criterion;

    /// Statement-level findings that explain the verdict
    fn findings(
        &self,
        bucket: &[Requirement],
        category: Category,
        lexicon: &dyn Lexicon,
    ) -> Vec<Finding>;

    /// Category-level verdict for one bucket
    fn evaluate(&self, bucket: &[Requirement], category: Category, lexicon: &dyn Lexicon)
        -> Verdict;
}

pub(crate) fn finding(
    kind: FindingKind,
    severity: Severity,
    req: &Requirement,
    message: String,
    suggestion: &str,
) -> Finding {
    Finding {
        kind,
        severity,
        category: req.category,
        line: req.line,
        statement: req.text.clone(),
        message,
        suggestion: Some(suggestion.to_string()),
    }
}
