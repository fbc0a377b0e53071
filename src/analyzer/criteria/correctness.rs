//! Correctness: share of statements that rely on vague qualifiers

use super::{finding, CriterionRule};
use crate::analyzer::lexicon::Lexicon;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Category, Criterion, Finding, FindingKind, Requirement, Severity, Verdict};

/// Statements containing at least one ambiguous term
pub fn ambiguous_count<S: AsRef<str>>(bucket: &[S], lexicon: &dyn Lexicon) -> usize {
    bucket
        .iter()
        .filter(|stmt| {
            let stmt: &str = stmt.as_ref();
            lexicon.has_ambiguity(stmt)
        })
        .count()
}

/// Verdict from the ambiguous percentage. An empty bucket is `Poor`.
pub fn evaluate_correctness<S: AsRef<str>>(bucket: &[S], lexicon: &dyn Lexicon) -> Verdict {
    ScoreCalculator::verdict_for_ratio(ambiguous_count(bucket, lexicon), bucket.len())
}

/// Rule for the Correctness row
pub struct CorrectnessRule;

impl CorrectnessRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CorrectnessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for CorrectnessRule {
    fn criterion(&self) -> Criterion {
        Criterion::Correctness
    }

    fn findings(
        &self,
        bucket: &[Requirement],
        _category: Category,
        lexicon: &dyn Lexicon,
    ) -> Vec<Finding> {
        bucket
            .iter()
            .filter_map(|req| {
                let term = lexicon.ambiguous_term(&req.text)?;
                Some(finding(
                    FindingKind::AmbiguousTerm,
                    Severity::Warning,
                    req,
                    format!("Ambiguous term '{}' in '{}'", term, req.text),
                    "Replace the qualifier with a verifiable condition or value",
                ))
            })
            .collect()
    }

    fn evaluate(
        &self,
        bucket: &[Requirement],
        _category: Category,
        lexicon: &dyn Lexicon,
    ) -> Verdict {
        evaluate_correctness(bucket, lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::lexicon::SubstringLexicon;

    const CLEAN: &str = "The system shall log each login attempt";
    const VAGUE: &str = "The system shall be robust";

    fn bucket(vague: usize, total: usize) -> Vec<&'static str> {
        (0..total).map(|i| if i < vague { VAGUE } else { CLEAN }).collect()
    }

    fn verdict(vague: usize, total: usize) -> Verdict {
        evaluate_correctness(&bucket(vague, total), &SubstringLexicon::default())
    }

    #[test]
    fn test_empty_bucket_is_poor() {
        let empty: [&str; 0] = [];
        assert_eq!(
            evaluate_correctness(&empty, &SubstringLexicon::default()),
            Verdict::Poor
        );
    }

    #[test]
    fn test_no_ambiguity_is_excellent() {
        assert_eq!(verdict(0, 1), Verdict::Excellent);
        assert_eq!(verdict(0, 7), Verdict::Excellent);
    }

    #[test]
    fn test_percentage_bands() {
        assert_eq!(verdict(1, 20), Verdict::Good); // 5%
        assert_eq!(verdict(1, 10), Verdict::Sufficient); // 10%
        assert_eq!(verdict(1, 4), Verdict::Sufficient); // 25%
        assert_eq!(verdict(3, 10), Verdict::Fair); // 30%
        assert_eq!(verdict(1, 3), Verdict::Fair); // 33%
        assert_eq!(verdict(1, 2), Verdict::Fair); // 50% is not Poor
        assert_eq!(verdict(3, 5), Verdict::Poor); // 60%
        assert_eq!(verdict(1, 1), Verdict::Poor);
    }

    #[test]
    fn test_counts_statements_not_terms() {
        let doubly_vague = ["The system shall be fast and robust", CLEAN];
        assert_eq!(ambiguous_count(&doubly_vague, &SubstringLexicon::default()), 1);
    }

    #[test]
    fn test_findings_report_matched_term() {
        let reqs = vec![
            Requirement::new(VAGUE, Category::Functional, 2),
            Requirement::new(CLEAN, Category::Functional, 3),
        ];
        let findings =
            CorrectnessRule::new().findings(&reqs, Category::Functional, &SubstringLexicon::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert!(findings[0].message.contains("'robust'"));
    }
}
