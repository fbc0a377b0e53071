//! Clarity: statements that are too terse or lean on vague qualifiers

use super::{finding, CriterionRule};
use crate::analyzer::lexicon::Lexicon;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Category, Criterion, Finding, FindingKind, Requirement, Severity, Verdict};

/// Statements with fewer whitespace-separated words than this are unclear
pub const DEFAULT_MIN_WORDS: usize = 6;

fn word_count(stmt: &str) -> usize {
    stmt.split_whitespace().count()
}

/// Statements that are short OR ambiguous (each counted once)
pub fn unclear_count<S: AsRef<str>>(bucket: &[S], min_words: usize, lexicon: &dyn Lexicon) -> usize {
    bucket
        .iter()
        .filter(|stmt| {
            let stmt: &str = stmt.as_ref();
            word_count(stmt) < min_words || lexicon.has_ambiguity(stmt)
        })
        .count()
}

/// Verdict from the absolute unclear count, using the default word minimum
pub fn evaluate_clarity<S: AsRef<str>>(bucket: &[S], lexicon: &dyn Lexicon) -> Verdict {
    ScoreCalculator::verdict_for_count(unclear_count(bucket, DEFAULT_MIN_WORDS, lexicon))
}

/// Rule for the Clarity row
pub struct ClarityRule {
    min_words: usize,
}

impl ClarityRule {
    pub fn new() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
        }
    }

    /// Override the word minimum
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }
}

impl Default for ClarityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriterionRule for ClarityRule {
    fn criterion(&self) -> Criterion {
        Criterion::Clarity
    }

    /// Only the length problem is reported here; ambiguous terms already
    /// surface through the correctness findings.
    fn findings(
        &self,
        bucket: &[Requirement],
        _category: Category,
        _lexicon: &dyn Lexicon,
    ) -> Vec<Finding> {
        bucket
            .iter()
            .filter_map(|req| {
                let words = word_count(&req.text);
                (words < self.min_words).then(|| {
                    finding(
                        FindingKind::TooFewWords,
                        Severity::Info,
                        req,
                        format!(
                            "'{}' has {} word{} (minimum {})",
                            req.text,
                            words,
                            if words == 1 { "" } else { "s" },
                            self.min_words
                        ),
                        "Name the actor, the action and the condition in a full sentence",
                    )
                })
            })
            .collect()
    }

    fn evaluate(
        &self,
        bucket: &[Requirement],
        _category: Category,
        lexicon: &dyn Lexicon,
    ) -> Verdict {
        ScoreCalculator::verdict_for_count(unclear_count(bucket, self.min_words, lexicon))
    }
}
