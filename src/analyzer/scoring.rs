//! Threshold mapping from raw counts to verdicts

use crate::{Category, Criterion, ValidationMatrix, Verdict};

/// Calculator for criterion verdicts
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Map an absolute problem count to a verdict (Completeness, Clarity).
    ///
    /// `>3 → Poor, 2–3 → Fair, 1 → Sufficient, 0 → Good`. These bands cover
    /// every count, so `Excellent` is never produced for count-based criteria.
    pub fn verdict_for_count(count: usize) -> Verdict {
        match count {
            0 => Verdict::Good,
            1 => Verdict::Sufficient,
            2 | 3 => Verdict::Fair,
            _ => Verdict::Poor,
        }
    }

    /// Map `flagged / total` as a percentage to a verdict (Correctness).
    ///
    /// `>50 → Poor, [30, 50] → Fair, [10, 30) → Sufficient, (0, 10) → Good,
    /// 0 → Excellent`. An empty bucket (`total == 0`) is `Poor`.
    ///
    /// Compared as `100 * flagged` against multiples of `total` so band edges
    /// such as 3/10 land exactly on 30%.
    pub fn verdict_for_ratio(flagged: usize, total: usize) -> Verdict {
        if total == 0 {
            return Verdict::Poor;
        }
        let scaled = 100 * flagged as u128;
        let total = total as u128;

        if scaled > 50 * total {
            Verdict::Poor
        } else if scaled >= 30 * total {
            Verdict::Fair
        } else if scaled >= 10 * total {
            Verdict::Sufficient
        } else if flagged > 0 {
            Verdict::Good
        } else {
            Verdict::Excellent
        }
    }

    /// Percentage for display (0.0 for an empty bucket)
    pub fn percentage(flagged: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            100.0 * flagged as f64 / total as f64
        }
    }

    /// Get a description of the verdict
    pub fn verdict_description(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Excellent => "Excellent - No weaknesses detected",
            Verdict::Good => "Good - No gaps found for this criterion",
            Verdict::Sufficient => "Sufficient - A single statement needs attention",
            Verdict::Fair => "Fair - Several statements need rework",
            Verdict::Poor => "Poor - Widespread problems or no requirements at all",
        }
    }

    /// Get recommendations for the weak cells of a matrix
    pub fn recommendations(matrix: &ValidationMatrix) -> Vec<String> {
        let mut recs = Vec::new();

        for category in Category::ALL {
            let completeness = matrix.get(Criterion::Completeness, category);
            if completeness <= Verdict::Fair {
                recs.push(match category {
                    Category::Functional => {
                        "Start every functional requirement with an obligation: 'The system shall ...'"
                            .to_string()
                    }
                    Category::NonFunctional => {
                        "Give each non-functional requirement a measurable target (seconds, %, users, requests)"
                            .to_string()
                    }
                });
            }
        }

        let weak_correctness: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| matrix.get(Criterion::Correctness, *c) <= Verdict::Fair)
            .collect();
        for category in weak_correctness {
            recs.push(format!(
                "{}: replace vague qualifiers like 'fast', 'robust' or 'user-friendly' with verifiable values (an empty list also scores Poor)",
                category
            ));
        }

        if Category::ALL
            .into_iter()
            .any(|c| matrix.get(Criterion::Clarity, c) <= Verdict::Fair)
        {
            recs.push(
                "Write each requirement as a full sentence naming actor, action and condition"
                    .to_string(),
            );
        }

        if recs.is_empty() {
            recs.push("Requirements are in good shape! Review the findings for remaining details.".to_string());
        }

        recs
    }
}
