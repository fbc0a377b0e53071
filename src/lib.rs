//! Reqmatrix: Requirements Quality Analyzer
//!
//! This library classifies labeled requirement statements into functional and
//! non-functional buckets, scores each bucket for completeness, correctness and
//! clarity, and reports the result as a fixed 3x2 validation matrix.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod watcher;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub use error::{ConfigError, ParseVerdictError};

/// Requirement category, decided by the label at the start of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Functional,
    NonFunctional,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Functional, Category::NonFunctional];

    /// Literal label that introduces a statement of this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Functional => "[Functional]",
            Category::NonFunctional => "[Non-Functional]",
        }
    }

    /// Short name used in findings and quiet output
    pub fn short_name(&self) -> &'static str {
        match self {
            Category::Functional => "functional",
            Category::NonFunctional => "non-functional",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Functional => write!(f, "Functional Requirements"),
            Category::NonFunctional => write!(f, "Non-Functional Requirements"),
        }
    }
}

/// Quality criterion (one matrix row each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    Completeness,
    Correctness,
    Clarity,
}

impl Criterion {
    /// Row order of the validation matrix
    pub const ALL: [Criterion; 3] = [
        Criterion::Completeness,
        Criterion::Correctness,
        Criterion::Clarity,
    ];
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Completeness => write!(f, "Completeness"),
            Criterion::Correctness => write!(f, "Correctness"),
            Criterion::Clarity => write!(f, "Clarity"),
        }
    }
}

/// Five-point qualitative score for one (criterion, category) cell.
///
/// Ordering follows declaration order, worst first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Poor,
    Fair,
    Sufficient,
    Good,
    Excellent,
}

impl Verdict {
    pub const ALL: [Verdict; 5] = [
        Verdict::Poor,
        Verdict::Fair,
        Verdict::Sufficient,
        Verdict::Good,
        Verdict::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Poor => "Poor",
            Verdict::Fair => "Fair",
            Verdict::Sufficient => "Sufficient",
            Verdict::Good => "Good",
            Verdict::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseVerdictError(s.to_string()))
    }
}

/// A single requirement statement with its label stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Statement text (trimmed, never empty)
    pub text: String,
    /// Bucket the statement was sorted into
    pub category: Category,
    /// Input line (1-indexed)
    pub line: usize,
}

impl Requirement {
    pub fn new(text: impl Into<String>, category: Category, line: usize) -> Self {
        Self {
            text: text.into(),
            category,
            line,
        }
    }
}

impl AsRef<str> for Requirement {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Both category buckets produced by one parse, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRequirements {
    pub functional: Vec<Requirement>,
    pub non_functional: Vec<Requirement>,
    /// Number of lines in the input
    pub total_lines: usize,
    /// Non-blank lines that were not recognized as requirements
    pub skipped_lines: usize,
}

impl ParsedRequirements {
    pub fn bucket(&self, category: Category) -> &[Requirement] {
        match category {
            Category::Functional => &self.functional,
            Category::NonFunctional => &self.non_functional,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functional.is_empty() && self.non_functional.is_empty()
    }

    /// Render the buckets back into labeled lines, functional first
    pub fn to_labeled_text(&self) -> String {
        let mut out = String::new();
        for category in Category::ALL {
            for req in self.bucket(category) {
                out.push_str(category.label());
                out.push(' ');
                out.push_str(&req.text);
                out.push('\n');
            }
        }
        out
    }

    pub fn stats(&self) -> RequirementStats {
        RequirementStats {
            functional: self.functional.len(),
            non_functional: self.non_functional.len(),
            total_lines: self.total_lines,
            skipped_lines: self.skipped_lines,
        }
    }
}

/// Verdicts for both columns of one criterion row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryVerdicts {
    pub functional: Verdict,
    pub non_functional: Verdict,
}

impl CategoryVerdicts {
    pub fn get(&self, category: Category) -> Verdict {
        match category {
            Category::Functional => self.functional,
            Category::NonFunctional => self.non_functional,
        }
    }
}

/// The 3x2 result table: rows are criteria, columns are categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMatrix {
    pub completeness: CategoryVerdicts,
    pub correctness: CategoryVerdicts,
    pub clarity: CategoryVerdicts,
}

impl ValidationMatrix {
    pub fn row(&self, criterion: Criterion) -> CategoryVerdicts {
        match criterion {
            Criterion::Completeness => self.completeness,
            Criterion::Correctness => self.correctness,
            Criterion::Clarity => self.clarity,
        }
    }

    pub fn get(&self, criterion: Criterion, category: Category) -> Verdict {
        self.row(criterion).get(category)
    }

    /// All six cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Criterion, Category, Verdict)> + '_ {
        Criterion::ALL.into_iter().flat_map(move |criterion| {
            Category::ALL
                .into_iter()
                .map(move |category| (criterion, category, self.get(criterion, category)))
        })
    }

    /// Lowest verdict anywhere in the table
    pub fn worst(&self) -> Verdict {
        self.cells()
            .map(|(_, _, v)| v)
            .min()
            .unwrap_or(Verdict::Poor)
    }

    /// Cells strictly below the given verdict
    pub fn cells_below(&self, floor: Verdict) -> Vec<(Criterion, Category, Verdict)> {
        self.cells().filter(|(_, _, v)| *v < floor).collect()
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Statement-level problems that feed the criterion verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// No modal or action verb (Completeness)
    MissingActionVerb,
    /// Non-functional statement without a number, percentage or unit (Completeness)
    MissingMeasurableValue,
    /// Vague qualifier such as "fast" or "robust" (Correctness, Clarity)
    AmbiguousTerm,
    /// Fewer words than the clarity minimum (Clarity)
    TooFewWords,
}

impl FindingKind {
    pub const ALL: [FindingKind; 4] = [
        FindingKind::MissingActionVerb,
        FindingKind::MissingMeasurableValue,
        FindingKind::AmbiguousTerm,
        FindingKind::TooFewWords,
    ];

    pub fn criterion(&self) -> Criterion {
        match self {
            FindingKind::MissingActionVerb | FindingKind::MissingMeasurableValue => {
                Criterion::Completeness
            }
            FindingKind::AmbiguousTerm => Criterion::Correctness,
            FindingKind::TooFewWords => Criterion::Clarity,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingKind::MissingActionVerb => write!(f, "missing-action-verb"),
            FindingKind::MissingMeasurableValue => write!(f, "missing-measurable-value"),
            FindingKind::AmbiguousTerm => write!(f, "ambiguous-term"),
            FindingKind::TooFewWords => write!(f, "too-few-words"),
        }
    }
}

/// A diagnostic attached to one requirement statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub category: Category,
    /// Input line (1-indexed)
    pub line: usize,
    /// The offending statement
    pub statement: String,
    /// Human-readable message
    pub message: String,
    /// Suggested rewrite direction
    pub suggestion: Option<String>,
}

/// Counts describing what the parser kept and dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementStats {
    pub functional: usize,
    pub non_functional: usize,
    pub total_lines: usize,
    pub skipped_lines: usize,
}

/// The full result of analyzing one requirements document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Where the text came from ("-" for stdin)
    pub source: PathBuf,
    pub matrix: ValidationMatrix,
    pub stats: RequirementStats,
    pub requirements: ParsedRequirements,
    pub findings: Vec<Finding>,
}

/// Build the validation matrix for `raw_text` with the built-in vocabulary
/// and substring matching.
pub fn generate_validation_matrix(raw_text: &str) -> ValidationMatrix {
    analyzer::AnalysisEngine::new().generate_matrix(raw_text)
}

/// Public API: analyze a single requirements file, honoring any
/// `.reqmatrixrc.json` found from `work_dir` upwards.
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<AnalysisResult> {
    let config = crate::config::load_config(work_dir, config_path)?;
    let engine = crate::analyzer::AnalysisEngine::from_config(&config)?;
    engine.analyze(path, Some(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(f: [Verdict; 3], nf: [Verdict; 3]) -> ValidationMatrix {
        ValidationMatrix {
            completeness: CategoryVerdicts {
                functional: f[0],
                non_functional: nf[0],
            },
            correctness: CategoryVerdicts {
                functional: f[1],
                non_functional: nf[1],
            },
            clarity: CategoryVerdicts {
                functional: f[2],
                non_functional: nf[2],
            },
        }
    }

    #[test]
    fn test_verdict_order_is_worst_first() {
        assert!(Verdict::Poor < Verdict::Fair);
        assert!(Verdict::Fair < Verdict::Sufficient);
        assert!(Verdict::Sufficient < Verdict::Good);
        assert!(Verdict::Good < Verdict::Excellent);
    }

    #[test]
    fn test_verdict_from_str_case_insensitive() {
        assert_eq!("fair".parse::<Verdict>().unwrap(), Verdict::Fair);
        assert_eq!(" Excellent ".parse::<Verdict>().unwrap(), Verdict::Excellent);
        let err = "great".parse::<Verdict>().unwrap_err();
        assert!(err.to_string().contains("great"));
    }

    #[test]
    fn test_verdict_serializes_as_word() {
        assert_eq!(serde_json::to_string(&Verdict::Sufficient).unwrap(), "\"Sufficient\"");
    }

    #[test]
    fn test_matrix_cells_row_major() {
        use Verdict::*;
        let m = matrix([Good, Fair, Poor], [Sufficient, Excellent, Good]);
        let cells: Vec<_> = m.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (Criterion::Completeness, Category::Functional, Good));
        assert_eq!(cells[1], (Criterion::Completeness, Category::NonFunctional, Sufficient));
        assert_eq!(cells[3], (Criterion::Correctness, Category::NonFunctional, Excellent));
        assert_eq!(cells[4], (Criterion::Clarity, Category::Functional, Poor));
    }

    #[test]
    fn test_matrix_worst_and_cells_below() {
        use Verdict::*;
        let m = matrix([Good, Fair, Good], [Good, Excellent, Sufficient]);
        assert_eq!(m.worst(), Fair);
        let below = m.cells_below(Sufficient);
        assert_eq!(below, vec![(Criterion::Correctness, Category::Functional, Fair)]);
        assert!(m.cells_below(Poor).is_empty());
    }

    #[test]
    fn test_matrix_json_shape() {
        use Verdict::*;
        let m = matrix([Good, Fair, Poor], [Good, Poor, Fair]);
        let value = serde_json::to_value(m).unwrap();
        assert_eq!(value["completeness"]["functional"], "Good");
        assert_eq!(value["correctness"]["nonFunctional"], "Poor");
        assert_eq!(value["clarity"]["nonFunctional"], "Fair");
    }

    #[test]
    fn test_labeled_text_round_trip_shape() {
        let parsed = ParsedRequirements {
            functional: vec![Requirement::new("The system shall allow login", Category::Functional, 1)],
            non_functional: vec![Requirement::new("Respond in 2 seconds", Category::NonFunctional, 2)],
            total_lines: 2,
            skipped_lines: 0,
        };
        assert_eq!(
            parsed.to_labeled_text(),
            "[Functional] The system shall allow login\n[Non-Functional] Respond in 2 seconds\n"
        );
    }

    #[test]
    fn test_category_labels_and_titles() {
        assert_eq!(Category::NonFunctional.label(), "[Non-Functional]");
        assert_eq!(Category::Functional.to_string(), "Functional Requirements");
        assert_eq!(FindingKind::TooFewWords.criterion(), Criterion::Clarity);
    }
}
