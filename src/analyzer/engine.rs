//! Analysis engine - parses requirement text and fills the validation matrix

use crate::config::{Config, FindingSeverity};
use crate::parser::RequirementParser;
use crate::{
    AnalysisResult, Category, CategoryVerdicts, ConfigError, Finding, ParsedRequirements,
    ValidationMatrix, Verdict,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::criteria::{ClarityRule, CompletenessRule, CorrectnessRule, CriterionRule};
use super::lexicon::{Lexicon, SubstringLexicon, Vocabulary};

/// Main analysis engine: parser, lexicon and the three criterion rules
pub struct AnalysisEngine {
    parser: RequirementParser,
    lexicon: Box<dyn Lexicon>,
    completeness: CompletenessRule,
    correctness: CorrectnessRule,
    clarity: ClarityRule,
}

impl AnalysisEngine {
    /// Create an engine with the built-in vocabulary and substring matching
    pub fn new() -> Self {
        Self {
            parser: RequirementParser::new(),
            lexicon: Box::new(SubstringLexicon::default()),
            completeness: CompletenessRule::new(),
            correctness: CorrectnessRule::new(),
            clarity: ClarityRule::new(),
        }
    }

    /// Build an engine from a loaded config (matching mode, vocabulary, clarity, list markers)
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let lexicon = config.match_mode().build(config.vocabulary.resolve())?;
        tracing::debug!(
            matching = lexicon.name(),
            min_words = config.min_words(),
            list_markers = config.list_markers(),
            "engine configured"
        );
        Ok(Self::new()
            .with_lexicon(lexicon)
            .with_min_words(config.min_words())
            .with_list_markers(config.list_markers()))
    }

    /// Substitute the statement predicates
    pub fn with_lexicon(mut self, lexicon: Box<dyn Lexicon>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Use a custom vocabulary with substring matching
    pub fn with_vocabulary(self, vocabulary: Vocabulary) -> Self {
        self.with_lexicon(Box::new(SubstringLexicon::new(vocabulary)))
    }

    /// Set the clarity word minimum
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.clarity = ClarityRule::new().with_min_words(min_words);
        self
    }

    /// Accept bullet-prefixed requirement lines
    pub fn with_list_markers(mut self, enabled: bool) -> Self {
        self.parser = RequirementParser::new().with_list_markers(enabled);
        self
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    fn rules(&self) -> [&dyn CriterionRule; 3] {
        [&self.completeness, &self.correctness, &self.clarity]
    }

    /// Split raw text into the two category buckets
    pub fn parse(&self, raw_text: &str) -> ParsedRequirements {
        self.parser.parse(raw_text)
    }

    /// Parse and score in one step
    pub fn generate_matrix(&self, raw_text: &str) -> ValidationMatrix {
        self.matrix_for(&self.parse(raw_text))
    }

    /// Score already-parsed buckets
    pub fn matrix_for(&self, parsed: &ParsedRequirements) -> ValidationMatrix {
        let lexicon = self.lexicon();
        let row = |rule: &dyn CriterionRule| CategoryVerdicts {
            functional: rule.evaluate(&parsed.functional, Category::Functional, lexicon),
            non_functional: rule.evaluate(&parsed.non_functional, Category::NonFunctional, lexicon),
        };
        let [completeness, correctness, clarity] = self.rules();

        ValidationMatrix {
            completeness: row(completeness),
            correctness: row(correctness),
            clarity: row(clarity),
        }
    }

    /// Statement-level findings for both buckets, ordered by input line
    pub fn findings_for(&self, parsed: &ParsedRequirements) -> Vec<Finding> {
        let lexicon = self.lexicon();
        let mut findings: Vec<Finding> = self
            .rules()
            .into_iter()
            .flat_map(move |rule| {
                Category::ALL
                    .into_iter()
                    .flat_map(move |category| {
                        rule.findings(parsed.bucket(category), category, lexicon)
                    })
            })
            .collect();
        findings.sort_by_key(|f| f.line);
        findings
    }

    /// Apply config to filter and adjust finding severity
    fn apply_config_to_findings(&self, findings: Vec<Finding>, config: Option<&Config>) -> Vec<Finding> {
        let Some(config) = config else {
            return findings;
        };

        findings
            .into_iter()
            .filter_map(|mut finding| match config.finding_severity(&finding.kind.to_string()) {
                Some(FindingSeverity::Off) => None,
                Some(fs) => {
                    if let Some(sev) = fs.to_severity() {
                        finding.severity = sev;
                    }
                    Some(finding)
                }
                None => Some(finding),
            })
            .collect()
    }

    /// Analyze requirement text from memory (e.g. stdin). `source` is only a label.
    pub fn analyze_text(&self, raw_text: &str, source: &Path, config: Option<&Config>) -> AnalysisResult {
        let requirements = self.parse(raw_text);
        let matrix = self.matrix_for(&requirements);
        let findings = self.apply_config_to_findings(self.findings_for(&requirements), config);

        tracing::debug!(
            source = %source.display(),
            matching = self.lexicon.name(),
            worst = %matrix.worst(),
            findings = findings.len(),
            "analysis complete"
        );

        AnalysisResult {
            source: source.to_path_buf(),
            matrix,
            stats: requirements.stats(),
            requirements,
            findings,
        }
    }

    /// Analyze a requirements file and return the result
    pub fn analyze(&self, path: &Path, config: Option<&Config>) -> Result<AnalysisResult> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file: {}", path.display()))?;
        Ok(self.analyze_text(&text, path, config))
    }

    /// Aggregate statistics across multiple results
    pub fn aggregate_stats(results: &[AnalysisResult]) -> AggregateStats {
        AggregateStats {
            files_analyzed: results.len(),
            functional: results.iter().map(|r| r.stats.functional).sum(),
            non_functional: results.iter().map(|r| r.stats.non_functional).sum(),
            skipped_lines: results.iter().map(|r| r.stats.skipped_lines).sum(),
            total_findings: results.iter().map(|r| r.findings.len()).sum(),
            worst_verdict: results.iter().map(|r| r.matrix.worst()).min(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple file analyses
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Functional statements across all files
    pub functional: usize,
    /// Non-functional statements across all files
    pub non_functional: usize,
    /// Unrecognized lines across all files
    pub skipped_lines: usize,
    /// Total number of findings
    pub total_findings: usize,
    /// Lowest cell verdict across all files
    pub worst_verdict: Option<Verdict>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::lexicon::WordBoundaryLexicon;
    use crate::{Criterion, FindingKind, Severity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXAMPLE: &str = "[Functional] The system shall allow login\n\
                           [Functional] The system must ensure fast performance\n\
                           [Non-Functional] The system shall respond within 2 seconds\n";

    fn make_req_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".req").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_example_matrix() {
        let m = AnalysisEngine::new().generate_matrix(EXAMPLE);
        assert_eq!(m.get(Criterion::Completeness, Category::Functional), Verdict::Good);
        assert_eq!(m.get(Criterion::Correctness, Category::Functional), Verdict::Fair);
        // one statement is ambiguous, the other has 5 words
        assert_eq!(m.get(Criterion::Clarity, Category::Functional), Verdict::Fair);
        assert_eq!(m.get(Criterion::Completeness, Category::NonFunctional), Verdict::Good);
        assert_eq!(m.get(Criterion::Correctness, Category::NonFunctional), Verdict::Excellent);
        assert_eq!(m.get(Criterion::Clarity, Category::NonFunctional), Verdict::Good);
    }

    #[test]
    fn test_empty_text_is_well_formed() {
        let m = AnalysisEngine::new().generate_matrix("");
        for category in Category::ALL {
            assert_eq!(m.get(Criterion::Completeness, category), Verdict::Good);
            assert_eq!(m.get(Criterion::Correctness, category), Verdict::Poor);
            assert_eq!(m.get(Criterion::Clarity, category), Verdict::Good);
        }
    }

    #[test]
    fn test_findings_sorted_by_line() {
        let engine = AnalysisEngine::new();
        let parsed = engine.parse(
            "[Non-Functional] Pages look nice\n[Functional] Login\n[Functional] The system shall be robust and secure always\n",
        );
        let findings = engine.findings_for(&parsed);
        let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
        assert!(findings
            .iter()
            .any(|f| f.line == 1 && f.kind == FindingKind::MissingMeasurableValue));
        assert!(findings.iter().any(|f| f.line == 2 && f.kind == FindingKind::TooFewWords));
        assert!(findings.iter().any(|f| f.line == 3 && f.kind == FindingKind::AmbiguousTerm));
    }

    #[test]
    fn test_config_turns_findings_off_and_changes_severity() {
        let config: Config = serde_json::from_str(
            r#"{ "findings": { "too-few-words": "off", "ambiguous-term": "error" } }"#,
        )
        .unwrap();
        let engine = AnalysisEngine::from_config(&config).unwrap();
        let result = engine.analyze_text(
            "[Functional] Login\n[Functional] The system shall be fast for every user\n",
            Path::new("-"),
            Some(&config),
        );
        assert!(result.findings.iter().all(|f| f.kind != FindingKind::TooFewWords));
        let ambiguous = result
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::AmbiguousTerm)
            .unwrap();
        assert_eq!(ambiguous.severity, Severity::Error);
        // verdicts ignore finding config
        assert_eq!(
            result.matrix.get(Criterion::Clarity, Category::Functional),
            Verdict::Fair
        );
    }

    #[test]
    fn test_word_matching_changes_verdict() {
        let text = "[Functional] The system shall print the breakfast menu daily\n";
        let substring = AnalysisEngine::new().generate_matrix(text);
        assert_eq!(
            substring.get(Criterion::Correctness, Category::Functional),
            Verdict::Poor
        );

        let strict = AnalysisEngine::new().with_lexicon(Box::new(
            WordBoundaryLexicon::new(Vocabulary::default()).unwrap(),
        ));
        assert_eq!(
            strict
                .generate_matrix(text)
                .get(Criterion::Correctness, Category::Functional),
            Verdict::Excellent
        );
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = Vocabulary::default().with_ambiguous_terms(["tbd"]);
        let engine = AnalysisEngine::new().with_vocabulary(vocab);
        let m = engine.generate_matrix("[Functional] The system shall be robust and do TBD things\n");
        // "robust" is no longer in the list, "tbd" is
        assert_eq!(m.get(Criterion::Correctness, Category::Functional), Verdict::Poor);
        let m = engine.generate_matrix("[Functional] The system shall be robust in every scenario\n");
        assert_eq!(m.get(Criterion::Correctness, Category::Functional), Verdict::Excellent);
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config: Config = serde_json::from_str(
            r#"{ "stripListMarkers": true, "clarity": { "minWords": 2 }, "matching": "word" }"#,
        )
        .unwrap();
        let engine = AnalysisEngine::from_config(&config).unwrap();
        assert_eq!(engine.lexicon().name(), "word");
        let result = engine.analyze_text("- [Functional] Users shall login\n", Path::new("-"), None);
        assert_eq!(result.stats.functional, 1);
        assert_eq!(
            result.matrix.get(Criterion::Clarity, Category::Functional),
            Verdict::Good
        );
    }

    #[test]
    fn test_analyze_file() {
        let file = make_req_file(EXAMPLE);
        let result = AnalysisEngine::new().analyze(file.path(), None).unwrap();
        assert_eq!(result.source, file.path());
        assert_eq!(result.stats.functional, 2);
        assert_eq!(result.stats.non_functional, 1);
        assert_eq!(result.requirements.functional[0].text, "The system shall allow login");
    }

    #[test]
    fn test_analyze_missing_file() {
        let err = AnalysisEngine::new()
            .analyze(Path::new("definitely/not/here.req"), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read requirements file"));
    }

    #[test]
    fn test_aggregate_stats() {
        let engine = AnalysisEngine::new();
        let a = engine.analyze_text(EXAMPLE, Path::new("a.req"), None);
        let b = engine.analyze_text("notes only\n", Path::new("b.req"), None);
        let stats = AnalysisEngine::aggregate_stats(&[a, b]);
        assert_eq!(stats.files_analyzed, 2);
        assert_eq!(stats.functional, 2);
        assert_eq!(stats.non_functional, 1);
        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(stats.worst_verdict, Some(Verdict::Poor));
    }

    #[test]
    fn test_aggregate_stats_empty() {
        let stats = AnalysisEngine::aggregate_stats(&[]);
        assert_eq!(stats.files_analyzed, 0);
        assert_eq!(stats.total_findings, 0);
        assert_eq!(stats.worst_verdict, None);
    }
}
