//! Config schema and deserialization

use crate::analyzer::lexicon::{MatchMode, Vocabulary};
use crate::analyzer::criteria::DEFAULT_MIN_WORDS;
use crate::{FindingKind, Verdict};
use serde::Deserialize;
use std::collections::HashMap;

/// Finding severity override (error, warning, info, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
    Info,
    /// Hide the finding entirely (verdicts are unaffected)
    Off,
}

impl FindingSeverity {
    /// Convert to crate::Severity if not Off
    pub fn to_severity(self) -> Option<crate::Severity> {
        match self {
            FindingSeverity::Error => Some(crate::Severity::Error),
            FindingSeverity::Warning => Some(crate::Severity::Warning),
            FindingSeverity::Info => Some(crate::Severity::Info),
            FindingSeverity::Off => None,
        }
    }
}

/// How configured terms combine with the built-in lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyMode {
    /// Append to the built-in terms (default)
    #[default]
    Extend,
    /// Use only the configured terms for each list that is present
    Replace,
}

/// Vocabulary section of the config
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfig {
    #[serde(default)]
    pub mode: Option<VocabularyMode>,
    #[serde(default)]
    pub action_verbs: Option<Vec<String>>,
    #[serde(default)]
    pub ambiguous_terms: Option<Vec<String>>,
    #[serde(default)]
    pub measurable_markers: Option<Vec<String>>,
}

impl VocabularyConfig {
    /// Resolve against the built-in vocabulary
    pub fn resolve(&self) -> Vocabulary {
        let mode = self.mode.unwrap_or_default();
        let mut vocab = Vocabulary::default();
        apply_list(&mut vocab.action_verbs, &self.action_verbs, mode);
        apply_list(&mut vocab.ambiguous_terms, &self.ambiguous_terms, mode);
        apply_list(&mut vocab.measurable_markers, &self.measurable_markers, mode);
        vocab
    }

    fn merge_from(&mut self, base: VocabularyConfig) {
        if self.mode.is_none() {
            self.mode = base.mode;
        }
        if self.action_verbs.is_none() {
            self.action_verbs = base.action_verbs;
        }
        if self.ambiguous_terms.is_none() {
            self.ambiguous_terms = base.ambiguous_terms;
        }
        if self.measurable_markers.is_none() {
            self.measurable_markers = base.measurable_markers;
        }
    }
}

fn apply_list(target: &mut Vec<String>, configured: &Option<Vec<String>>, mode: VocabularyMode) {
    let Some(terms) = configured else {
        return;
    };
    match mode {
        VocabularyMode::Extend => target.extend(terms.iter().cloned()),
        VocabularyMode::Replace => {
            if terms.iter().all(|t| t.trim().is_empty()) {
                tracing::warn!("vocabulary list replaced with no terms; its predicate will never match");
            }
            *target = terms.clone();
        }
    }
}

/// Clarity section of the config
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClarityConfig {
    /// Statements with fewer words are unclear. Default: 6
    #[serde(default)]
    pub min_words: Option<usize>,
}

/// Root config structure for .reqmatrixrc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Exit 1 when any matrix cell is below this verdict
    #[serde(default)]
    pub fail_below: Option<Verdict>,

    /// Term matching strategy (substring or word)
    #[serde(default)]
    pub matching: Option<MatchMode>,

    /// Accept `- [Functional] ...` style bullet lines
    #[serde(default)]
    pub strip_list_markers: Option<bool>,

    /// Vocabulary overrides
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Clarity tuning
    #[serde(default)]
    pub clarity: ClarityConfig,

    /// Per-finding severity overrides. Key is the finding kind in kebab-case.
    #[serde(default)]
    pub findings: HashMap<String, FindingSeverity>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// File name suffixes treated as requirement documents when walking directories
    #[serde(default)]
    pub input_patterns: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        fail_below: Option<Verdict>,
        matching: Option<MatchMode>,
        list_markers: bool,
    ) -> Self {
        if fail_below.is_some() {
            self.fail_below = fail_below;
        }
        if matching.is_some() {
            self.matching = matching;
        }
        if list_markers {
            self.strip_list_markers = Some(true);
        }
        self
    }

    /// Get the configured severity for a finding kind, if any
    pub fn finding_severity(&self, kind: &str) -> Option<FindingSeverity> {
        self.findings.get(kind).copied()
    }

    /// Keys under `findings` that name no finding kind, sorted
    pub fn unknown_finding_keys(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .findings
            .keys()
            .map(String::as_str)
            .filter(|key| !FindingKind::ALL.iter().any(|kind| kind.to_string() == *key))
            .collect();
        unknown.sort_unstable();
        unknown
    }

    pub fn match_mode(&self) -> MatchMode {
        self.matching.unwrap_or_default()
    }

    pub fn min_words(&self) -> usize {
        self.clarity.min_words.unwrap_or(DEFAULT_MIN_WORDS)
    }

    pub fn list_markers(&self) -> bool {
        self.strip_list_markers.unwrap_or(false)
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.fail_below.is_none() {
            self.fail_below = base.fail_below;
        }
        if self.matching.is_none() {
            self.matching = base.matching;
        }
        if self.strip_list_markers.is_none() {
            self.strip_list_markers = base.strip_list_markers;
        }
        if self.clarity.min_words.is_none() {
            self.clarity.min_words = base.clarity.min_words;
        }
        self.vocabulary.merge_from(base.vocabulary);

        for (kind, severity) in base.findings {
            self.findings.entry(kind).or_insert(severity);
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.input_patterns.is_empty() {
            self.input_patterns = base.input_patterns;
        }
    }

    /// Get requirement file suffixes
    pub fn get_input_patterns(&self) -> Vec<&str> {
        if self.input_patterns.is_empty() {
            vec![".req", ".reqs", ".req.txt", ".req.md", ".requirements.txt"]
        } else {
            self.input_patterns.iter().map(|s| s.as_str()).collect()
        }
    }
}
