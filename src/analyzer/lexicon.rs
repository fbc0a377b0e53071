//! Lexical predicates over a single requirement statement
//!
//! Scorers only talk to the [`Lexicon`] trait. [`SubstringLexicon`] is the
//! compatible default: plain case-insensitive containment, so "breakfast"
//! counts as containing "fast". [`WordBoundaryLexicon`] is the stricter
//! drop-in that only matches whole words and phrases.

use crate::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A decimal digit (Unicode `Nd`) or a percent sign always marks a statement
/// as measurable, whatever the configured markers are
static MEASURABLE_SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d%]").unwrap());

pub const DEFAULT_ACTION_VERBS: &[&str] = &[
    "shall", "must", "should", "will", "allow", "provide", "generate", "store", "process",
    "validate", "send", "receive", "display", "ensure", "support",
];

pub const DEFAULT_AMBIGUOUS_TERMS: &[&str] = &[
    "fast",
    "quick",
    "efficient",
    "user-friendly",
    "etc",
    "and so on",
    "appropriate",
    "suitable",
    "robust",
    "secure",
    "easy",
    "optimize",
    "low latency",
    "large number",
    "reliable",
    "consistent",
    "scalable",
];

/// Literal markers of a measurable target (digits and `%` always count as well)
pub const DEFAULT_MEASURABLE_MARKERS: &[&str] =
    &["seconds", "ms", "users", "transactions", "requests"];

/// Reference word lists the predicates match against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub action_verbs: Vec<String>,
    pub ambiguous_terms: Vec<String>,
    pub measurable_markers: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            action_verbs: to_owned_list(DEFAULT_ACTION_VERBS),
            ambiguous_terms: to_owned_list(DEFAULT_AMBIGUOUS_TERMS),
            measurable_markers: to_owned_list(DEFAULT_MEASURABLE_MARKERS),
        }
    }
}

fn to_owned_list(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Vocabulary {
    /// A vocabulary with no terms at all (only digits count as measurable)
    pub fn empty() -> Self {
        Self {
            action_verbs: Vec::new(),
            ambiguous_terms: Vec::new(),
            measurable_markers: Vec::new(),
        }
    }

    pub fn with_action_verbs<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_verbs = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ambiguous_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ambiguous_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_measurable_markers<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measurable_markers = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Append another vocabulary's terms after this one's
    pub fn extend(&mut self, other: Vocabulary) {
        self.action_verbs.extend(other.action_verbs);
        self.ambiguous_terms.extend(other.ambiguous_terms);
        self.measurable_markers.extend(other.measurable_markers);
    }

    /// Lower-case, trim, drop blanks and duplicates (first occurrence wins)
    pub fn normalized(&self) -> Self {
        Self {
            action_verbs: normalize_terms(&self.action_verbs),
            ambiguous_terms: normalize_terms(&self.ambiguous_terms),
            measurable_markers: normalize_terms(&self.measurable_markers),
        }
    }
}

fn normalize_terms(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

/// The three statement predicates the scorers depend on.
///
/// The `*_term` methods return the matched term so findings can name it;
/// the `has_*` methods are what scoring uses.
pub trait Lexicon: Send + Sync {
    /// Matcher name for logs and reports
    fn name(&self) -> &'static str;

    /// First action or modal verb found in the statement
    fn action_verb(&self, statement: &str) -> Option<String>;

    /// First vague qualifier found in the statement
    fn ambiguous_term(&self, statement: &str) -> Option<String>;

    /// First digit, percent sign or unit found in the statement
    fn measurable_marker(&self, statement: &str) -> Option<String>;

    fn has_action(&self, statement: &str) -> bool {
        self.action_verb(statement).is_some()
    }

    fn has_ambiguity(&self, statement: &str) -> bool {
        self.ambiguous_term(statement).is_some()
    }

    fn has_measurable(&self, statement: &str) -> bool {
        self.measurable_marker(statement).is_some()
    }
}

/// Naive containment matching against the lower-cased statement
#[derive(Debug, Clone)]
pub struct SubstringLexicon {
    vocabulary: Vocabulary,
}

impl SubstringLexicon {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn first_contained(statement: &str, terms: &[String]) -> Option<String> {
        let lower = statement.to_lowercase();
        terms
            .iter()
            .find(|term| lower.contains(term.as_str()))
            .cloned()
    }
}

impl Default for SubstringLexicon {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl Lexicon for SubstringLexicon {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn action_verb(&self, statement: &str) -> Option<String> {
        Self::first_contained(statement, &self.vocabulary.action_verbs)
    }

    fn ambiguous_term(&self, statement: &str) -> Option<String> {
        Self::first_contained(statement, &self.vocabulary.ambiguous_terms)
    }

    fn measurable_marker(&self, statement: &str) -> Option<String> {
        if let Some(m) = MEASURABLE_SYMBOL.find(statement) {
            return Some(m.as_str().to_string());
        }
        Self::first_contained(statement, &self.vocabulary.measurable_markers)
    }
}

/// Whole-word matching: "fast" no longer matches inside "breakfast".
/// Digits and `%` still match anywhere.
#[derive(Debug, Clone)]
pub struct WordBoundaryLexicon {
    action: Option<Regex>,
    ambiguous: Option<Regex>,
    measurable: Option<Regex>,
}

impl WordBoundaryLexicon {
    pub fn new(vocabulary: Vocabulary) -> Result<Self, ConfigError> {
        let vocabulary = vocabulary.normalized();
        Ok(Self {
            action: alternation(&vocabulary.action_verbs)?,
            ambiguous: alternation(&vocabulary.ambiguous_terms)?,
            measurable: alternation(&vocabulary.measurable_markers)?,
        })
    }

    fn first_match(re: &Option<Regex>, statement: &str) -> Option<String> {
        re.as_ref()
            .and_then(|re| re.find(statement))
            .map(|m| m.as_str().to_lowercase())
    }
}

/// `\b` only makes sense next to a word character
fn bounded(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if term.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if term.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn alternation(terms: &[String]) -> Result<Option<Regex>, ConfigError> {
    if terms.is_empty() {
        return Ok(None);
    }
    let body = terms.iter().map(|t| bounded(t)).collect::<Vec<_>>().join("|");
    Regex::new(&format!("(?i)(?:{})", body))
        .map(Some)
        .map_err(|e| ConfigError::InvalidVocabulary(e.to_string()))
}

impl Lexicon for WordBoundaryLexicon {
    fn name(&self) -> &'static str {
        "word"
    }

    fn action_verb(&self, statement: &str) -> Option<String> {
        Self::first_match(&self.action, statement)
    }

    fn ambiguous_term(&self, statement: &str) -> Option<String> {
        Self::first_match(&self.ambiguous, statement)
    }

    fn measurable_marker(&self, statement: &str) -> Option<String> {
        if let Some(m) = MEASURABLE_SYMBOL.find(statement) {
            return Some(m.as_str().to_string());
        }
        Self::first_match(&self.measurable, statement)
    }
}

/// Which [`Lexicon`] implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive containment (compatible default)
    #[default]
    Substring,
    /// Whole words and phrases only
    Word,
}

impl MatchMode {
    pub fn build(self, vocabulary: Vocabulary) -> Result<Box<dyn Lexicon>, ConfigError> {
        Ok(match self {
            MatchMode::Substring => Box::new(SubstringLexicon::new(vocabulary)),
            MatchMode::Word => Box::new(WordBoundaryLexicon::new(vocabulary)?),
        })
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word" => Ok(MatchMode::Word),
            other => Err(format!("unknown matching mode '{}' (expected substring or word)", other)),
        }
    }
}
