//! Analyzer module - requirements quality scoring engine

pub mod criteria;
pub mod engine;
pub mod lexicon;
pub mod scoring;

pub use engine::{AggregateStats, AnalysisEngine};
pub use lexicon::{Lexicon, MatchMode, SubstringLexicon, Vocabulary, WordBoundaryLexicon};
pub use scoring::ScoreCalculator;
