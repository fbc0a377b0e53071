//! Error types for configuration loading and verdict parsing.
//!
//! Analysis itself never fails: malformed lines are dropped and empty buckets
//! get a defined verdict. Errors only come from the edges (config files,
//! user-supplied vocabularies, CLI arguments).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or loading `.reqmatrixrc.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An `extends` target does not exist.
    #[error("extended config not found: {} (referenced from {})", .target.display(), .from.display())]
    ExtendsNotFound { target: PathBuf, from: PathBuf },

    /// The `extends` chain loops back on itself.
    #[error("Circular extends detected in config: {}", .0.display())]
    CircularExtends(PathBuf),

    /// The file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the config schema.
    #[error("invalid JSON in config {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An ignore glob does not compile.
    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A vocabulary term produced an unusable matcher.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

/// A string that is not one of Poor, Fair, Sufficient, Good, Excellent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown verdict '{0}' (expected Poor, Fair, Sufficient, Good or Excellent)")]
pub struct ParseVerdictError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ConfigError::CircularExtends(PathBuf::from("a/.reqmatrixrc.json"));
        assert_eq!(
            err.to_string(),
            "Circular extends detected in config: a/.reqmatrixrc.json"
        );

        let err = ConfigError::ExtendsNotFound {
            target: PathBuf::from("base.json"),
            from: PathBuf::from(".reqmatrixrc.json"),
        };
        assert!(err.to_string().contains("base.json"));
        assert!(err.to_string().contains("referenced from .reqmatrixrc.json"));

        let err = ParseVerdictError("great".into());
        assert!(err.to_string().starts_with("unknown verdict 'great'"));
    }

    #[test]
    fn invalid_json_keeps_source() {
        use std::error::Error as _;
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::InvalidJson {
            path: PathBuf::from("x.json"),
            source,
        };
        assert!(err.source().is_some());
    }
}
