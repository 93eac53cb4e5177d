//! Typed error handling for customdep.
//!
//! Provides structured errors that library consumers can match on.
//! None of these are fatal to an analysis run: the engine recovers from
//! rule-set and fact-file failures by skipping the offending input.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for customdep operations.
#[derive(Error, Debug)]
pub enum CustomDepError {
    /// I/O error when reading rule or fact files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors (customdep.toml)
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Deprecated-API rule text could not be turned into a rule set
    #[error("Invalid deprecated API configuration: {message}")]
    RuleSet { message: String },

    /// Host fact file could not be decoded
    #[error("Invalid fact file {path}: {message}")]
    Facts { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CustomDepError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a rule-set error.
    pub fn rule_set(message: impl Into<String>) -> Self {
        Self::RuleSet {
            message: message.into(),
        }
    }

    /// Create a fact-file error.
    pub fn facts(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Facts {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (analysis continues without the input).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RuleSet { .. } | Self::Facts { .. } | Self::Config { .. }
        )
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::Facts { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for customdep results.
pub type CustomDepResult<T> = Result<T, CustomDepError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> CustomDepResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> CustomDepResult<T> {
        self.map_err(|e| CustomDepError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = CustomDepError::io(
            PathBuf::from("/rules/deprecated.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, CustomDepError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/rules/deprecated.json")));
        assert!(err.to_string().contains("/rules/deprecated.json"));
    }

    #[test]
    fn test_rule_set_error_has_no_path() {
        let err = CustomDepError::rule_set("expected `[`");
        assert!(err.path().is_none());
        assert!(err.to_string().contains("expected `[`"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(CustomDepError::rule_set("bad json").is_recoverable());
        assert!(CustomDepError::facts("/a.facts.json", "eof").is_recoverable());
        assert!(!CustomDepError::invalid_argument("no root").is_recoverable());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/missing/rules.json").unwrap_err();
        assert_eq!(err.path(), Some(&PathBuf::from("/missing/rules.json")));
    }
}
