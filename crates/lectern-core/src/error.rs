//! Error types for the Lectern core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::content::CollectionKind;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Lectern.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frontmatter could not be split off or deserialized.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// A required field is absent or null.
    Missing,

    /// The value has the wrong shape.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The value is a string but does not match the required format.
    Format { expected: &'static str, found: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("required field is missing"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::Format { expected, found } => {
                write!(f, "expected {expected}, found {found:?}")
            }
        }
    }
}

/// A rejected field, addressed by its path in the frontmatter
/// (`title`, `coverImage.alt`, `tags[2]`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldIssue {
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Whether this issue is a malformed date or date-time string.
    pub fn is_date_format(&self) -> bool {
        matches!(self.kind, IssueKind::Format { .. })
    }
}

/// Every field issue found while validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {collection} entry: {}", join_issues(.issues))]
pub struct ValidationError {
    pub collection: CollectionKind,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(collection: CollectionKind, issues: Vec<FieldIssue>) -> Self {
        Self { collection, issues }
    }

    /// Find the issue reported for a field path, if any.
    pub fn field(&self, field: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
