use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level problem reported by validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: Option<String>,
    pub issue: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            issue: issue.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {field}: {reason}")]
    Format { field: String, reason: String },

    #[error("{field} must match the value derived from hex")]
    Invariant { field: String },

    #[error("Validation failed with {} issue(s)", .0.len())]
    Validation(Vec<FieldIssue>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Field-level detail for errors caused by caller input.
    ///
    /// Returns an empty list for system errors.
    pub fn issues(&self) -> Vec<FieldIssue> {
        match self {
            Error::Format { field, reason } => vec![FieldIssue::new(field.clone(), reason.clone())],
            Error::Invariant { field } => vec![FieldIssue::new(
                field.clone(),
                "must match the value derived from hex",
            )],
            Error::Validation(issues) => issues.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether the error was caused by caller input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Format { .. } | Error::Invariant { .. } | Error::Validation(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
