//! Domain errors
//!
//! Storage failures live in `storage::error` and never reach callers of the
//! repository; these are the errors a user can actually see.

use thiserror::Error;

/// A draft is missing a required field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Code is required")]
    MissingCode,
}

/// Errors from repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Invalid snippet: {0}")]
    Validation(#[from] ValidationError),

    #[error("Snippet not found: {id}")]
    NotFound { id: String },

    #[error("Ambiguous id '{prefix}' matches {} snippets", candidates.len())]
    Ambiguous {
        prefix: String,
        candidates: Vec<String>,
    },
}

/// Errors from import/export
#[derive(Error, Debug)]
pub enum CodecError {
    /// The document is not a JSON array of records
    #[error("Invalid file format: {0}")]
    Format(String),

    /// A record failed validation; nothing from the document is admitted
    #[error("Invalid snippet at index {index}: {reason}")]
    Validation { index: usize, reason: String },

    #[error("Failed to serialize snippets: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        CodecError::Validation {
            index,
            reason: reason.into(),
        }
    }
}
