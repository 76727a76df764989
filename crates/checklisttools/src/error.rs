//! Error types for the checklisttools library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for checklist and submission handling.
///
/// Constraint violations found in submitted data are not errors; they are
/// returned as [`FailureRecord`](crate::validation::FailureRecord)s.
#[derive(Debug, Error)]
pub enum ChecklistError {
    /// The checklist XML is missing a required element or attribute.
    #[error("Malformed checklist: {message}")]
    MalformedChecklist { message: String },

    /// A checklist field declares a type other than text or text choice.
    #[error("Unsupported field type '{field_type}' for field '{field}'")]
    UnsupportedFieldType { field: String, field_type: String },

    /// An input path does not point to a regular file.
    #[error("{} is not a file", path.display())]
    MissingInputFile { path: PathBuf },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the XML reader.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Empty file or no data to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChecklistError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ChecklistError::MalformedChecklist {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChecklistError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for checklisttools operations.
pub type Result<T> = std::result::Result<T, ChecklistError>;
