//! Submission file reading and tabular data handling.

mod parser;
mod source;

pub use parser::{ReaderConfig, Submission, SubmissionReader, DEFAULT_UNITS_MARKER};
pub use source::{DataTable, SourceMetadata};
