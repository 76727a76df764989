//! checklisttools: validate sample metadata against ENA sample checklists.
//!
//! A checklist XML is parsed into a typed model, compiled into two column
//! constraint sets (one for the units table, one for the samples table) and
//! applied to a submission. Validation is exhaustive: every violation is
//! returned as a [`FailureRecord`] instead of stopping at the first one.
//!
//! # Example
//!
//! ```no_run
//! use checklisttools::SubmissionValidator;
//!
//! let validator = SubmissionValidator::new();
//! let outcome = validator.validate_file("ERC000011.xml", "samples.tsv").unwrap();
//!
//! for report in outcome.reports() {
//!     if !report.is_valid() {
//!         println!("{}", report.render_text());
//!     }
//! }
//! ```

pub mod checklist;
pub mod error;
pub mod input;
pub mod report;
pub mod schema;
pub mod validation;

mod validator;

pub use checklist::{
    parse_checklist, parse_checklist_file, parse_checklist_set, Checklist, Field, FieldGroup,
    FieldKind, Mandatory,
};
pub use error::{ChecklistError, Result};
pub use input::{DataTable, ReaderConfig, SourceMetadata, SubmissionReader};
pub use report::ValidationReport;
pub use schema::{compile, ColumnConstraint, CompiledSchemas, ConstraintSet, TableKind, ValueCheck};
pub use validation::{validate, FailureReason, FailureRecord, ValidationEngine};
pub use validator::{SubmissionOutcome, SubmissionValidator, ValidatorConfig};
