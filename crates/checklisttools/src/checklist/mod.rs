//! Checklist model and XML parsing.

mod field;
mod model;
mod parser;

pub use field::{Field, FieldKind, FieldPattern, Mandatory};
pub use model::{Checklist, ChecklistSummary, FieldGroup};
pub use parser::{parse_checklist, parse_checklist_file, parse_checklist_set};
