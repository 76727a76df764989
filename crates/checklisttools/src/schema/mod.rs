//! Column constraints compiled from a checklist.

mod column;
mod compiler;
mod table;
mod types;

pub use column::{ColumnConstraint, ColumnMetadata};
pub use compiler::{compile, is_baseline_column, CompiledSchemas, BASELINE_COLUMNS};
pub use table::ConstraintSet;
pub use types::{Dtype, TableKind, ValueCheck};
