//! Table-level constraint set.

use indexmap::IndexMap;
use serde::Serialize;

use super::column::ColumnConstraint;
use super::types::TableKind;

/// Column constraints for one table of a submission.
///
/// Columns keep their declaration order, which is also the order in which
/// failures are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSet {
    /// The table these constraints apply to.
    pub table: TableKind,
    /// Name of the checklist the constraints were compiled from.
    pub checklist_name: String,
    /// Primary identifier of that checklist.
    pub checklist_id: String,
    /// Constraints keyed by column name.
    pub columns: IndexMap<String, ColumnConstraint>,
}

impl ConstraintSet {
    /// Create an empty constraint set.
    pub fn new(
        table: TableKind,
        checklist_name: impl Into<String>,
        checklist_id: impl Into<String>,
    ) -> Self {
        Self {
            table,
            checklist_name: checklist_name.into(),
            checklist_id: checklist_id.into(),
            columns: IndexMap::new(),
        }
    }

    /// Add a column, replacing any previous constraint of the same name in place.
    pub fn insert(&mut self, column: ColumnConstraint) {
        self.columns.insert(column.name.clone(), column);
    }

    /// Get a column constraint by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnConstraint> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get all column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
