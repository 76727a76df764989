//! Validation engine applying a constraint set to a table.
//!
//! The engine never stops at the first violation: every declared column is
//! checked against every row, and all failures are returned. Failures are
//! ordered with column-level failures first, then row by row in column
//! declaration order.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::input::DataTable;
use crate::schema::{ColumnConstraint, ConstraintSet, ValueCheck};

use super::failure::{FailureReason, FailureRecord};

const CHECK_COLUMN_PRESENT: &str = "column_in_table";
const CHECK_NOT_NULLABLE: &str = "not_nullable";
const CHECK_UNIQUE: &str = "unique";

/// Validate a table against a constraint set. See [`ValidationEngine::validate`].
pub fn validate(constraints: &ConstraintSet, table: &DataTable) -> Vec<FailureRecord> {
    ValidationEngine::new().validate(constraints, table)
}

/// A declared column found in the table.
struct PresentColumn<'a> {
    constraint: &'a ColumnConstraint,
    index: usize,
    /// Rows holding a repeated value of a unique column.
    duplicate_rows: HashSet<usize>,
}

/// Runs constraint checks over tables.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Check every row and column of `table` and collect all failures.
    ///
    /// Columns not declared in `constraints` are ignored. A missing required
    /// column yields one failure and no per-cell checks.
    pub fn validate(&self, constraints: &ConstraintSet, table: &DataTable) -> Vec<FailureRecord> {
        let mut failures = Vec::new();
        let mut present = Vec::new();

        for constraint in constraints.columns.values() {
            match table.column_index(&constraint.name) {
                Some(index) => present.push(PresentColumn {
                    constraint,
                    index,
                    duplicate_rows: if constraint.unique {
                        duplicate_rows(table, index)
                    } else {
                        HashSet::new()
                    },
                }),
                None if constraint.required => failures.push(FailureRecord::column(
                    &constraint.name,
                    FailureReason::MissingRequiredColumn,
                    CHECK_COLUMN_PRESENT,
                )),
                None => {}
            }
        }

        for row in 0..table.row_count() {
            for column in &present {
                let value = table.get(row, column.index);
                self.check_cell(column.constraint, row, value, &mut failures);

                if column.duplicate_rows.contains(&row) {
                    failures.push(FailureRecord::cell(
                        row,
                        &column.constraint.name,
                        value,
                        FailureReason::DuplicateValue,
                        CHECK_UNIQUE,
                    ));
                }
            }
        }

        for failure in &failures {
            trace!(
                table = %constraints.table,
                row = ?failure.row,
                column = %failure.column,
                reason = %failure.reason,
                "validation failure"
            );
        }
        debug!(
            table = %constraints.table,
            rows = table.row_count(),
            columns = constraints.column_count(),
            failures = failures.len(),
            "validated table"
        );

        failures
    }

    fn check_cell(
        &self,
        constraint: &ColumnConstraint,
        row: usize,
        value: Option<&str>,
        failures: &mut Vec<FailureRecord>,
    ) {
        let Some(value) = value else {
            if !constraint.nullable {
                failures.push(FailureRecord::cell(
                    row,
                    &constraint.name,
                    None,
                    FailureReason::MissingRequiredValue,
                    CHECK_NOT_NULLABLE,
                ));
            }
            return;
        };

        if !constraint.dtype.accepts(value) {
            failures.push(FailureRecord::cell(
                row,
                &constraint.name,
                Some(value),
                FailureReason::WrongType,
                format!("dtype('{}')", constraint.dtype.as_str()),
            ));
            return;
        }

        if !constraint.value_check.accepts(value) {
            let reason = match constraint.value_check {
                ValueCheck::Pattern(_) => FailureReason::PatternMismatch,
                ValueCheck::Enum(_) => FailureReason::NotInAllowedValues,
                ValueCheck::None => return,
            };
            failures.push(FailureRecord::cell(
                row,
                &constraint.name,
                Some(value),
                reason,
                constraint.value_check.to_string(),
            ));
        }
    }
}

/// Rows whose non-null value already appeared in an earlier row.
fn duplicate_rows(table: &DataTable, index: usize) -> HashSet<usize> {
    let mut seen = HashSet::new();
    table
        .column_values(index)
        .enumerate()
        .filter_map(|(row, value)| match value {
            Some(value) if !seen.insert(value) => Some(row),
            _ => None,
        })
        .collect()
}
