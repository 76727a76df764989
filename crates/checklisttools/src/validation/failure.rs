//! Failure records produced by the validation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a cell or column failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// A required column is absent from the table.
    MissingRequiredColumn,
    /// A non-nullable column has a null cell.
    MissingRequiredValue,
    /// A value does not conform to the column's data type.
    WrongType,
    /// A value does not match the column's pattern.
    PatternMismatch,
    /// A value is not among the column's allowed values.
    NotInAllowedValues,
    /// A value of a unique column occurs more than once.
    DuplicateValue,
}

impl FailureReason {
    /// The snake_case identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::MissingRequiredColumn => "missing_required_column",
            FailureReason::MissingRequiredValue => "missing_required_value",
            FailureReason::WrongType => "wrong_type",
            FailureReason::PatternMismatch => "pattern_mismatch",
            FailureReason::NotInAllowedValues => "not_in_allowed_values",
            FailureReason::DuplicateValue => "duplicate_value",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::MissingRequiredColumn => "Missing required column",
            FailureReason::MissingRequiredValue => "Missing required value",
            FailureReason::WrongType => "Wrong type",
            FailureReason::PatternMismatch => "Pattern mismatch",
            FailureReason::NotInAllowedValues => "Not in allowed values",
            FailureReason::DuplicateValue => "Duplicate value",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One constraint violation with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Zero-based data row; `None` for column-level failures.
    pub row: Option<usize>,
    /// Column the failure belongs to.
    pub column: String,
    /// The offending value, if there is one.
    pub value: Option<String>,
    /// What went wrong.
    pub reason: FailureReason,
    /// The constraint that failed, e.g. `isin(['female', 'male'])`.
    pub check: String,
}

impl FailureRecord {
    /// A failure for a whole column.
    pub fn column(column: impl Into<String>, reason: FailureReason, check: impl Into<String>) -> Self {
        Self {
            row: None,
            column: column.into(),
            value: None,
            reason,
            check: check.into(),
        }
    }

    /// A failure for a single cell.
    pub fn cell(
        row: usize,
        column: impl Into<String>,
        value: Option<&str>,
        reason: FailureReason,
        check: impl Into<String>,
    ) -> Self {
        Self {
            row: Some(row),
            column: column.into(),
            value: value.map(str::to_string),
            reason,
            check: check.into(),
        }
    }
}
