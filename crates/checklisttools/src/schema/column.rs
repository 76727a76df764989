//! Column constraint definition.

use serde::Serialize;

use crate::checklist::{FieldGroup, Mandatory};
use super::types::{Dtype, ValueCheck};

/// Checklist context of a column derived from a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub field_group_name: String,
    pub field_group_restriction: Option<String>,
    pub mandatory: Mandatory,
    pub multiplicity: String,
}

impl ColumnMetadata {
    pub(crate) fn new(group: &FieldGroup, mandatory: Mandatory, multiplicity: &str) -> Self {
        Self {
            field_group_name: group.name.clone(),
            field_group_restriction: group.restriction.clone(),
            mandatory,
            multiplicity: multiplicity.to_string(),
        }
    }
}

/// Validation rule for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnConstraint {
    /// Column name.
    pub name: String,
    /// Display title (the field label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected data type.
    pub dtype: Dtype,
    /// Check applied to non-null values.
    pub value_check: ValueCheck,
    /// Whether null values are allowed.
    pub nullable: bool,
    /// Whether the column must be present in the table.
    pub required: bool,
    /// Whether non-null values must be unique.
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ColumnMetadata>,
}

impl ColumnConstraint {
    /// Create a nullable, optional string column with no value check.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            dtype: Dtype::default(),
            value_check: ValueCheck::default(),
            nullable: true,
            required: false,
            unique: false,
            metadata: None,
        }
    }

    /// Mark the column as required and non-nullable, or neither.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self.nullable = !required;
        self
    }

    pub fn with_check(mut self, check: ValueCheck) -> Self {
        self.value_check = check;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: ColumnMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
