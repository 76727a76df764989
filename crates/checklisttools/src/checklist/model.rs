//! Checklist and field group containers.

use serde::Serialize;

use super::field::Field;

/// A named group of fields within a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldGroup {
    /// Group name.
    pub name: String,
    /// The group's `restrictionType` attribute, if present.
    pub restriction: Option<String>,
    /// Member fields, in declaration order.
    pub fields: Vec<Field>,
}

/// A parsed sample checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checklist {
    pub accession: String,
    pub checklist_type: String,
    pub primary_id: String,
    pub label: String,
    pub name: String,
    pub description: String,
    pub authority: String,
    /// Field groups, in declaration order.
    pub field_groups: Vec<FieldGroup>,
}

impl Checklist {
    /// Iterate over every field, group by group.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.field_groups.iter().flat_map(|g| g.fields.iter())
    }

    /// Iterate over every field together with its group.
    pub fn grouped_fields(&self) -> impl Iterator<Item = (&FieldGroup, &Field)> {
        self.field_groups
            .iter()
            .flat_map(|g| g.fields.iter().map(move |f| (g, f)))
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name == name)
    }

    /// Total number of fields across all groups.
    pub fn field_count(&self) -> usize {
        self.field_groups.iter().map(|g| g.fields.len()).sum()
    }

    /// Short identification used in report headers.
    pub fn summary(&self) -> ChecklistSummary {
        ChecklistSummary {
            accession: self.accession.clone(),
            primary_id: self.primary_id.clone(),
            name: self.name.clone(),
            field_count: self.field_count(),
        }
    }
}

/// Identifying details of a checklist, without its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub accession: String,
    pub primary_id: String,
    pub name: String,
    pub field_count: usize,
}
