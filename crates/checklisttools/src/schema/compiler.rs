//! Compile a checklist into column constraints for the units and samples tables.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::checklist::{Checklist, Field, FieldGroup, FieldKind, FieldPattern};
use super::column::{ColumnConstraint, ColumnMetadata};
use super::table::ConstraintSet;
use super::types::{TableKind, ValueCheck};

/// Columns every samples table must carry, whatever the checklist.
pub const BASELINE_COLUMNS: [&str; 5] = [
    "tax_id",
    "scientific_name",
    "sample_alias",
    "sample_title",
    "sample_description",
];

static TAX_ID_PATTERN: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new(r"^\d+$").expect("tax_id pattern is valid"));

/// The two constraint sets derived from one checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledSchemas {
    pub units: ConstraintSet,
    pub samples: ConstraintSet,
}

/// Derive the units and samples constraint sets from a checklist.
///
/// Baseline columns come first in the samples set and take precedence over
/// checklist fields of the same name.
pub fn compile(checklist: &Checklist) -> CompiledSchemas {
    let mut units = ConstraintSet::new(TableKind::Units, &checklist.name, &checklist.primary_id);
    let mut samples =
        ConstraintSet::new(TableKind::Samples, &checklist.name, &checklist.primary_id);

    for column in baseline_columns() {
        samples.insert(column);
    }

    for (group, field) in checklist.grouped_fields() {
        if let Some(column) = units_column(group, field) {
            units.insert(column);
        }
        if is_baseline_column(&field.name) {
            debug!(field = %field.name, "checklist field overridden by baseline column");
            continue;
        }
        samples.insert(samples_column(group, field));
    }

    debug!(
        checklist = %checklist.primary_id,
        units_columns = units.column_count(),
        samples_columns = samples.column_count(),
        "compiled constraint sets"
    );

    CompiledSchemas { units, samples }
}

impl Checklist {
    /// Derive the units and samples constraint sets. See [`compile`].
    pub fn to_constraint_sets(&self) -> CompiledSchemas {
        compile(self)
    }
}

/// Check if a column name is one of the fixed baseline columns.
pub fn is_baseline_column(name: &str) -> bool {
    BASELINE_COLUMNS.contains(&name)
}

fn baseline_columns() -> Vec<ColumnConstraint> {
    BASELINE_COLUMNS
        .iter()
        .map(|&name| {
            let column = ColumnConstraint::new(name).with_required(true);
            match name {
                "tax_id" => column.with_check(ValueCheck::Pattern(TAX_ID_PATTERN.clone())),
                "sample_alias" => column.with_unique(true),
                _ => column,
            }
        })
        .collect()
}

fn samples_column(group: &FieldGroup, field: &Field) -> ColumnConstraint {
    let check = match &field.kind {
        FieldKind::Text {
            regex_value: Some(pattern),
        } => ValueCheck::Pattern(pattern.clone()),
        FieldKind::Text { regex_value: None } => ValueCheck::None,
        FieldKind::TextChoice { text_choice_values } => {
            ValueCheck::Enum(text_choice_values.clone())
        }
    };

    field_column(group, field)
        .with_check(check)
        .with_required(field.is_required())
}

/// Unit columns are only emitted for fields that declare units.
fn units_column(group: &FieldGroup, field: &Field) -> Option<ColumnConstraint> {
    if !field.has_units() {
        return None;
    }

    let mut units: Vec<String> = Vec::with_capacity(field.units.len());
    for unit in &field.units {
        if !units.contains(unit) {
            units.push(unit.clone());
        }
    }

    Some(
        field_column(group, field)
            .with_check(ValueCheck::Enum(units))
            .with_required(field.is_required() && field.has_units()),
    )
}

fn field_column(group: &FieldGroup, field: &Field) -> ColumnConstraint {
    ColumnConstraint::new(&field.name)
        .with_title(&field.label)
        .with_description(&field.description)
        .with_metadata(ColumnMetadata::new(group, field.mandatory, &field.multiplicity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Mandatory;

    fn field(name: &str, mandatory: Mandatory, units: &[&str], kind: FieldKind) -> Field {
        Field {
            name: name.to_string(),
            label: name.to_string(),
            description: format!("{} description", name),
            synonyms: Vec::new(),
            mandatory,
            multiplicity: "single".to_string(),
            units: units.iter().map(|u| u.to_string()).collect(),
            kind,
        }
    }

    fn checklist(fields: Vec<Field>) -> Checklist {
        Checklist {
            accession: "ERC000011".to_string(),
            checklist_type: "Sample".to_string(),
            primary_id: "ERC000011".to_string(),
            label: "default".to_string(),
            name: "ENA default sample checklist".to_string(),
            description: String::new(),
            authority: "ENA".to_string(),
            field_groups: vec![FieldGroup {
                name: "Collection event information".to_string(),
                restriction: Some("Any number or none of the fields".to_string()),
                fields,
            }],
        }
    }

    fn text() -> FieldKind {
        FieldKind::Text { regex_value: None }
    }

    #[test]
    fn test_baseline_columns_first() {
        let schemas = compile(&checklist(vec![field("altitude", Mandatory::Optional, &[], text())]));
        assert_eq!(
            schemas.samples.column_names(),
            vec![
                "tax_id",
                "scientific_name",
                "sample_alias",
                "sample_title",
                "sample_description",
                "altitude"
            ]
        );
        for name in BASELINE_COLUMNS {
            let column = schemas.samples.get_column(name).unwrap();
            assert!(column.required);
            assert!(!column.nullable);
            assert!(column.metadata.is_none());
        }
        assert!(schemas.samples.get_column("sample_alias").unwrap().unique);
        assert_eq!(
            schemas.samples.get_column("tax_id").unwrap().value_check.to_string(),
            r"str_matches('^\d+$')"
        );
    }

    #[test]
    fn test_required_follows_mandatory() {
        let schemas = compile(&checklist(vec![
            field("a", Mandatory::Mandatory, &[], text()),
            field("b", Mandatory::Recommended, &[], text()),
            field("c", Mandatory::Optional, &[], text()),
        ]));
        let a = schemas.samples.get_column("a").unwrap();
        assert!(a.required && !a.nullable);
        for name in ["b", "c"] {
            let column = schemas.samples.get_column(name).unwrap();
            assert!(!column.required && column.nullable);
        }
    }

    #[test]
    fn test_text_choice_becomes_enum() {
        let kind = FieldKind::TextChoice {
            text_choice_values: vec!["female".to_string(), "male".to_string()],
        };
        let schemas = compile(&checklist(vec![field("host sex", Mandatory::Mandatory, &[], kind)]));
        let column = schemas.samples.get_column("host sex").unwrap();
        assert_eq!(
            column.value_check,
            ValueCheck::Enum(vec!["female".to_string(), "male".to_string()])
        );
        assert_eq!(column.title.as_deref(), Some("host sex"));
        let metadata = column.metadata.as_ref().unwrap();
        assert_eq!(metadata.field_group_name, "Collection event information");
        assert_eq!(metadata.mandatory, Mandatory::Mandatory);
    }

    #[test]
    fn test_units_only_for_unit_fields() {
        let schemas = compile(&checklist(vec![
            field("altitude", Mandatory::Mandatory, &["m", "km", "m"], text()),
            field("depth", Mandatory::Optional, &["m"], text()),
            field("host sex", Mandatory::Mandatory, &[], text()),
        ]));
        assert_eq!(schemas.units.column_names(), vec!["altitude", "depth"]);
        assert_eq!(schemas.units.table, TableKind::Units);

        let altitude = schemas.units.get_column("altitude").unwrap();
        assert_eq!(
            altitude.value_check,
            ValueCheck::Enum(vec!["m".to_string(), "km".to_string()])
        );
        assert!(altitude.required && !altitude.nullable);

        let depth = schemas.units.get_column("depth").unwrap();
        assert!(!depth.required && depth.nullable);
    }

    #[test]
    fn test_baseline_wins_over_checklist_field() {
        let schemas = compile(&checklist(vec![field(
            "sample_alias",
            Mandatory::Optional,
            &[],
            text(),
        )]));
        let alias = schemas.samples.get_column("sample_alias").unwrap();
        assert!(alias.required);
        assert!(alias.unique);
        assert!(!alias.nullable);
        assert_eq!(schemas.samples.column_count(), BASELINE_COLUMNS.len());
    }

    #[test]
    fn test_checklist_metadata_carried() {
        let schemas = compile(&checklist(Vec::new()));
        assert_eq!(schemas.samples.checklist_name, "ENA default sample checklist");
        assert_eq!(schemas.units.checklist_id, "ERC000011");
        assert!(schemas.units.is_empty());
    }
}
