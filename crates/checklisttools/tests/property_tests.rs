//! Property-based tests for the constraint compiler and validation engine.
//!
//! These tests verify:
//! 1. **Determinism**: compiling or validating twice gives the same result
//! 2. **Exhaustiveness**: every independent violation is reported exactly once
//! 3. **Nullability**: only mandatory fields are non-nullable

use proptest::prelude::*;

use checklisttools::checklist::{Checklist, Field, FieldGroup, FieldKind, Mandatory};
use checklisttools::{compile, validate, DataTable, FailureReason};

// =============================================================================
// Test Strategies
// =============================================================================

fn mandatory() -> impl Strategy<Value = Mandatory> {
    prop_oneof![
        Just(Mandatory::Mandatory),
        Just(Mandatory::Recommended),
        Just(Mandatory::Optional),
    ]
}

fn field_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Text { regex_value: None }),
        prop::collection::vec("[a-z]{1,8}", 1..5).prop_map(|values| FieldKind::TextChoice {
            text_choice_values: values,
        }),
    ]
}

fn field(index: usize) -> impl Strategy<Value = Field> {
    (
        mandatory(),
        field_kind(),
        prop::collection::vec(prop_oneof![Just("m"), Just("cm"), Just("km")], 0..3),
    )
        .prop_map(move |(mandatory, kind, units)| Field {
            name: format!("field_{}", index),
            label: format!("field {}", index),
            description: String::new(),
            synonyms: Vec::new(),
            mandatory,
            multiplicity: "single".to_string(),
            units: units.into_iter().map(String::from).collect(),
            kind,
        })
}

fn checklist() -> impl Strategy<Value = Checklist> {
    (0usize..8)
        .prop_flat_map(|count| (0..count).map(field).collect::<Vec<_>>())
        .prop_map(|fields| Checklist {
            accession: "ERC000000".to_string(),
            checklist_type: "Sample".to_string(),
            primary_id: "ERC000000".to_string(),
            label: "generated".to_string(),
            name: "generated".to_string(),
            description: String::new(),
            authority: "test".to_string(),
            field_groups: vec![FieldGroup {
                name: "group".to_string(),
                restriction: None,
                fields,
            }],
        })
}

const ENUM_COLUMN: &str = "colour";

fn enum_checklist() -> Checklist {
    Checklist {
        accession: "ERC000000".to_string(),
        checklist_type: "Sample".to_string(),
        primary_id: "ERC000000".to_string(),
        label: "colours".to_string(),
        name: "colours".to_string(),
        description: String::new(),
        authority: "test".to_string(),
        field_groups: vec![FieldGroup {
            name: "group".to_string(),
            restriction: None,
            fields: vec![Field {
                name: ENUM_COLUMN.to_string(),
                label: ENUM_COLUMN.to_string(),
                description: String::new(),
                synonyms: Vec::new(),
                mandatory: Mandatory::Mandatory,
                multiplicity: "single".to_string(),
                units: Vec::new(),
                kind: FieldKind::TextChoice {
                    text_choice_values: vec!["red".to_string(), "blue".to_string()],
                },
            }],
        }],
    }
}

/// A samples table where each row is either valid or has a bad colour.
fn samples_table(bad_rows: &[bool]) -> DataTable {
    let headers = vec![
        "tax_id",
        "scientific_name",
        "sample_alias",
        "sample_title",
        "sample_description",
        ENUM_COLUMN,
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let rows = bad_rows
        .iter()
        .enumerate()
        .map(|(i, &bad)| {
            vec![
                Some("9606".to_string()),
                Some("Homo sapiens".to_string()),
                Some(format!("S{}", i)),
                Some("title".to_string()),
                Some("description".to_string()),
                Some(if bad { "green" } else { "red" }.to_string()),
            ]
        })
        .collect();

    DataTable::new(headers, rows)
}

// =============================================================================
// Compiler Properties
// =============================================================================

proptest! {
    #[test]
    fn compile_is_deterministic(checklist in checklist()) {
        prop_assert_eq!(compile(&checklist), compile(&checklist));
    }

    #[test]
    fn nullable_follows_mandatory(checklist in checklist()) {
        let schemas = compile(&checklist);
        for field in checklist.fields() {
            let column = schemas.samples.get_column(&field.name).unwrap();
            prop_assert_eq!(column.required, field.mandatory == Mandatory::Mandatory);
            prop_assert_eq!(column.nullable, field.mandatory != Mandatory::Mandatory);
        }
    }

    #[test]
    fn units_only_for_unit_fields(checklist in checklist()) {
        let schemas = compile(&checklist);
        for field in checklist.fields() {
            prop_assert_eq!(schemas.units.contains(&field.name), !field.units.is_empty());
        }
        prop_assert!(schemas.units.column_count() <= checklist.field_count());
    }

    // =========================================================================
    // Engine Properties
    // =========================================================================

    #[test]
    fn every_violation_reported_once(bad_rows in prop::collection::vec(any::<bool>(), 0..50)) {
        let schemas = compile(&enum_checklist());
        let table = samples_table(&bad_rows);

        let failures = validate(&schemas.samples, &table);
        let expected: Vec<usize> = bad_rows
            .iter()
            .enumerate()
            .filter(|(_, bad)| **bad)
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(failures.len(), expected.len());
        for (failure, row) in failures.iter().zip(expected) {
            prop_assert_eq!(failure.row, Some(row));
            prop_assert_eq!(failure.reason, FailureReason::NotInAllowedValues);
            prop_assert_eq!(failure.column.as_str(), ENUM_COLUMN);
        }
    }

    #[test]
    fn validate_is_deterministic(bad_rows in prop::collection::vec(any::<bool>(), 0..30)) {
        let schemas = compile(&enum_checklist());
        let table = samples_table(&bad_rows);
        prop_assert_eq!(validate(&schemas.samples, &table), validate(&schemas.samples, &table));
    }

    #[test]
    fn validate_never_panics(cells in prop::collection::vec("[a-z0-9]{0,5}", 0..60)) {
        let schemas = compile(&enum_checklist());
        let rows: Vec<Vec<Option<String>>> = cells
            .chunks(6)
            .map(|chunk| chunk.iter().map(|c| (!c.is_empty()).then(|| c.clone())).collect())
            .collect();
        let headers = schemas.samples.column_names().into_iter().map(String::from).collect();
        let table = DataTable::new(headers, rows);
        let _ = validate(&schemas.samples, &table);
    }
}
