//! Core type definitions for column constraints.

use std::fmt;

use serde::Serialize;

use crate::checklist::FieldPattern;

/// Expected data type of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dtype {
    /// Text values. Every cell of a submission is read as text.
    #[default]
    String,
}

impl Dtype {
    /// Check whether a non-null value conforms to this type.
    pub fn accepts(&self, _value: &str) -> bool {
        match self {
            Dtype::String => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::String => "str",
        }
    }
}

/// A check applied to every non-null value of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ValueCheck {
    /// No value check.
    #[default]
    None,
    /// Values must match a pattern.
    Pattern(FieldPattern),
    /// Values must be one of an enumerated set.
    Enum(Vec<String>),
}

impl ValueCheck {
    /// Whether a value passes this check.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ValueCheck::None => true,
            ValueCheck::Pattern(pattern) => pattern.is_match(value),
            ValueCheck::Enum(values) => values.iter().any(|v| v == value),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ValueCheck::None)
    }
}

impl fmt::Display for ValueCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueCheck::None => f.write_str("none"),
            ValueCheck::Pattern(pattern) => write!(f, "str_matches('{}')", pattern),
            ValueCheck::Enum(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
                write!(f, "isin([{}])", quoted.join(", "))
            }
        }
    }
}

/// Which table of a submission a constraint set applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// The primary table, one row per sample.
    Samples,
    /// The units declared for unit-bearing fields.
    Units,
}

impl TableKind {
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Samples => "samples",
            TableKind::Units => "units",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
