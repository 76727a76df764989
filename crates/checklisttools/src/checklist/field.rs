//! Field definitions declared by a checklist.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ChecklistError, Result};

/// Requirement level of a checklist field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mandatory {
    /// Must be provided.
    Mandatory,
    /// Should be provided, but may be left empty.
    Recommended,
    /// May be provided.
    Optional,
}

impl Mandatory {
    /// Parse the checklist vocabulary (`mandatory`, `recommended`, `optional`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "mandatory" => Some(Mandatory::Mandatory),
            "recommended" => Some(Mandatory::Recommended),
            "optional" => Some(Mandatory::Optional),
            _ => None,
        }
    }

    /// The checklist spelling of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mandatory::Mandatory => "mandatory",
            Mandatory::Recommended => "recommended",
            Mandatory::Optional => "optional",
        }
    }

    /// Only mandatory fields are required; recommended and optional fields may be empty.
    pub fn is_required(&self) -> bool {
        matches!(self, Mandatory::Mandatory)
    }
}

impl fmt::Display for Mandatory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regular expression declared by a text field.
///
/// Keeps the checklist's source text next to the compiled expression. A value
/// matches when the expression matches at the start of the value.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a checklist pattern.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Regex::new(&format!(r"\A(?:{})", source)).map_err(|e| {
            ChecklistError::malformed(format!("invalid regular expression '{}': {}", source, e))
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the checklist.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check a value against the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FieldPattern {}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Type-specific part of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, optionally restricted by a pattern.
    Text { regex_value: Option<FieldPattern> },
    /// One of an enumerated set of values.
    TextChoice { text_choice_values: Vec<String> },
}

/// A single field of a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name; also the column name in submitted tables.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Description of the field.
    pub description: String,
    /// Alternative names, in declaration order.
    pub synonyms: Vec<String>,
    /// Requirement level.
    pub mandatory: Mandatory,
    /// Cardinality, e.g. "single" or "multiple".
    pub multiplicity: String,
    /// Permitted units, in declaration order.
    pub units: Vec<String>,
    /// Text or text-choice specifics.
    pub kind: FieldKind,
}

impl Field {
    /// Whether values of this field are required.
    pub fn is_required(&self) -> bool {
        self.mandatory.is_required()
    }

    /// Whether the field declares any units.
    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// The regex of a text field, if any.
    pub fn regex_value(&self) -> Option<&FieldPattern> {
        match &self.kind {
            FieldKind::Text { regex_value } => regex_value.as_ref(),
            FieldKind::TextChoice { .. } => None,
        }
    }

    /// The allowed values of a text-choice field, if any.
    pub fn text_choice_values(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::TextChoice { text_choice_values } => Some(text_choice_values),
            FieldKind::Text { .. } => None,
        }
    }
}
