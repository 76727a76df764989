//! Validation reports: text rendering and failure tables.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{ChecklistError, Result};
use crate::schema::{ConstraintSet, TableKind};
use crate::validation::{FailureReason, FailureRecord};

/// Failures of one table together with the context needed to report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub table: TableKind,
    pub checklist_name: String,
    pub checklist_id: String,
    pub failures: Vec<FailureRecord>,
}

/// One line of the failure table.
#[derive(Serialize)]
struct FailureRow<'a> {
    table: &'static str,
    row: Option<usize>,
    column: &'a str,
    value: Option<&'a str>,
    reason: &'static str,
    check: &'a str,
}

impl ValidationReport {
    /// Build a report from the constraint set a table was validated against.
    pub fn new(constraints: &ConstraintSet, failures: Vec<FailureRecord>) -> Self {
        Self {
            table: constraints.table,
            checklist_name: constraints.checklist_name.clone(),
            checklist_id: constraints.checklist_id.clone(),
            failures,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Count failures per reason.
    pub fn counts_by_reason(&self) -> BTreeMap<FailureReason, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.reason).or_insert(0) += 1;
        }
        counts
    }

    /// Title line, e.g. `VALIDATION ERRORS -- SAMPLES`.
    pub fn title(&self) -> String {
        format!("VALIDATION ERRORS -- {}", self.table.name().to_uppercase())
    }

    /// Title, underline and checklist line.
    pub fn header(&self) -> String {
        let title = self.title();
        format!(
            "{}\n{}\n\nChecklist: {} ({})",
            title,
            "=".repeat(title.len()),
            self.checklist_name,
            self.checklist_id
        )
    }

    /// Render the report as plain text, failures grouped by reason.
    pub fn render_text(&self) -> String {
        format!("{}\n\n{}", self.header(), self.render_details())
    }

    /// The failure count and the failures grouped by reason, without header.
    pub fn render_details(&self) -> String {
        let mut out = format!("A total of {} errors were found.\n", self.failure_count());

        for (reason, count) in self.counts_by_reason() {
            out.push_str(&format!("\n{}: {}\n", reason, count));
            for failure in self.failures.iter().filter(|f| f.reason == reason) {
                out.push_str(&format!("    {}\n", describe(failure)));
            }
        }
        out
    }

    /// Write the failures as a tab-delimited table.
    pub fn write_tsv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        for failure in &self.failures {
            writer.serialize(FailureRow {
                table: self.table.name(),
                row: failure.row,
                column: &failure.column,
                value: failure.value.as_deref(),
                reason: failure.reason.as_str(),
                check: &failure.check,
            })?;
        }
        writer
            .flush()
            .map_err(|e| ChecklistError::Csv(csv::Error::from(e)))?;
        Ok(())
    }

    /// Write the failures as a tab-delimited file.
    pub fn write_tsv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        create_parent_dir(path)?;
        let file = File::create(path).map_err(|e| ChecklistError::io(path, e))?;
        self.write_tsv_to(BufWriter::new(file))
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn describe(failure: &FailureRecord) -> String {
    let location = match failure.row {
        Some(row) => format!("row {}, column '{}'", row, failure.column),
        None => format!("column '{}'", failure.column),
    };
    match &failure.value {
        Some(value) => format!("{}: '{}' ({})", location, value, failure.check),
        None => format!("{} ({})", location, failure.check),
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ChecklistError::io(parent, e))?;
        }
    }
    Ok(())
}
