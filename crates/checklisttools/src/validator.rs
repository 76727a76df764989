//! Submission validator tying the pipeline together.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::checklist::{parse_checklist_file, Checklist, ChecklistSummary};
use crate::error::{ChecklistError, Result};
use crate::input::{DataTable, ReaderConfig, SourceMetadata, SubmissionReader};
use crate::report::ValidationReport;
use crate::schema::CompiledSchemas;
use crate::validation::ValidationEngine;

/// Configuration for submission validation.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// How submission files are read.
    pub reader: ReaderConfig,
}

/// Result of validating both tables of a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub checklist: ChecklistSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub units: ValidationReport,
    pub samples: ValidationReport,
}

impl SubmissionOutcome {
    pub fn has_failures(&self) -> bool {
        !self.units.is_valid() || !self.samples.is_valid()
    }

    pub fn total_failures(&self) -> usize {
        self.units.failure_count() + self.samples.failure_count()
    }

    /// Reports in output order: units first, then samples.
    pub fn reports(&self) -> [&ValidationReport; 2] {
        [&self.units, &self.samples]
    }
}

/// Validates sample submissions against checklists.
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    reader: SubmissionReader,
    engine: ValidationEngine,
}

impl SubmissionValidator {
    /// Create a validator with default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            reader: SubmissionReader::with_config(config.reader),
            engine: ValidationEngine::new(),
        }
    }

    /// Parse a checklist file.
    pub fn load_checklist(&self, path: impl AsRef<Path>) -> Result<Checklist> {
        let path = path.as_ref();
        let checklist = parse_checklist_file(path)?;
        info!(
            path = %path.display(),
            checklist = %checklist.primary_id,
            fields = checklist.field_count(),
            "loaded checklist"
        );
        Ok(checklist)
    }

    /// Validate a submission file against a checklist file.
    pub fn validate_file(
        &self,
        checklist_path: impl AsRef<Path>,
        samples_path: impl AsRef<Path>,
    ) -> Result<SubmissionOutcome> {
        let samples_path = samples_path.as_ref();

        // Both inputs must exist before anything is parsed
        if !samples_path.is_file() {
            return Err(ChecklistError::MissingInputFile {
                path: samples_path.to_path_buf(),
            });
        }
        let checklist = self.load_checklist(checklist_path)?;

        let (submission, source) = self.reader.read_file(samples_path)?;
        info!(
            path = %samples_path.display(),
            samples = source.row_count,
            "read submission"
        );

        let mut outcome = self.validate_tables(&checklist, &submission.units, &submission.samples);
        outcome.source = Some(source);
        Ok(outcome)
    }

    /// Validate already loaded tables against a checklist.
    pub fn validate_tables(
        &self,
        checklist: &Checklist,
        units: &DataTable,
        samples: &DataTable,
    ) -> SubmissionOutcome {
        let CompiledSchemas {
            units: units_constraints,
            samples: samples_constraints,
        } = checklist.to_constraint_sets();

        let units_failures = self.engine.validate(&units_constraints, units);
        let samples_failures = self.engine.validate(&samples_constraints, samples);

        let outcome = SubmissionOutcome {
            checklist: checklist.summary(),
            source: None,
            units: ValidationReport::new(&units_constraints, units_failures),
            samples: ValidationReport::new(&samples_constraints, samples_failures),
        };
        debug!(
            units_failures = outcome.units.failure_count(),
            samples_failures = outcome.samples.failure_count(),
            "validated submission"
        );
        outcome
    }
}
