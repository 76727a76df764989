//! Reader for tab-delimited sample submissions.
//!
//! A submission file has a header line, an optional units line starting with
//! a marker token (`#units` by default), and one line per sample. The units
//! line becomes the single row of the units table; the remaining lines make up
//! the samples table. Both tables share the header. Without a units line the
//! units table holds one all-null row, so required units are still reported.

use std::fs;
use std::path::Path;

use csv::StringRecord;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ChecklistError, Result};
use super::source::{DataTable, SourceMetadata};

/// Default marker at the start of the units line.
pub const DEFAULT_UNITS_MARKER: &str = "#units";

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Token that marks the units line.
    pub units_marker: String,
    /// Cell values read as null in addition to the empty string.
    pub null_values: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            quote: b'"',
            units_marker: DEFAULT_UNITS_MARKER.to_string(),
            null_values: Vec::new(),
        }
    }
}

/// The two tables of a submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Units declared for unit-bearing fields; exactly one row.
    pub units: DataTable,
    /// One row per sample.
    pub samples: DataTable,
    units_line: bool,
}

impl Submission {
    /// Whether the file carried a units line.
    pub fn has_units_line(&self) -> bool {
        self.units_line
    }
}

/// Reads submission files.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReader {
    config: ReaderConfig,
}

impl SubmissionReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a submission file and return its tables and metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(Submission, SourceMetadata)> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ChecklistError::MissingInputFile {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read(path).map_err(|e| ChecklistError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let submission = self.read_bytes(&contents)?;
        debug!(
            path = %path.display(),
            rows = submission.samples.row_count(),
            columns = submission.samples.column_count(),
            units_line = submission.has_units_line(),
            "read submission"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            submission.samples.row_count(),
            submission.samples.column_count(),
            submission.has_units_line(),
        );

        Ok((submission, metadata))
    }

    /// Split submission bytes into the units and samples tables.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Submission> {
        let mut records = self.records(bytes);

        let headers = self.read_headers(&mut records)?;

        let mut units_row = None;
        let mut sample_rows = Vec::new();

        for (index, result) in records.enumerate() {
            let record = result?;
            if index == 0 {
                units_row = self.units_row(&record, headers.len());
                if units_row.is_some() {
                    continue;
                }
            }
            sample_rows.push(self.row(record.iter(), headers.len()));
        }

        let units_line = units_row.is_some();
        let units_row = units_row.unwrap_or_else(|| vec![None; headers.len()]);

        Ok(Submission {
            units: DataTable::new(headers.clone(), vec![units_row]),
            samples: DataTable::new(headers, sample_rows),
            units_line,
        })
    }

    /// Parse a plain table with a single header line.
    pub fn read_table(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut records = self.records(bytes);
        let headers = self.read_headers(&mut records)?;
        let rows = records
            .map(|result| result.map(|record| self.row(record.iter(), headers.len())))
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
        Ok(DataTable::new(headers, rows))
    }

    fn records<'a>(&self, bytes: &'a [u8]) -> csv::StringRecordsIntoIter<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .into_records()
    }

    fn read_headers(
        &self,
        records: &mut csv::StringRecordsIntoIter<&[u8]>,
    ) -> Result<Vec<String>> {
        let header = match records.next() {
            Some(result) => result?,
            None => return Err(ChecklistError::EmptyData("No header row found".to_string())),
        };
        let headers: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ChecklistError::EmptyData("No columns found".to_string()));
        }
        Ok(headers)
    }

    /// Strip the marker from a units line; `None` if the record is not one.
    fn units_row(&self, record: &StringRecord, width: usize) -> Option<Vec<Option<String>>> {
        let first = record.get(0)?;
        let stripped = first.strip_prefix(self.config.units_marker.as_str())?;
        let cells = std::iter::once(stripped).chain(record.iter().skip(1));
        Some(self.row(cells, width))
    }

    fn row<'r>(&self, cells: impl Iterator<Item = &'r str>, width: usize) -> Vec<Option<String>> {
        let mut row: Vec<Option<String>> = cells.map(|cell| self.cell(cell)).collect();

        // Pad short rows, truncate long ones
        row.resize(width, None);
        row
    }

    /// Blank cells and null tokens read as null; surrounding whitespace is ignored.
    fn cell(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || self.config.null_values.iter().any(|n| n == trimmed) {
            None
        } else {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_line_is_split_off() {
        let data = b"sample_alias\taltitude\n#units\tm\nS1\t100\nS2\t\n";
        let submission = SubmissionReader::new().read_bytes(data).unwrap();

        assert_eq!(submission.units.headers, vec!["sample_alias", "altitude"]);
        assert_eq!(submission.units.row_count(), 1);
        assert_eq!(submission.units.get(0, 0), None);
        assert_eq!(submission.units.get(0, 1), Some("m"));

        assert_eq!(submission.samples.row_count(), 2);
        assert_eq!(submission.samples.get(0, 0), Some("S1"));
        assert_eq!(submission.samples.get(1, 1), None);
    }

    #[test]
    fn test_missing_units_line() {
        let data = b"sample_alias\taltitude\nS1\t100\n";
        let submission = SubmissionReader::new().read_bytes(data).unwrap();
        assert!(!submission.has_units_line());
        assert_eq!(submission.units.headers.len(), 2);
        assert_eq!(submission.units.rows, vec![vec![None, None]]);
        assert_eq!(submission.samples.row_count(), 1);
        assert_eq!(submission.samples.get(0, 0), Some("S1"));
    }

    #[test]
    fn test_marker_only_checked_on_second_line() {
        let data = b"a\tb\n1\t2\n#units\tm\n";
        let submission = SubmissionReader::new().read_bytes(data).unwrap();
        assert!(!submission.has_units_line());
        assert_eq!(submission.samples.get(1, 0), Some("#units"));
    }

    #[test]
    fn test_short_and_long_rows() {
        let data = b"a\tb\tc\n1\n1\t2\t3\t4\n";
        let table = SubmissionReader::new().read_table(data).unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_configured_null_values() {
        let config = ReaderConfig {
            null_values: vec!["NA".to_string()],
            ..Default::default()
        };
        let table = SubmissionReader::with_config(config)
            .read_table(b"a\tb\nNA\tna\n")
            .unwrap();
        assert_eq!(table.get(0, 0), None);
        assert_eq!(table.get(0, 1), Some("na"));
    }

    #[test]
    fn test_blank_cells_are_null() {
        let config = ReaderConfig {
            null_values: vec!["NA".to_string()],
            ..Default::default()
        };
        let table = SubmissionReader::with_config(config)
            .read_table(b"a\tb\tc\n   \t NA \t x \n")
            .unwrap();
        assert_eq!(table.get(0, 0), None);
        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.get(0, 2), Some(" x "));
    }

    #[test]
    fn test_custom_marker() {
        let config = ReaderConfig {
            units_marker: "UNITS:".to_string(),
            ..Default::default()
        };
        let submission = SubmissionReader::with_config(config)
            .read_bytes(b"a\tb\nUNITS:cm\tkg\n")
            .unwrap();
        assert_eq!(submission.units.get(0, 0), Some("cm"));
        assert_eq!(submission.units.get(0, 1), Some("kg"));
        assert_eq!(submission.samples.row_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        let err = SubmissionReader::new().read_bytes(b"").unwrap_err();
        assert!(matches!(err, ChecklistError::EmptyData(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SubmissionReader::new()
            .read_file("/nonexistent/samples.tsv")
            .unwrap_err();
        assert!(matches!(err, ChecklistError::MissingInputFile { .. }));
    }
}
