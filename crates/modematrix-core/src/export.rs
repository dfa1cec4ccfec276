//! CSV export of live results and history entries.
//!
//! Two shapes are produced on purpose:
//! - live results: one flat numeric column per value, then `Mode`
//! - history entries: the values as one quoted `"[a, b]"` cell, then the mode
//!
//! Cells are always numbers, so no quoting or escaping is applied to them.
//! Column labels can come from an imported header and are quoted when needed.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::history::HistoryEntry;
use modematrix_engine::engine::{RowResult, format_number, format_values};

pub const CSV_MIME_TYPE: &str = "text/csv";

const RESULTS_PREFIX: &str = "modematrix";
const HISTORY_PREFIX: &str = "modematrix_history";

/// A named CSV document ready to be saved.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl CsvArtifact {
    /// Write the artifact into `dir` and return the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        log::info!("Exported {}", path.display());
        Ok(path)
    }
}

/// Quote a header field holding a comma, quote or line break.
fn escape_label(label: &str) -> Cow<'_, str> {
    if label.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", label.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(label)
    }
}

/// Render live results: labels plus `Mode`, then values and mode per row.
///
/// Rows are not padded, so a row with fewer values than there are labels
/// produces a shorter line.
pub fn batch_to_csv<L: AsRef<str>>(batch: &[RowResult], column_labels: &[L]) -> String {
    let mut header: Vec<Cow<'_, str>> = column_labels
        .iter()
        .map(|l| escape_label(l.as_ref()))
        .collect();
    header.push(Cow::Borrowed("Mode"));

    let mut out = header.join(",");
    out.push('\n');
    for result in batch {
        let fields: Vec<String> = result
            .values
            .iter()
            .chain(std::iter::once(&result.mode))
            .map(|n| format_number(*n))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Render a stored entry as `Values,Mode` with a quoted bracketed list.
pub fn entry_to_csv(entry: &HistoryEntry) -> String {
    let mut out = String::from("Values,Mode\n");
    for result in &entry.results {
        out.push_str(&format!(
            "\"[{}]\",{}\n",
            format_values(&result.values),
            format_number(result.mode)
        ));
    }
    out
}

/// Filesystem-safe instant: `YYYY-MM-DDTHH-MM-SS` (UTC, no fraction, no zone).
pub fn artifact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Package live results as `modematrix_<timestamp>.csv`.
pub fn export_batch<L: AsRef<str>>(
    batch: &[RowResult],
    column_labels: &[L],
    at: DateTime<Utc>,
) -> CsvArtifact {
    CsvArtifact {
        file_name: format!("{}_{}.csv", RESULTS_PREFIX, artifact_timestamp(at)),
        mime_type: CSV_MIME_TYPE,
        contents: batch_to_csv(batch, column_labels),
    }
}

/// Package a history entry as `modematrix_history_<timestamp>.csv`, named
/// after the entry's own instant.
pub fn export_entry(entry: &HistoryEntry) -> CsvArtifact {
    CsvArtifact {
        file_name: format!("{}_{}.csv", HISTORY_PREFIX, artifact_timestamp(entry.timestamp)),
        mime_type: CSV_MIME_TYPE,
        contents: entry_to_csv(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(row: usize, values: &[f64], mode: f64) -> RowResult {
        RowResult {
            row,
            values: values.to_vec(),
            mode,
        }
    }

    #[test]
    fn test_batch_to_csv() {
        let batch = vec![result(1, &[4.0, 4.0, 5.0], 4.0)];
        let csv = batch_to_csv(&batch, &["Column 1", "Column 2"]);
        assert_eq!(csv, "Column 1,Column 2,Mode\n4,4,5,4\n");
    }

    #[test]
    fn test_batch_to_csv_rows_are_not_padded() {
        let batch = vec![
            result(1, &[1.0, 2.0, 2.0], 2.0),
            result(3, &[7.5], 7.5),
        ];
        let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let csv = batch_to_csv(&batch, &labels);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["A,B,C,Mode", "1,2,2,2", "7.5,7.5"]);
    }

    #[test]
    fn test_batch_to_csv_quotes_awkward_labels() {
        let batch = vec![result(1, &[1.0, 1.0], 1.0)];
        let csv = batch_to_csv(&batch, &["a,b", "say \"hi\"", "c"]);
        assert_eq!(csv, "\"a,b\",\"say \"\"hi\"\"\",c,Mode\n1,1,1\n");
    }

    #[test]
    fn test_entry_to_csv() {
        let entry = HistoryEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap(),
            results: vec![result(1, &[1.0, 2.0], 1.0), result(2, &[0.5, 0.5], 0.5)],
        };
        assert_eq!(
            entry_to_csv(&entry),
            "Values,Mode\n\"[1, 2]\",1\n\"[0.5, 0.5]\",0.5\n"
        );
    }

    #[test]
    fn test_artifact_names() {
        let at = Utc.timestamp_opt(1_714_558_830, 987_000_000).unwrap();
        assert_eq!(artifact_timestamp(at), "2024-05-01T10-20-30");

        let live = export_batch(&[result(1, &[1.0], 1.0)], &["Column 1"], at);
        assert_eq!(live.file_name, "modematrix_2024-05-01T10-20-30.csv");
        assert_eq!(live.mime_type, "text/csv");

        let entry = HistoryEntry {
            timestamp: at,
            results: vec![result(1, &[1.0], 1.0)],
        };
        let stored = export_entry(&entry);
        assert_eq!(stored.file_name, "modematrix_history_2024-05-01T10-20-30.csv");
        assert_eq!(stored.contents, "Values,Mode\n\"[1]\",1\n");
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = export_batch(
            &[result(1, &[4.0, 4.0, 5.0], 4.0)],
            &["Column 1", "Column 2", "Column 3"],
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        );
        let path = artifact.write_to(&dir.path().join("exports")).unwrap();
        assert_eq!(path.file_name().unwrap(), "modematrix_2024-01-02T03-04-05.csv");
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Column 1,Column 2,Column 3,Mode\n4,4,5,4\n"
        );
    }
}
