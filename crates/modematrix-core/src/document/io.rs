//! CSV import into the data-entry table.

use std::path::Path;

use super::state::{Document, column_label};
use crate::error::{ModeMatrixError, Result};

impl Document {
    /// Build a table from CSV text.
    ///
    /// With `has_header`, the first line supplies the column labels (blank
    /// labels fall back to `Column N`). Short rows are padded with blank
    /// cells so the table stays rectangular.
    pub fn from_csv_str(content: &str, has_header: bool) -> Result<Self> {
        let mut lines = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_csv_line);

        let header = if has_header { lines.next() } else { None };
        let rows: Vec<Vec<String>> = lines.collect();
        if header.is_none() && rows.is_empty() {
            return Err(ModeMatrixError::EmptyCsv);
        }

        let width = rows
            .iter()
            .map(Vec::len)
            .chain(header.iter().map(Vec::len))
            .max()
            .unwrap_or(1)
            .max(1);

        let labels = (0..width)
            .map(|idx| {
                header
                    .as_ref()
                    .and_then(|h| h.get(idx))
                    .filter(|label| !label.is_empty())
                    .cloned()
                    .unwrap_or_else(|| column_label(idx + 1))
            })
            .collect();

        let mut rows = rows;
        if rows.is_empty() {
            rows.push(Vec::new());
        }
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Ok(Document { labels, rows })
    }

    /// Read a CSV file into a table.
    pub fn from_csv_file(path: &Path, has_header: bool) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content, has_header)
    }
}

/// Parse a single CSV line, handling quoted fields
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    fields.push(finish_field(&mut current, field_was_quoted));
                    field_was_quoted = false;
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(finish_field(&mut current, field_was_quoted));
    fields
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = std::mem::take(current);
    if quoted { field } else { field.trim().to_string() }
}
