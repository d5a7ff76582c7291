//! Minimal CSV reading for Garmin activity exports.
//!
//! Garmin writes a plain header row followed by records. Titles can contain
//! commas and quotes, so quoted fields with doubled-quote escapes are
//! handled; no other dialect features appear in these files.

use thiserror::Error;

/// Errors from the record reader.
#[derive(Debug, Error)]
pub enum CsvError {
    /// File had no header row
    #[error("file has no header row")]
    NoHeader,

    /// A quoted field never closed
    #[error("unterminated quoted field starting in record {record}")]
    UnterminatedQuote { record: usize },
}

/// A parsed table: one header row plus data records.
#[derive(Debug)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse full file content into a table.
    pub fn parse(content: &str) -> Result<Self, CsvError> {
        let mut rows = split_rows(content)?;
        if rows.is_empty() {
            return Err(CsvError::NoHeader);
        }
        let headers = rows.remove(0);
        Ok(Self {
            headers,
            records: rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate data records with header-keyed field access.
    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records.iter().map(move |fields| CsvRow {
            headers: &self.headers,
            fields,
        })
    }
}

/// One data record, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    headers: &'a [String],
    fields: &'a [String],
}

impl<'a> CsvRow<'a> {
    /// Field under `column`, or `None` when the table has no such column.
    /// A record shorter than the header row reads as empty fields.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == column)?;
        Some(self.fields.get(index).map_or("", String::as_str))
    }
}

/// Split content into records of fields, honoring quoting.
fn split_rows(content: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    // An escaped quote inside a quoted field.
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                // Skip blank lines rather than producing empty records.
                if fields.len() > 1 || !fields[0].is_empty() {
                    rows.push(std::mem::take(&mut fields));
                } else {
                    fields.clear();
                }
            }
            other => field.push(other),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote {
            record: rows.len() + 1,
        });
    }

    // Content may end without a trailing newline.
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }

    Ok(rows)
}
