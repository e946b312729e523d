//! Delimited-table loading
//!
//! The datasets are flat files with a fixed, documented column layout; there
//! is no auto-detection. A [`TableSchema`] names the columns of interest and
//! where they sit (counted from the start or from the end of a row), and
//! [`read_table`] projects exactly those columns into a Polars DataFrame.
//!
//! Failure policy: a missing file, a ragged row or an unparsable field is a
//! fail-fast [`ChartError::Reader`] carrying the file path (and line number
//! where applicable). There is no partial recovery.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::{ChartError, Result};

// ============================================================================
// Schema types
// ============================================================================

/// Field separator of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Any run of whitespace (scientific fixed-width tables)
    Whitespace,
    /// A single byte, e.g. `b','` or `b'\t'`
    Byte(u8),
}

/// Position of a column within a row.
///
/// Trailing confidence-interval columns are addressed from the end so the
/// schema stays valid if a source appends columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPick {
    FromStart(usize),
    FromEnd(usize),
}

/// A named column to extract from a table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub pick: ColumnPick,
}

/// Fixed layout of one dataset file.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Human-readable dataset name used in error messages
    pub name: &'static str,
    pub delimiter: Delimiter,
    /// Header rows skipped before any parsing
    pub skip_rows: usize,
    /// Lines starting with this character are ignored
    pub comment: Option<char>,
    /// Columns projected into the resulting DataFrame
    pub columns: &'static [ColumnSpec],
}

// ============================================================================
// Reading
// ============================================================================

/// Load a table file and project the schema's columns into a DataFrame.
pub fn read_table(path: &Path, schema: &TableSchema) -> Result<DataFrame> {
    let text = fs::read_to_string(path).map_err(|e| {
        ChartError::Reader(format!(
            "Cannot read {} file '{}': {}",
            schema.name,
            path.display(),
            e
        ))
    })?;

    let rows = parse_rows(&text, path, schema)?;
    let df = project(&rows, path, schema)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

/// Extract a projected column as a plain `Vec<f64>`.
pub fn column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let values = df
        .column(name)?
        .as_materialized_series()
        .f64()?
        .into_no_null_iter()
        .collect();
    Ok(values)
}

/// Parse the raw text into numeric rows, honoring header skip and comments.
fn parse_rows(text: &str, path: &Path, schema: &TableSchema) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate().skip(schema.skip_rows) {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(c) = schema.comment {
            if trimmed.starts_with(c) {
                continue;
            }
        }
        let fields = match schema.delimiter {
            Delimiter::Whitespace => trimmed.split_whitespace().map(str::to_owned).collect(),
            Delimiter::Byte(d) => split_delimited(trimmed, d, path, schema, line_no)?,
        };
        let mut row = Vec::with_capacity(fields.len());
        for field in &fields {
            let value: f64 = field.trim().parse().map_err(|_| {
                ChartError::Reader(format!(
                    "Malformed row in '{}' at line {}: cannot parse '{}' as a number",
                    path.display(),
                    line_no,
                    field
                ))
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Split a single byte-delimited record via the csv crate, so quoting rules
/// match what the sources export.
fn split_delimited(
    line: &str,
    delimiter: u8,
    path: &Path,
    schema: &TableSchema,
    line_no: usize,
) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    let read = reader.read_record(&mut record).map_err(|e| {
        ChartError::Reader(format!(
            "Malformed row in {} file '{}' at line {}: {}",
            schema.name,
            path.display(),
            line_no,
            e
        ))
    })?;
    if !read {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_owned).collect())
}

/// Check row widths and project the schema's columns.
fn project(rows: &[Vec<f64>], path: &Path, schema: &TableSchema) -> Result<DataFrame> {
    let min_from_start = schema
        .columns
        .iter()
        .filter_map(|c| match c.pick {
            ColumnPick::FromStart(i) => Some(i + 1),
            ColumnPick::FromEnd(_) => None,
        })
        .max()
        .unwrap_or(0);
    let min_from_end = schema
        .columns
        .iter()
        .filter_map(|c| match c.pick {
            ColumnPick::FromEnd(i) => Some(i + 1),
            ColumnPick::FromStart(_) => None,
        })
        .max()
        .unwrap_or(0);
    let min_width = min_from_start.max(min_from_end);

    let width = rows.first().map(|r| r.len()).unwrap_or(min_width);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ChartError::Reader(format!(
                "Ragged table in {} file '{}': row {} has {} fields, expected {}",
                schema.name,
                path.display(),
                i + 1,
                row.len(),
                width
            )));
        }
    }
    if width < min_width {
        return Err(ChartError::Reader(format!(
            "{} file '{}' has {} columns but the schema needs at least {}",
            schema.name,
            path.display(),
            width,
            min_width
        )));
    }

    let columns: Vec<Column> = schema
        .columns
        .iter()
        .map(|spec| {
            let index = match spec.pick {
                ColumnPick::FromStart(i) => i,
                ColumnPick::FromEnd(i) => width - 1 - i,
            };
            let values: Vec<f64> = rows.iter().map(|r| r[index]).collect();
            Column::new(spec.name.into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}
