//! Generic spreadsheet reader.
//!
//! Decodes the first worksheet of a workbook into rows of [`CellValue`]s. No
//! candidate-specific logic here: the reader only knows about labels, cells and
//! blank rows.
//!
//! Both row shapes are produced from one decode:
//!
//! - header-keyed rows: first row as labels, each later row as `label -> value`
//! - positional rows: every non-blank row as an ordered list of values

pub mod writer;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::error::{IngestError, IngestResult};

pub use writer::{write_workbook, WriteError};

/// Label used for header cells that are empty.
const EMPTY_HEADER: &str = "__EMPTY";

// =============================================================================
// Cell values
// =============================================================================

/// A raw, unformatted cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// True for empty cells and the empty string. Whitespace counts as content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// String form of the value; empty cells render as `""`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Self::Number(*i as f64),
            Data::Float(f) => Self::Number(*f),
            Data::String(s) => Self::Text(s.clone()),
            Data::Bool(b) => Self::Bool(*b),
            // raw mode: dates stay as their serial number
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Error(_) | Data::Empty => Self::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// Rows
// =============================================================================

/// A data row keyed by the header labels, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedRow {
    cells: Vec<(String, CellValue)>,
}

impl KeyedRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The row shape downstream logic works on, decided once per sheet.
#[derive(Debug, Clone, Copy)]
pub enum RowView<'a> {
    /// The sheet has a header row and at least one data row.
    HeaderKeyed(&'a [KeyedRow]),
    /// No header-keyed rows; every non-blank row, header included.
    Positional(&'a [Vec<CellValue>]),
}

/// Result of reading a workbook.
#[derive(Debug, Clone, Serialize)]
pub struct SheetRows {
    /// Name of the sheet that was read
    pub sheet_name: String,
    /// Header labels (deduplicated)
    pub headers: Vec<String>,
    /// Data rows keyed by header label, blank rows dropped
    pub keyed: Vec<KeyedRow>,
    /// All non-blank rows as positional cell lists
    pub positional: Vec<Vec<CellValue>>,
}

impl SheetRows {
    /// Build both row shapes from a raw cell grid.
    pub fn from_grid(sheet_name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        let headers = grid
            .first()
            .map(|row| header_labels(row))
            .unwrap_or_default();

        let keyed = grid
            .iter()
            .skip(1)
            .filter(|row| !is_blank_row(row))
            .map(|row| key_row(&headers, row))
            .collect();

        let positional = grid
            .into_iter()
            .filter(|row| !is_blank_row(row))
            .collect();

        Self {
            sheet_name: sheet_name.into(),
            headers,
            keyed,
            positional,
        }
    }

    /// Header-keyed view when it has rows, positional view otherwise.
    pub fn view(&self) -> RowView<'_> {
        if self.keyed.is_empty() {
            RowView::Positional(&self.positional)
        } else {
            RowView::HeaderKeyed(&self.keyed)
        }
    }
}

fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

/// Stringify header cells; empty cells become `__EMPTY`, repeats get `_1`, `_2`...
fn header_labels(row: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    row.iter()
        .map(|cell| {
            let base = match cell {
                CellValue::Empty => EMPTY_HEADER.to_string(),
                other => other.to_text(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            label
        })
        .collect()
}

/// Pair each header with its cell; short rows are padded with `Empty`.
fn key_row(headers: &[String], row: &[CellValue]) -> KeyedRow {
    let cells = headers
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = row.get(i).cloned().unwrap_or(CellValue::Empty);
            (label.clone(), value)
        })
        .collect();
    KeyedRow::new(cells)
}

// =============================================================================
// Workbook decoding
// =============================================================================

/// Read the first worksheet of a workbook held in memory.
///
/// Accepts every format calamine detects (xlsx, xlsm, xlsb, xls, ods).
///
/// # Example
/// ```ignore
/// let rows = read_workbook(&bytes)?;
/// println!("Sheet '{}' has {} data rows", rows.sheet_name, rows.keyed.len());
/// ```
pub fn read_workbook(bytes: &[u8]) -> IngestResult<SheetRows> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::MalformedInput("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::MalformedInput("workbook has no sheets".to_string()))??;

    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect();

    Ok(SheetRows::from_grid(sheet_name, grid))
}

/// Read the first worksheet of a workbook on disk.
pub fn read_workbook_file<P: AsRef<Path>>(path: P) -> IngestResult<SheetRows> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| {
        IngestError::MalformedInput(format!(
            "cannot read '{}': {}",
            path.as_ref().display(),
            e
        ))
    })?;
    read_workbook(&bytes)
}
