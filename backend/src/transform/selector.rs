//! Row selection.
//!
//! Picks the one spreadsheet row that describes the candidate. Well-labelled
//! sheets go through the header-keyed path; sheets without usable header rows
//! fall back to a fixed positional contract (seniority, years, availability).

use serde::Serialize;

use super::columns::{resolve_row, ResolvedAttributes};
use crate::error::{IngestError, IngestResult};
use crate::parser::{CellValue, RowView, SheetRows};

/// Minimum filled cells for a positional row to count as data.
const MIN_POSITIONAL_CELLS: usize = 3;

/// How the selected row was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    /// Matched through header labels.
    HeaderKeyed,
    /// No row carried a known label; the first data row was used as-is.
    FirstRowFallback,
    /// Headerless sheet, values taken by column position.
    Positional,
}

/// The row chosen for the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRow {
    pub mode: SelectionMode,
    /// Index within the rows of the view the selection came from.
    pub index: usize,
    pub attributes: ResolvedAttributes,
}

/// Choose the candidate row.
///
/// Header-keyed rows: the first row resolving at least one canonical field,
/// otherwise the first row. Positional rows: the first row after the header
/// with at least three filled cells, or [`IngestError::NoDataRows`].
pub fn select_row(rows: &SheetRows) -> IngestResult<SelectedRow> {
    match rows.view() {
        RowView::HeaderKeyed(keyed) => {
            let mut resolved: Vec<ResolvedAttributes> = keyed.iter().map(resolve_row).collect();

            let (mode, index) = match resolved.iter().position(ResolvedAttributes::has_any) {
                Some(index) => (SelectionMode::HeaderKeyed, index),
                None => (SelectionMode::FirstRowFallback, 0),
            };

            Ok(SelectedRow {
                mode,
                index,
                attributes: resolved.swap_remove(index),
            })
        }
        RowView::Positional(positional) => positional
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| filled_cells(row) >= MIN_POSITIONAL_CELLS)
            .map(|(index, row)| SelectedRow {
                mode: SelectionMode::Positional,
                index,
                attributes: ResolvedAttributes::from_positional(row),
            })
            .ok_or(IngestError::NoDataRows),
    }
}

fn filled_cells(row: &[CellValue]) -> usize {
    row.iter().filter(|cell| !cell.is_blank()).count()
}
