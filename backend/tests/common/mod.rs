//! Shared fixtures for integration tests.

#![allow(dead_code)]

use intake::{write_workbook, CellValue};

/// Build an in-memory xlsx from rows of cells.
pub fn workbook(rows: Vec<Vec<CellValue>>) -> Vec<u8> {
    write_workbook(&rows).expect("fixture workbook")
}

/// A row of text cells.
pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

/// Header + one data row, all text.
pub fn simple_workbook(headers: &[&str], values: &[&str]) -> Vec<u8> {
    workbook(vec![text_row(headers), text_row(values)])
}

/// A well-formed candidate sheet.
pub fn candidate_workbook(seniority: &str, years: f64, availability: bool) -> Vec<u8> {
    workbook(vec![
        text_row(&["Seniority", "Years of experience", "Availability"]),
        vec![
            CellValue::from(seniority),
            CellValue::Number(years),
            CellValue::Bool(availability),
        ],
    ])
}
