//! High-level ingestion API: spreadsheet bytes in, candidate out.
//!
//! ```text
//! bytes ─▶ read_workbook ─▶ select_row ─▶ coerce_fields ─▶ assemble_record ─▶ store.save
//! ```
//!
//! Everything up to [`assemble_record`] is synchronous and stateless: the same
//! buffer and identity always produce the same draft.
//!
//! # Example
//!
//! ```rust,ignore
//! use intake::{normalize_candidate, Identity};
//!
//! let bytes = std::fs::read("candidate.xlsx")?;
//! let draft = normalize_candidate(Identity::new("Ada", "Lovelace"), Some(bytes.as_slice()))?;
//! println!("{} is {} with {} years", draft.name, draft.seniority, draft.years);
//! ```

use super::coerce::coerce_fields;
use super::selector::{select_row, SelectionMode};
use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::{IngestError, IngestResult, PipelineError, PipelineResult};
use crate::models::{CandidateDraft, CandidateRecord, CoercedFields, Identity};
use crate::parser::read_workbook;
use crate::store::CandidateStore;

/// Extract and coerce the candidate fields from a spreadsheet buffer.
pub fn ingest_fields(bytes: &[u8]) -> IngestResult<CoercedFields> {
    log_info(format!("📖 Reading spreadsheet ({} bytes)...", bytes.len()));
    let rows = read_workbook(bytes)?;
    log_success(format!(
        "Sheet '{}': {} columns, {} data rows",
        rows.sheet_name,
        rows.headers.len(),
        rows.keyed.len()
    ));

    let selected = select_row(&rows)?;
    match selected.mode {
        SelectionMode::HeaderKeyed => {
            log_success(format!("Using data row {} (matched by header)", selected.index + 1))
        }
        SelectionMode::FirstRowFallback => {
            log_warning("No recognised column labels, using the first data row")
        }
        SelectionMode::Positional => log_warning(format!(
            "No header row, reading row {} by position (seniority, years, availability)",
            selected.index + 1
        )),
    }

    coerce_fields(&selected.attributes)
}

/// Combine identity strings with the coerced spreadsheet fields.
///
/// Identity strings are taken as-is; validating them is the caller's job
/// (see [`crate::validation::validate_identity`]).
pub fn assemble_record(identity: Identity, fields: CoercedFields) -> CandidateDraft {
    CandidateDraft::new(identity, fields)
}

/// Run the whole synchronous pipeline on an optional upload.
///
/// A missing buffer fails with [`IngestError::MissingFile`] before the reader
/// is touched.
pub fn normalize_candidate(identity: Identity, file: Option<&[u8]>) -> IngestResult<CandidateDraft> {
    let bytes = file.ok_or(IngestError::MissingFile)?;
    let fields = ingest_fields(bytes)?;
    Ok(assemble_record(identity, fields))
}

/// Normalize an upload and persist it.
///
/// Parsing runs on the blocking pool; the store write is awaited as-is, with
/// no retry or timeout.
pub async fn process_candidate<S: CandidateStore>(
    store: &S,
    identity: Identity,
    file: Option<Vec<u8>>,
) -> PipelineResult<CandidateRecord> {
    let bytes = file.ok_or(IngestError::MissingFile)?;

    let fields = tokio::task::spawn_blocking(move || ingest_fields(&bytes))
        .await
        .map_err(|e| PipelineError::Worker(e.to_string()))??;

    let draft = store.create_draft(identity, fields);
    let record = store.save(draft).await?;

    log_success(format!(
        "Saved candidate #{}: {} {} ({}, {} years, {})",
        record.id,
        record.name,
        record.surname,
        record.seniority,
        record.years,
        if record.availability { "available" } else { "not available" }
    ));

    Ok(record)
}
