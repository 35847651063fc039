//! Error types for the candidate intake service.
//!
//! - [`IngestError`] - Spreadsheet ingestion failures (all client errors)
//! - [`StoreError`] - Persistence failures
//! - [`PipelineError`] - Ingest-and-save orchestration errors
//! - [`ServerError`] - Top-level HTTP errors
//!
//! Conversion is automatic via `From` implementations so `?` works across
//! error boundaries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::parser::CellValue;

// =============================================================================
// Ingestion Errors
// =============================================================================

/// Rejections raised while turning an uploaded spreadsheet into a candidate.
///
/// Every variant describes a defect in untrusted input, never a transient fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IngestError {
    /// No file was attached to the request.
    #[error("File is required")]
    MissingFile,

    /// The buffer is not a readable workbook.
    #[error("Could not read spreadsheet: {0}")]
    MalformedInput(String),

    /// Headerless fallback found no row with three filled cells.
    #[error("No candidate data found in spreadsheet (no data rows)")]
    NoDataRows,

    /// At least one canonical column could not be located.
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    /// Seniority is not one of the accepted levels.
    #[error("Seniority must be \"junior\" or \"senior\". Received: \"{value}\"")]
    InvalidSeniority { value: String },

    /// Years of experience is not a finite number.
    #[error("Years of experience must be a number. Received: \"{value}\"")]
    InvalidYears { value: String },

    /// Years of experience parsed but is below zero.
    #[error("Years of experience cannot be negative. Received: {value}")]
    NegativeYears { value: f64 },

    /// Availability is not a recognised boolean spelling.
    #[error("Availability must be boolean-like (true/false, yes/no, 1/0). Received: \"{value}\"")]
    InvalidAvailability { value: String },
}

impl IngestError {
    /// Stable machine-readable code for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::MalformedInput(_) => "malformed_input",
            Self::NoDataRows => "no_data_rows",
            Self::MissingColumns { .. } => "missing_columns",
            Self::InvalidSeniority { .. } => "invalid_seniority",
            Self::InvalidYears { .. } => "invalid_years",
            Self::NegativeYears { .. } => "negative_years",
            Self::InvalidAvailability { .. } => "invalid_availability",
        }
    }

    pub(crate) fn invalid_seniority(raw: &CellValue) -> Self {
        Self::InvalidSeniority { value: raw.to_text() }
    }

    pub(crate) fn invalid_years(raw: &CellValue) -> Self {
        Self::InvalidYears { value: raw.to_text() }
    }

    pub(crate) fn invalid_availability(raw: &CellValue) -> Self {
        Self::InvalidAvailability { value: raw.to_text() }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(e: calamine::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised by a candidate store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No candidate with this id.
    #[error("Candidate {0} not found")]
    NotFound(i64),

    /// Database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a candidate.
    #[error("Corrupt candidate row: {0}")]
    CorruptRow(String),
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors from a full ingest-and-save run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Ingestion rejected the upload.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The store failed to persist the candidate.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking worker running the normalizer did not complete.
    #[error("Ingestion worker failed: {0}")]
    Worker(String),
}

// =============================================================================
// Server Errors (top-level)
// =============================================================================

/// HTTP-facing errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upload pipeline error.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Store failure outside the upload pipeline.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid request (identity fields, multipart framing).
    #[error("Invalid request: {}", .0.join("; "))]
    BadRequest(Vec<String>),
}

impl From<IngestError> for ServerError {
    fn from(e: IngestError) -> Self {
        Self::Pipeline(PipelineError::Ingest(e))
    }
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(vec![message.into()])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(PipelineError::Ingest(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Pipeline(PipelineError::Store(e)) | Self::Store(e) => store_status(e),
            Self::Pipeline(PipelineError::Worker(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pipeline(PipelineError::Ingest(e)) => e.kind(),
            Self::Pipeline(PipelineError::Store(e)) | Self::Store(e) => store_kind(e),
            Self::Pipeline(PipelineError::Worker(_)) => "internal",
            Self::BadRequest(_) => "bad_request",
        }
    }
}

fn store_status(e: &StoreError) -> StatusCode {
    match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Database(_) | StoreError::CorruptRow(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn store_kind(e: &StoreError) -> &'static str {
    match e {
        StoreError::NotFound(_) => "not_found",
        StoreError::Database(_) | StoreError::CorruptRow(_) => "database",
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(messages) => json!(messages),
            other => json!(other.to_string()),
        };
        let body = json!({
            "statusCode": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "kind": self.kind(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for ingest-and-save runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for HTTP handlers.
pub type ServerResult<T> = Result<T, ServerError>;
