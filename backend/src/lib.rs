//! # Intake - candidate spreadsheet normalization
//!
//! Intake turns a small uploaded spreadsheet (one candidate, three attributes)
//! plus typed identity fields into a validated, persisted candidate record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ .xlsx/.xls  │────▶│   Parser    │────▶│  Transform  │────▶│    Store    │
//! │   bytes     │     │ (calamine)  │     │ (select +   │     │ (memory or  │
//! │             │     │             │     │  coerce)    │     │   SQLite)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intake::{process_candidate, Identity, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     let bytes = std::fs::read("candidate.xlsx").unwrap();
//!     let record = process_candidate(&store, Identity::new("Ada", "Lovelace"), Some(bytes))
//!         .await
//!         .unwrap();
//!     println!("Saved candidate #{}", record.id);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Identity, Seniority, CandidateRecord)
//! - [`parser`] - Workbook reading (and a minimal xlsx writer)
//! - [`transform`] - Column resolution, row selection, coercion, pipeline
//! - [`validation`] - JSON schema validation
//! - [`store`] - Candidate persistence
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Persistence
pub mod store;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    IngestError, IngestResult, PipelineError, PipelineResult, ServerError, ServerResult,
    StoreError, StoreResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CandidateDraft, CandidateRecord, CoercedFields, Identity, Seniority};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    read_workbook, read_workbook_file, write_workbook, CellValue, KeyedRow, RowView, SheetRows,
    WriteError,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    assemble_record, coerce_availability, coerce_fields, coerce_seniority, coerce_years,
    field_for_label, ingest_fields, normalize_candidate, normalize_label, process_candidate,
    resolve_row, select_row, CanonicalField, ResolvedAttributes, SelectedRow, SelectionMode,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, validate, validate_candidate_record, validate_identity};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{CandidateStore, MemoryStore, SqliteStore};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{CandidateUpload, DeleteAllResponse};

// Server
pub mod server {
    pub use crate::api::server::{build_router, start_server, ServerConfig};
}
