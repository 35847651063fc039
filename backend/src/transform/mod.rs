//! Candidate normalization.
//!
//! - Columns: label normalization and alias resolution
//! - Selector: which spreadsheet row describes the candidate
//! - Coerce: per-field coercion and validation
//! - Pipeline: end-to-end ingestion and persistence

pub mod coerce;
pub mod columns;
pub mod pipeline;
pub mod selector;

pub use coerce::{coerce_availability, coerce_fields, coerce_seniority, coerce_years};
pub use columns::{field_for_label, normalize_label, resolve_row, CanonicalField, ResolvedAttributes};
pub use pipeline::*;
pub use selector::{select_row, SelectedRow, SelectionMode};
