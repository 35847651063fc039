//! Domain models for the candidate intake pipeline.
//!
//! - [`Seniority`] - Closed seniority enumeration (`junior` / `senior`)
//! - [`Identity`] - Externally supplied first name and surname
//! - [`CoercedFields`] - The three spreadsheet fields after coercion
//! - [`CandidateDraft`] - A fully valid record that has not been persisted yet
//! - [`CandidateRecord`] - A persisted candidate with id and creation timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Seniority
// =============================================================================

/// Seniority level of a candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Senior,
}

impl Seniority {
    /// Parse an already normalized (trimmed, lowercase) label.
    pub fn from_normalized(label: &str) -> Option<Self> {
        match label {
            "junior" => Some(Self::Junior),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Identity strings supplied alongside the uploaded file (form fields).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub surname: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

// =============================================================================
// Coerced spreadsheet fields
// =============================================================================

/// Spreadsheet attributes after every coercer succeeded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CoercedFields {
    pub seniority: Seniority,
    pub years: f64,
    pub availability: bool,
}

// =============================================================================
// Candidate draft / record
// =============================================================================

/// A normalized candidate ready to hand to a store.
///
/// Carries no `id` or `created_at`; those are assigned on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    pub name: String,
    pub surname: String,
    pub seniority: Seniority,
    pub years: f64,
    pub availability: bool,
}

impl CandidateDraft {
    /// Combine identity strings with coerced spreadsheet fields.
    pub fn new(identity: Identity, fields: CoercedFields) -> Self {
        Self {
            name: identity.name,
            surname: identity.surname,
            seniority: fields.seniority,
            years: fields.years,
            availability: fields.availability,
        }
    }

    /// Attach persistence-assigned identity and timestamp.
    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> CandidateRecord {
        CandidateRecord {
            id,
            name: self.name,
            surname: self.surname,
            seniority: self.seniority,
            years: self.years,
            availability: self.availability,
            created_at,
        }
    }
}

/// A persisted candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub seniority: Seniority,
    pub years: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Tests
// =============================================================================
