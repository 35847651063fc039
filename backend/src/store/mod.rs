//! Candidate persistence.
//!
//! The ingestion pipeline only needs two capabilities from a store: build a
//! draft and save it. Listing and removal serve the HTTP API.
//!
//! - [`MemoryStore`] - process-local store (default for `serve`, used in tests)
//! - [`SqliteStore`] - durable store backed by an `sqlx` SQLite pool

pub mod memory;
pub mod sqlite;

use std::future::Future;

use crate::error::StoreResult;
use crate::models::{CandidateDraft, CandidateRecord, CoercedFields, Identity};
use crate::transform::assemble_record;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistence collaborator for candidates.
///
/// Stores assign `id` and `created_at` on save. Ids are never reused, and
/// [`find_all`](CandidateStore::find_all) lists the newest candidate first.
pub trait CandidateStore: Send + Sync + 'static {
    /// Build the in-memory shape handed to [`save`](CandidateStore::save).
    fn create_draft(&self, identity: Identity, fields: CoercedFields) -> CandidateDraft {
        assemble_record(identity, fields)
    }

    /// Durably store a draft and return the persisted record.
    fn save(
        &self,
        draft: CandidateDraft,
    ) -> impl Future<Output = StoreResult<CandidateRecord>> + Send;

    /// All candidates, descending id.
    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<CandidateRecord>>> + Send;

    /// Delete one candidate; `StoreError::NotFound` when the id is unknown.
    fn remove(&self, id: i64) -> impl Future<Output = StoreResult<()>> + Send;

    /// Delete every candidate, returning how many were removed.
    fn remove_all(&self) -> impl Future<Output = StoreResult<u64>> + Send;
}
