//! In-memory candidate store.

use chrono::Utc;
use tokio::sync::RwLock;

use super::CandidateStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{CandidateDraft, CandidateRecord};

/// Candidates held in process memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    /// Insertion order (ascending id)
    records: Vec<CandidateRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CandidateStore for MemoryStore {
    async fn save(&self, draft: CandidateDraft) -> StoreResult<CandidateRecord> {
        let mut state = self.inner.write().await;
        state.last_id += 1;
        let record = draft.into_record(state.last_id, Utc::now());
        state.records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<CandidateRecord>> {
        let state = self.inner.read().await;
        Ok(state.records.iter().rev().cloned().collect())
    }

    async fn remove(&self, id: i64) -> StoreResult<()> {
        let mut state = self.inner.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        if state.records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn remove_all(&self) -> StoreResult<u64> {
        let mut state = self.inner.write().await;
        let deleted = state.records.len() as u64;
        state.records.clear();
        Ok(deleted)
    }
}
