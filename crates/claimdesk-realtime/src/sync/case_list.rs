//! Dashboard case-list synchronization.
//!
//! The case list never merges events incrementally: any change event is
//! treated as a staleness signal and answered with a full refetch. Case
//! rows are small and the list is bounded, so the refetch is cheap and
//! convergence is unconditional.

use async_trait::async_trait;

use claimdesk_core::events::ChangeEvent;
use claimdesk_core::result::AppResult;
use claimdesk_entity::case::{Case, CaseStatus};

/// Storage seam for the case list.
#[async_trait]
pub trait CaseSnapshot: Send + Sync {
    /// Returns all cases, newest first.
    async fn fetch_all(&self) -> AppResult<Vec<Case>>;
}

/// Client-held view of the case list.
#[derive(Debug)]
pub struct CaseListSync<B: CaseSnapshot> {
    backend: B,
    cases: Vec<Case>,
}

impl<B: CaseSnapshot> CaseListSync<B> {
    /// Creates an empty view. Call [`fetch_all`](Self::fetch_all) to load
    /// the initial snapshot.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cases: Vec::new(),
        }
    }

    /// The current local list, newest first.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Counts local cases with the given status.
    pub fn count_by_status(&self, status: CaseStatus) -> usize {
        self.cases.iter().filter(|c| c.status == status).count()
    }

    /// Replaces the local list with a fresh snapshot.
    pub async fn fetch_all(&mut self) -> AppResult<()> {
        self.cases = self.backend.fetch_all().await?;
        Ok(())
    }

    /// Reacts to a change event by refetching. Insert, update and delete
    /// all take the same path, so concurrent edits from other sessions
    /// cannot leave the list diverged.
    pub async fn apply_event(&mut self, _event: &ChangeEvent) -> AppResult<()> {
        self.fetch_all().await
    }
}
