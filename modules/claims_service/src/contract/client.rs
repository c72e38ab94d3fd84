//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the
//! claims service. NO HTTP - direct function calls for performance.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::ClaimsError;
use super::model::Claim;
use super::patch::ClaimPatch;
use crate::domain::filter::{ClaimFilter, ClaimSummary, Page, PageRequest};
use crate::domain::summary::SettlementSummary;

/// Claims service API for inter-module communication
#[async_trait]
pub trait ClaimsApi: Send + Sync {
    /// Create or update a claim aggregate from a sparse patch. The whole
    /// write commits atomically or not at all.
    async fn save_claim(&self, patch: ClaimPatch) -> Result<Claim, ClaimsError>;

    /// Load the full claim graph by id
    async fn get_claim(&self, id: Uuid) -> Result<Claim, ClaimsError>;

    /// Delete a claim and every strongly-owned child. Fails with a conflict
    /// while restricted documents or notes remain attached.
    async fn delete_claim(&self, id: Uuid) -> Result<(), ClaimsError>;

    /// List claim summaries matching the filter, paged and sorted
    async fn list_claims(
        &self,
        filter: ClaimFilter,
        page: PageRequest,
    ) -> Result<Page<ClaimSummary>, ClaimsError>;

    /// Per-currency settlement totals for a claim
    async fn settlement_summary(&self, id: Uuid) -> Result<SettlementSummary, ClaimsError>;
}
