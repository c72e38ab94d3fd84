//! Domain service - persistence coordination for claim aggregates

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::documents::DocumentStore;
use super::filter::{ClaimFilter, ClaimSummary, Page, PageRequest};
use super::reconcile::reconcile_claim;
use super::repository::ClaimsRepository;
use super::search::SearchIndex;
use super::summary::{summarize, SettlementSummary};
use crate::config::Config;
use crate::contract::error::ClaimsError;
use crate::contract::model::Claim;
use crate::contract::patch::ClaimPatch;
use crate::contract::ClaimsApi;

/// Domain service for claim management. All operations are request-scoped
/// and synchronous from the caller's perspective; nothing is cached across
/// requests.
pub struct ClaimsService {
    repo: Arc<dyn ClaimsRepository>,
    search_index: Arc<dyn SearchIndex>,
    document_store: Arc<dyn DocumentStore>,
    config: Config,
}

impl ClaimsService {
    pub fn new(
        repo: Arc<dyn ClaimsRepository>,
        search_index: Arc<dyn SearchIndex>,
        document_store: Arc<dyn DocumentStore>,
        config: Config,
    ) -> Self {
        Self {
            repo,
            search_index,
            document_store,
            config,
        }
    }

    /// Create or update a claim aggregate from a sparse patch.
    ///
    /// Loads the persisted graph, runs the pure reconciliation pass and
    /// applies the resulting change set in one transaction; the root's
    /// `updated_at` moves on every successful save. There is no optimistic
    /// concurrency token beyond that timestamp, so two concurrent saves of
    /// the same claim racing on disjoint sub-collections can overwrite each
    /// other - a known limitation of the sparse-patch model.
    pub async fn save(&self, patch: ClaimPatch) -> Result<Claim, ClaimsError> {
        let existing = match patch.id {
            Some(id) => self.load_graph(id).await?,
            None => None,
        };

        let change_set = reconcile_claim(
            existing.as_ref(),
            patch,
            self.config.unmatched_children,
            Utc::now(),
        )?;
        let claim_id = change_set.claim_id;
        tracing::debug!(
            claim_id = %claim_id,
            new_root = change_set.root.is_insert(),
            "applying reconciled claim change set"
        );

        self.repo.apply(change_set).await.map_err(|error| {
            tracing::error!(claim_id = %claim_id, %error, "claim write failed");
            ClaimsError::Internal
        })?;

        let claim = self
            .load_graph(claim_id)
            .await?
            .ok_or(ClaimsError::Internal)?;

        // Best-effort: an index failure must never fail the claim write.
        if let Err(error) = self.search_index.index(&claim).await {
            tracing::warn!(claim_id = %claim.id, %error, "search indexing failed; ignoring");
        }

        Ok(claim)
    }

    /// Load the full claim graph
    pub async fn get(&self, id: Uuid) -> Result<Claim, ClaimsError> {
        self.load_graph(id)
            .await?
            .ok_or_else(|| ClaimsError::claim_not_found(id))
    }

    /// Delete a claim and cascade to its strongly-owned children. The
    /// restricted documents and notes are handed to the document-storage
    /// collaborator first; the delete is refused while any remain.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClaimsError> {
        let claim = self.get(id).await?;

        if !claim.documents.is_empty() || !claim.notes.is_empty() {
            self.document_store.release(id).await.map_err(|error| {
                tracing::warn!(claim_id = %id, %error, "document release failed");
                ClaimsError::Conflict {
                    reason: format!("claim {id} still owns documents or notes"),
                }
            })?;

            // The collaborator reported success; verify it actually cleared.
            let reloaded = self.get(id).await?;
            if !reloaded.documents.is_empty() || !reloaded.notes.is_empty() {
                return Err(ClaimsError::Conflict {
                    reason: format!("claim {id} still owns documents or notes"),
                });
            }
        }

        self.repo.delete(id).await.map_err(|error| {
            tracing::error!(claim_id = %id, %error, "claim delete failed");
            ClaimsError::Internal
        })?;

        if let Err(error) = self.search_index.remove(id).await {
            tracing::warn!(claim_id = %id, %error, "search index removal failed; ignoring");
        }

        Ok(())
    }

    /// List claim summaries matching the filter
    pub async fn list(
        &self,
        filter: ClaimFilter,
        page: PageRequest,
    ) -> Result<Page<ClaimSummary>, ClaimsError> {
        let page = self.normalize_page(page);
        self.repo.list(&filter, &page).await.map_err(|error| {
            tracing::error!(%error, "claim listing failed");
            ClaimsError::Internal
        })
    }

    /// Per-currency settlement totals for a claim
    pub async fn settlement_summary(&self, id: Uuid) -> Result<SettlementSummary, ClaimsError> {
        let claim = self.get(id).await?;
        Ok(summarize(&claim.settlements, &self.config.default_currency))
    }

    async fn load_graph(&self, id: Uuid) -> Result<Option<Claim>, ClaimsError> {
        self.repo.load(id).await.map_err(|error| {
            tracing::error!(claim_id = %id, %error, "claim load failed");
            ClaimsError::Internal
        })
    }

    fn normalize_page(&self, mut page: PageRequest) -> PageRequest {
        if page.page == 0 {
            page.page = 1;
        }
        if page.page_size == 0 {
            page.page_size = self.config.default_page_size;
        }
        page.page_size = page.page_size.min(self.config.max_page_size);
        page
    }
}

#[async_trait::async_trait]
impl ClaimsApi for ClaimsService {
    async fn save_claim(&self, patch: ClaimPatch) -> Result<Claim, ClaimsError> {
        self.save(patch).await
    }

    async fn get_claim(&self, id: Uuid) -> Result<Claim, ClaimsError> {
        self.get(id).await
    }

    async fn delete_claim(&self, id: Uuid) -> Result<(), ClaimsError> {
        self.delete(id).await
    }

    async fn list_claims(
        &self,
        filter: ClaimFilter,
        page: PageRequest,
    ) -> Result<Page<ClaimSummary>, ClaimsError> {
        self.list(filter, page).await
    }

    async fn settlement_summary(&self, id: Uuid) -> Result<SettlementSummary, ClaimsError> {
        ClaimsService::settlement_summary(self, id).await
    }
}
