//! Repository trait for claim aggregate data access
//!
//! The trait defines the storage seam the domain service works against.
//! The SeaORM implementation is in infra/storage/repositories.rs

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::filter::{ClaimFilter, ClaimSummary, Page, PageRequest};
use super::reconcile::ClaimChangeSet;
use crate::contract::model::Claim;

/// Repository for claim aggregates
#[async_trait]
pub trait ClaimsRepository: Send + Sync {
    /// Load the full claim graph by id - every owned collection including
    /// nested drivers is materialized, or `None` when the id is unknown.
    /// Never returns a partially loaded graph.
    async fn load(&self, id: Uuid) -> Result<Option<Claim>>;

    /// Apply a reconciled change set inside a single transaction. Either
    /// every row change commits, or none does.
    async fn apply(&self, change_set: ClaimChangeSet) -> Result<()>;

    /// Delete the root and cascade to every strongly-owned child. Fails
    /// while restricted documents or notes still reference the claim.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// List claim summaries matching the filter, with deterministic
    /// ordering for the given sort key.
    async fn list(&self, filter: &ClaimFilter, page: &PageRequest) -> Result<Page<ClaimSummary>>;
}
