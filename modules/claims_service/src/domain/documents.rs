//! Document-storage collaborator
//!
//! Documents and notes are restricted children: the claim root cannot be
//! deleted while they exist. Before a delete, the service hands them to this
//! collaborator for removal or reassignment; only when that succeeds does
//! the cascade delete proceed.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// External document/note storage (local disk or cloud bucket)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Remove or reassign every document and note attached to the claim.
    /// Implementations must actually detach the stored files; returning
    /// `Ok` tells the service the claim no longer owns restricted children.
    async fn release(&self, claim_id: Uuid) -> Result<()>;
}

/// No-op store for installations where documents are managed elsewhere
pub struct NoOpDocumentStore;

#[async_trait]
impl DocumentStore for NoOpDocumentStore {
    async fn release(&self, _claim_id: Uuid) -> Result<()> {
        Ok(())
    }
}
