//! Search-index collaborator
//!
//! The backing index (Mongo, Postgres, SQL Server or none) is selected by
//! configuration outside this module; the core only sees these two calls.
//! Indexing runs best-effort after a successful save - failures are logged
//! and swallowed, never rolled back into the claim write.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::Claim;

/// Full-text index over persisted claims
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// (Re-)index a claim after it was written
    async fn index(&self, claim: &Claim) -> Result<()>;

    /// Resolve a free-text phrase to matching claim ids
    async fn search(&self, phrase: &str) -> Result<Vec<Uuid>>;

    /// Drop a claim from the index after deletion
    async fn remove(&self, id: Uuid) -> Result<()>;
}

/// No-op index for installations without a search backend
pub struct NoOpSearchIndex;

#[async_trait]
impl SearchIndex for NoOpSearchIndex {
    async fn index(&self, _claim: &Claim) -> Result<()> {
        Ok(())
    }

    async fn search(&self, _phrase: &str) -> Result<Vec<Uuid>> {
        Ok(Vec::new())
    }

    async fn remove(&self, _id: Uuid) -> Result<()> {
        Ok(())
    }
}
