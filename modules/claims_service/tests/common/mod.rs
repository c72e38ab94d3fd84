//! Shared fixtures and in-memory collaborators for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use claims_service::config::Config;
use claims_service::contract::model::Claim;
use claims_service::contract::patch::ClaimPatch;
use claims_service::domain::documents::{DocumentStore, NoOpDocumentStore};
use claims_service::domain::filter::{self, ClaimFilter, ClaimSummary, Page, PageRequest};
use claims_service::domain::reconcile::{Change, ClaimChangeSet, Reconciled};
use claims_service::domain::repository::ClaimsRepository;
use claims_service::domain::search::SearchIndex;
use claims_service::domain::service::ClaimsService;

/// In-memory claims store. Change sets are applied onto full claim graphs
/// the same way the SQL repository applies them onto rows, and listing
/// delegates to the pure filter evaluation.
#[derive(Clone)]
pub struct MockClaimsRepo {
    claims: Arc<RwLock<HashMap<Uuid, Claim>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MockClaimsRepo {
    pub fn new() -> Self {
        Self {
            claims: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(RwLock::new(false)),
        }
    }

    /// Seed a claim graph directly, bypassing the save pipeline.
    pub fn seed(&self, claim: Claim) {
        self.claims.write().insert(claim.id, claim);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    pub fn count(&self) -> usize {
        self.claims.read().len()
    }

    /// Detach every document and note from the claim, the way an external
    /// document store would.
    pub fn clear_restricted_children(&self, claim_id: Uuid) {
        if let Some(claim) = self.claims.write().get_mut(&claim_id) {
            claim.documents.clear();
            claim.notes.clear();
        }
    }
}

fn apply_rows<T: Clone>(
    rows: &mut Vec<T>,
    reconciled: Reconciled<T>,
    id_of: impl Fn(&T) -> Uuid,
) {
    for change in reconciled.changes {
        match change {
            Change::Insert(row) => rows.push(row),
            Change::Update(row) => {
                if let Some(slot) = rows.iter_mut().find(|r| id_of(r) == id_of(&row)) {
                    *slot = row;
                }
            }
        }
    }
    rows.retain(|row| !reconciled.stale_ids.contains(&id_of(row)));
}

#[async_trait]
impl ClaimsRepository for MockClaimsRepo {
    async fn load(&self, id: Uuid) -> Result<Option<Claim>> {
        Ok(self.claims.read().get(&id).cloned())
    }

    async fn apply(&self, change_set: ClaimChangeSet) -> Result<()> {
        if *self.fail_writes.read() {
            bail!("simulated storage failure");
        }

        let mut store = self.claims.write();

        // Root record carries empty child collections; carry the stored
        // ones over before applying the per-collection changes.
        let mut claim = change_set.root.record().clone();
        if let Some(previous) = store.remove(&change_set.claim_id) {
            claim.participants = previous.participants;
            claim.damages = previous.damages;
            claim.decisions = previous.decisions;
            claim.recourses = previous.recourses;
            claim.settlements = previous.settlements;
            claim.appeals = previous.appeals;
            claim.client_claims = previous.client_claims;
            claim.documents = previous.documents;
            claim.notes = previous.notes;
        }

        // Participant updates carry empty driver lists; drivers are applied
        // through their own collection below.
        for change in change_set.participants.changes {
            match change {
                Change::Insert(participant) => claim.participants.push(participant),
                Change::Update(participant) => {
                    if let Some(slot) = claim
                        .participants
                        .iter_mut()
                        .find(|p| p.id == participant.id)
                    {
                        let drivers = std::mem::take(&mut slot.drivers);
                        *slot = participant;
                        slot.drivers = drivers;
                    }
                }
            }
        }
        claim
            .participants
            .retain(|p| !change_set.participants.stale_ids.contains(&p.id));

        for change in change_set.drivers.changes {
            match change {
                Change::Insert(driver) => {
                    let parent = claim
                        .participants
                        .iter_mut()
                        .find(|p| p.id == driver.participant_id)
                        .ok_or_else(|| anyhow!("driver parent missing"))?;
                    parent.drivers.push(driver);
                }
                Change::Update(driver) => {
                    for participant in &mut claim.participants {
                        if let Some(slot) =
                            participant.drivers.iter_mut().find(|d| d.id == driver.id)
                        {
                            *slot = driver;
                            break;
                        }
                    }
                }
            }
        }
        for participant in &mut claim.participants {
            participant
                .drivers
                .retain(|d| !change_set.drivers.stale_ids.contains(&d.id));
        }

        apply_rows(&mut claim.damages, change_set.damages, |d| d.id);
        apply_rows(&mut claim.decisions, change_set.decisions, |d| d.id);
        apply_rows(&mut claim.recourses, change_set.recourses, |r| r.id);
        apply_rows(&mut claim.settlements, change_set.settlements, |s| s.id);
        apply_rows(&mut claim.appeals, change_set.appeals, |a| a.id);
        apply_rows(&mut claim.client_claims, change_set.client_claims, |c| c.id);

        store.insert(claim.id, claim);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut store = self.claims.write();
        let claim = store.get(&id).ok_or_else(|| anyhow!("claim missing"))?;
        if !claim.documents.is_empty() || !claim.notes.is_empty() {
            bail!("claim {id} still has attached documents or notes");
        }
        store.remove(&id);
        Ok(())
    }

    async fn list(&self, filter: &ClaimFilter, page: &PageRequest) -> Result<Page<ClaimSummary>> {
        let claims: Vec<Claim> = self.claims.read().values().cloned().collect();
        Ok(filter::evaluate(&claims, filter, page))
    }
}

/// Search index that records calls and can be told to fail.
pub struct RecordingSearchIndex {
    pub indexed: RwLock<Vec<Uuid>>,
    pub removed: RwLock<Vec<Uuid>>,
    pub fail: bool,
}

impl RecordingSearchIndex {
    pub fn new() -> Self {
        Self {
            indexed: RwLock::new(Vec::new()),
            removed: RwLock::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl SearchIndex for RecordingSearchIndex {
    async fn index(&self, claim: &Claim) -> Result<()> {
        if self.fail {
            bail!("index backend unavailable");
        }
        self.indexed.write().push(claim.id);
        Ok(())
    }

    async fn search(&self, _phrase: &str) -> Result<Vec<Uuid>> {
        Ok(Vec::new())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        if self.fail {
            bail!("index backend unavailable");
        }
        self.removed.write().push(id);
        Ok(())
    }
}

/// Document store that actually detaches restricted children from the
/// backing repo, like a real storage collaborator would.
pub struct ClearingDocumentStore {
    repo: MockClaimsRepo,
}

impl ClearingDocumentStore {
    pub fn new(repo: MockClaimsRepo) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DocumentStore for ClearingDocumentStore {
    async fn release(&self, claim_id: Uuid) -> Result<()> {
        self.repo.clear_restricted_children(claim_id);
        Ok(())
    }
}

/// Document store that claims success without detaching anything.
pub struct StubDocumentStore;

#[async_trait]
impl DocumentStore for StubDocumentStore {
    async fn release(&self, _claim_id: Uuid) -> Result<()> {
        Ok(())
    }
}

pub fn service_with(
    repo: MockClaimsRepo,
    search_index: Arc<dyn SearchIndex>,
    document_store: Arc<dyn DocumentStore>,
    config: Config,
) -> ClaimsService {
    ClaimsService::new(Arc::new(repo), search_index, document_store, config)
}

pub fn default_service(repo: MockClaimsRepo) -> ClaimsService {
    service_with(
        repo,
        Arc::new(claims_service::domain::search::NoOpSearchIndex),
        Arc::new(NoOpDocumentStore),
        Config::default(),
    )
}

/// Build a patch from inline JSON, the way a request body would arrive.
pub fn patch(value: serde_json::Value) -> ClaimPatch {
    serde_json::from_value(value).expect("valid patch json")
}
