//! Reconciliation engine - maps a sparse nested patch onto the persisted
//! claim graph.
//!
//! The engine is pure: it loads nothing and writes nothing. Given the
//! existing graph (or `None` for a new root) and an inbound patch, it
//! produces an explicit [`ClaimChangeSet`] of insert/update rows that the
//! storage layer applies inside a single transaction. Keeping the diff out
//! of the store makes every decision testable in isolation.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::UnmatchedPolicy;
use crate::contract::error::ClaimsError;
use crate::contract::model::{
    Appeal, Claim, ClientClaim, Damage, Decision, Driver, Participant, ParticipantRole, Recourse,
    Settlement,
};
use crate::contract::patch::{
    AppealPatch, ClaimPatch, ClientClaimPatch, DamagePatch, DecisionPatch, DriverPatch,
    ParticipantPatch, Patch, RecoursePatch, SettlementPatch,
};

/// A single row-level decision made by the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Insert(T),
    Update(T),
}

impl<T> Change<T> {
    pub fn record(&self) -> &T {
        match self {
            Change::Insert(record) | Change::Update(record) => record,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Change::Insert(record) | Change::Update(record) => record,
        }
    }

    pub fn record_mut(&mut self) -> &mut T {
        match self {
            Change::Insert(record) | Change::Update(record) => record,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Change::Insert(_))
    }
}

/// Outcome of one collection pass: the rows to write, in patch order, and
/// the ids of unmatched existing children to delete when the configured
/// policy says so (empty under `LeaveUntouched`).
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<C> {
    pub changes: Vec<Change<C>>,
    pub stale_ids: Vec<Uuid>,
}

impl<C> Default for Reconciled<C> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            stale_ids: Vec::new(),
        }
    }
}

impl<C> Reconciled<C> {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.stale_ids.is_empty()
    }
}

/// Everything one `save` call writes. The root change is always present so
/// its `updated_at` moves even when only a nested child changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimChangeSet {
    pub claim_id: Uuid,
    pub root: Change<Claim>,
    pub participants: Reconciled<Participant>,
    pub drivers: Reconciled<Driver>,
    pub damages: Reconciled<Damage>,
    pub decisions: Reconciled<Decision>,
    pub recourses: Reconciled<Recourse>,
    pub settlements: Reconciled<Settlement>,
    pub appeals: Reconciled<Appeal>,
    pub client_claims: Reconciled<ClientClaim>,
}

/// Generic collection reconciler. A patch whose identity matches an existing
/// child becomes an update of that child; anything else becomes an insert
/// with the client-supplied identity or a fresh one. Changes come out in
/// first-occurrence patch order; a repeated identity folds onto the change
/// already produced for it, so later fields accumulate instead of resetting
/// to the persisted snapshot (and one row change per id is emitted).
pub fn reconcile_children<C, P>(
    existing: &[C],
    patches: Vec<P>,
    policy: UnmatchedPolicy,
    child_id: impl Fn(&C) -> Uuid,
    patch_id: impl Fn(&P) -> Option<Uuid>,
    insert: impl FnMut(Uuid, P) -> C,
    update: impl FnMut(&mut C, P),
) -> Reconciled<C>
where
    C: Clone,
{
    reconcile_children_indexed(existing, patches, policy, child_id, patch_id, insert, update).0
}

/// As [`reconcile_children`], but also returns, per input patch, the index
/// of the change it landed on. Callers with nested collections use the
/// mapping to stay aligned when repeated identities fold.
#[allow(clippy::too_many_arguments)]
fn reconcile_children_indexed<C, P>(
    existing: &[C],
    patches: Vec<P>,
    policy: UnmatchedPolicy,
    child_id: impl Fn(&C) -> Uuid,
    patch_id: impl Fn(&P) -> Option<Uuid>,
    mut insert: impl FnMut(Uuid, P) -> C,
    mut update: impl FnMut(&mut C, P),
) -> (Reconciled<C>, Vec<usize>)
where
    C: Clone,
{
    let mut produced: HashMap<Uuid, usize> = HashMap::new();
    let mut changes: Vec<Change<C>> = Vec::with_capacity(patches.len());
    let mut mapping = Vec::with_capacity(patches.len());

    for patch in patches {
        if let Some(id) = patch_id(&patch) {
            if let Some(&index) = produced.get(&id) {
                update(changes[index].record_mut(), patch);
                mapping.push(index);
                continue;
            }
            if let Some(child) = existing.iter().find(|child| child_id(child) == id) {
                let mut updated = child.clone();
                update(&mut updated, patch);
                produced.insert(id, changes.len());
                mapping.push(changes.len());
                changes.push(Change::Update(updated));
                continue;
            }
        }
        let id = patch_id(&patch).unwrap_or_else(Uuid::new_v4);
        produced.insert(id, changes.len());
        mapping.push(changes.len());
        changes.push(Change::Insert(insert(id, patch)));
    }

    let stale_ids = match policy {
        UnmatchedPolicy::LeaveUntouched => Vec::new(),
        UnmatchedPolicy::Delete => existing
            .iter()
            .map(&child_id)
            .filter(|id| !produced.contains_key(id))
            .collect(),
    };

    (Reconciled { changes, stale_ids }, mapping)
}

/// Diff the inbound patch against the persisted graph. `existing` is `None`
/// when the root id is unknown, in which case the root row is inserted
/// (upsert-by-id) and every submitted child becomes an insert.
pub fn reconcile_claim(
    existing: Option<&Claim>,
    mut patch: ClaimPatch,
    policy: UnmatchedPolicy,
    now: DateTime<Utc>,
) -> Result<ClaimChangeSet, ClaimsError> {
    let participant_patches = patch.participants.take();
    let damage_patches = patch.damages.take();
    let decision_patches = patch.decisions.take();
    let recourse_patches = patch.recourses.take();
    let settlement_patches = patch.settlements.take();
    let appeal_patches = patch.appeals.take();
    let client_claim_patches = patch.client_claims.take();

    // The settlement amount is required; an explicit null is a client
    // mistake, not a clear, and must not silently no-op.
    if let Some(patches) = &settlement_patches {
        if patches.iter().any(|p| matches!(p.amount, Patch::Clear)) {
            return Err(ClaimsError::Validation {
                message: "settlement amount cannot be cleared".to_string(),
            });
        }
    }

    let root = apply_root(existing, patch, now)?;
    let claim_id = root.record().id;

    let (participants, drivers) = reconcile_participants(
        existing.map(|c| c.participants.as_slice()).unwrap_or(&[]),
        participant_patches,
        claim_id,
        policy,
        now,
    );

    let damages = reconcile_flat(
        existing.map(|c| c.damages.as_slice()).unwrap_or(&[]),
        damage_patches,
        policy,
        |d: &Damage| d.id,
        |p: &DamagePatch| p.id,
        |id, p| {
            let mut damage = blank_damage(id, claim_id, now);
            patch_damage(&mut damage, p, now);
            damage
        },
        |damage, p| patch_damage(damage, p, now),
    );

    let decisions = reconcile_flat(
        existing.map(|c| c.decisions.as_slice()).unwrap_or(&[]),
        decision_patches,
        policy,
        |d: &Decision| d.id,
        |p: &DecisionPatch| p.id,
        |id, p| {
            let mut decision = blank_decision(id, claim_id, now);
            patch_decision(&mut decision, p, now);
            decision
        },
        |decision, p| patch_decision(decision, p, now),
    );

    let recourses = reconcile_flat(
        existing.map(|c| c.recourses.as_slice()).unwrap_or(&[]),
        recourse_patches,
        policy,
        |r: &Recourse| r.id,
        |p: &RecoursePatch| p.id,
        |id, p| {
            let mut recourse = blank_recourse(id, claim_id, now);
            patch_recourse(&mut recourse, p, now);
            recourse
        },
        |recourse, p| patch_recourse(recourse, p, now),
    );

    let settlements = reconcile_flat(
        existing.map(|c| c.settlements.as_slice()).unwrap_or(&[]),
        settlement_patches,
        policy,
        |s: &Settlement| s.id,
        |p: &SettlementPatch| p.id,
        |id, p| {
            let mut settlement = blank_settlement(id, claim_id, now);
            patch_settlement(&mut settlement, p, now);
            settlement
        },
        |settlement, p| patch_settlement(settlement, p, now),
    );

    let appeals = reconcile_flat(
        existing.map(|c| c.appeals.as_slice()).unwrap_or(&[]),
        appeal_patches,
        policy,
        |a: &Appeal| a.id,
        |p: &AppealPatch| p.id,
        |id, p| {
            let mut appeal = blank_appeal(id, claim_id, now);
            patch_appeal(&mut appeal, p, now);
            appeal
        },
        |appeal, p| patch_appeal(appeal, p, now),
    );

    let client_claims = reconcile_flat(
        existing.map(|c| c.client_claims.as_slice()).unwrap_or(&[]),
        client_claim_patches,
        policy,
        |c: &ClientClaim| c.id,
        |p: &ClientClaimPatch| p.id,
        |id, p| {
            let mut client_claim = blank_client_claim(id, claim_id, now);
            patch_client_claim(&mut client_claim, p, now);
            client_claim
        },
        |client_claim, p| patch_client_claim(client_claim, p, now),
    );

    Ok(ClaimChangeSet {
        claim_id,
        root,
        participants,
        drivers,
        damages,
        decisions,
        recourses,
        settlements,
        appeals,
        client_claims,
    })
}

/// Root upsert. New roots take the client-supplied id when given; existing
/// roots get a sparse scalar copy and an `updated_at` strictly greater than
/// the prior value.
fn apply_root(
    existing: Option<&Claim>,
    patch: ClaimPatch,
    now: DateTime<Utc>,
) -> Result<Change<Claim>, ClaimsError> {
    match existing {
        None => {
            let id = patch.id.unwrap_or_else(Uuid::new_v4);
            let mut claim = Claim::new(id, now);
            // Initial status is taken as-is; the transition table only
            // constrains changes to an already-persisted root.
            if let Some(status) = patch.status {
                claim.status = status;
            }
            copy_root_scalars(&mut claim, patch);
            Ok(Change::Insert(claim))
        }
        Some(current) => {
            let mut claim = current.clone();
            // The change set carries the root row only.
            claim.participants.clear();
            claim.damages.clear();
            claim.decisions.clear();
            claim.recourses.clear();
            claim.settlements.clear();
            claim.appeals.clear();
            claim.client_claims.clear();
            claim.documents.clear();
            claim.notes.clear();

            if let Some(next) = patch.status {
                if !claim.status.can_transition_to(next) {
                    return Err(ClaimsError::Validation {
                        message: format!(
                            "claim status cannot move from {} to {}",
                            claim.status.as_str(),
                            next.as_str()
                        ),
                    });
                }
                claim.status = next;
            }
            copy_root_scalars(&mut claim, patch);
            claim.updated_at = next_stamp(now, current.updated_at);
            Ok(Change::Update(claim))
        }
    }
}

fn copy_root_scalars(claim: &mut Claim, patch: ClaimPatch) {
    if let Some(is_draft) = patch.is_draft {
        claim.is_draft = is_draft;
    }
    patch.claim_number.apply_to(&mut claim.claim_number);
    patch.case_handler_id.apply_to(&mut claim.case_handler_id);
    patch.registered_by_id.apply_to(&mut claim.registered_by_id);
    patch.owner_name.apply_to(&mut claim.owner_name);
    patch
        .correspondence_email
        .apply_to(&mut claim.correspondence_email);
    patch.policy_number.apply_to(&mut claim.policy_number);
    patch
        .vehicle_registration
        .apply_to(&mut claim.vehicle_registration);
    patch.place_of_accident.apply_to(&mut claim.place_of_accident);
    patch.description.apply_to(&mut claim.description);
    patch.date_of_accident.apply_to(&mut claim.date_of_accident);
    patch.reserve_amount.apply_to(&mut claim.reserve_amount);
}

/// Participants recurse one level: after each participant is resolved
/// (matched or inserted), its nested driver list goes through the same
/// algorithm with the claim id and the resolved participant id propagated
/// onto every driver row.
fn reconcile_participants(
    existing: &[Participant],
    patches: Option<Vec<ParticipantPatch>>,
    claim_id: Uuid,
    policy: UnmatchedPolicy,
    now: DateTime<Utc>,
) -> (Reconciled<Participant>, Reconciled<Driver>) {
    let Some(patches) = patches else {
        return (Reconciled::default(), Reconciled::default());
    };

    // Split the nested driver lists off first; the index mapping ties each
    // list back to the change its participant patch landed on, even when a
    // repeated participant id folds two patches onto one change.
    let mut nested: Vec<Option<Vec<DriverPatch>>> = Vec::with_capacity(patches.len());
    let patches: Vec<ParticipantPatch> = patches
        .into_iter()
        .map(|mut patch| {
            nested.push(patch.drivers.take());
            patch
        })
        .collect();

    let (participants, mapping) = reconcile_children_indexed(
        existing,
        patches,
        policy,
        |p: &Participant| p.id,
        |p: &ParticipantPatch| p.id,
        |id, p| {
            let mut participant = blank_participant(id, claim_id, now);
            patch_participant(&mut participant, p, now);
            participant
        },
        |participant, p| {
            // Change-set rows never carry nested collections.
            participant.drivers.clear();
            patch_participant(participant, p, now);
        },
    );

    let mut nested_by_change: Vec<Option<Vec<DriverPatch>>> =
        (0..participants.changes.len()).map(|_| None).collect();
    for (patch_index, driver_patches) in nested.into_iter().enumerate() {
        if let Some(driver_patches) = driver_patches {
            nested_by_change[mapping[patch_index]]
                .get_or_insert_with(Vec::new)
                .extend(driver_patches);
        }
    }

    let mut drivers = Reconciled::default();
    for (change, driver_patches) in participants.changes.iter().zip(nested_by_change) {
        let Some(driver_patches) = driver_patches else {
            continue;
        };
        let participant_id = change.record().id;
        let existing_drivers: &[Driver] = match change {
            Change::Insert(_) => &[],
            Change::Update(participant) => existing
                .iter()
                .find(|p| p.id == participant.id)
                .map(|p| p.drivers.as_slice())
                .unwrap_or(&[]),
        };
        let reconciled = reconcile_children(
            existing_drivers,
            driver_patches,
            policy,
            |d: &Driver| d.id,
            |p: &DriverPatch| p.id,
            |id, p| {
                let mut driver = blank_driver(id, claim_id, participant_id, now);
                patch_driver(&mut driver, p, now);
                driver
            },
            |driver, p| {
                // Keep the denormalized ids consistent with the owner.
                driver.claim_id = claim_id;
                driver.participant_id = participant_id;
                patch_driver(driver, p, now);
            },
        );
        drivers.changes.extend(reconciled.changes);
        drivers.stale_ids.extend(reconciled.stale_ids);
    }

    // A participant removed under the delete policy takes its drivers along.
    for stale_id in &participants.stale_ids {
        if let Some(participant) = existing.iter().find(|p| p.id == *stale_id) {
            drivers
                .stale_ids
                .extend(participant.drivers.iter().map(|d| d.id));
        }
    }

    (participants, drivers)
}

#[allow(clippy::too_many_arguments)]
fn reconcile_flat<C, P>(
    existing: &[C],
    patches: Option<Vec<P>>,
    policy: UnmatchedPolicy,
    child_id: impl Fn(&C) -> Uuid,
    patch_id: impl Fn(&P) -> Option<Uuid>,
    insert: impl FnMut(Uuid, P) -> C,
    update: impl FnMut(&mut C, P),
) -> Reconciled<C>
where
    C: Clone,
{
    match patches {
        None => Reconciled::default(),
        Some(patches) => {
            reconcile_children(existing, patches, policy, child_id, patch_id, insert, update)
        }
    }
}

/// `updated_at` must strictly increase; bump past the prior value when the
/// clock has not advanced between two saves.
fn next_stamp(now: DateTime<Utc>, prior: DateTime<Utc>) -> DateTime<Utc> {
    if now > prior {
        now
    } else {
        prior + Duration::microseconds(1)
    }
}

// ===== Per-kind blanks and patch appliers =====

fn blank_participant(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Participant {
    Participant {
        id,
        claim_id,
        role: ParticipantRole::Other,
        first_name: None,
        last_name: None,
        email: None,
        phone: None,
        address: None,
        vehicle_make: None,
        vehicle_registration: None,
        policy_number: None,
        policy_deal_date: None,
        policy_start_date: None,
        policy_end_date: None,
        policy_sum_amount: None,
        created_at: now,
        updated_at: now,
        drivers: Vec::new(),
    }
}

fn patch_participant(participant: &mut Participant, patch: ParticipantPatch, now: DateTime<Utc>) {
    if let Some(role) = patch.role {
        participant.role = role;
    }
    patch.first_name.apply_to(&mut participant.first_name);
    patch.last_name.apply_to(&mut participant.last_name);
    patch.email.apply_to(&mut participant.email);
    patch.phone.apply_to(&mut participant.phone);
    patch.address.apply_to(&mut participant.address);
    patch.vehicle_make.apply_to(&mut participant.vehicle_make);
    patch
        .vehicle_registration
        .apply_to(&mut participant.vehicle_registration);
    patch.policy_number.apply_to(&mut participant.policy_number);
    patch
        .policy_deal_date
        .apply_to(&mut participant.policy_deal_date);
    patch
        .policy_start_date
        .apply_to(&mut participant.policy_start_date);
    patch
        .policy_end_date
        .apply_to(&mut participant.policy_end_date);
    patch
        .policy_sum_amount
        .apply_to(&mut participant.policy_sum_amount);
    participant.updated_at = now;
}

fn blank_driver(id: Uuid, claim_id: Uuid, participant_id: Uuid, now: DateTime<Utc>) -> Driver {
    Driver {
        id,
        claim_id,
        participant_id,
        first_name: None,
        last_name: None,
        email: None,
        phone: None,
        license_number: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_driver(driver: &mut Driver, patch: DriverPatch, now: DateTime<Utc>) {
    patch.first_name.apply_to(&mut driver.first_name);
    patch.last_name.apply_to(&mut driver.last_name);
    patch.email.apply_to(&mut driver.email);
    patch.phone.apply_to(&mut driver.phone);
    patch.license_number.apply_to(&mut driver.license_number);
    driver.updated_at = now;
}

fn blank_damage(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Damage {
    Damage {
        id,
        claim_id,
        description: None,
        amount: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_damage(damage: &mut Damage, patch: DamagePatch, now: DateTime<Utc>) {
    patch.description.apply_to(&mut damage.description);
    patch.amount.apply_to(&mut damage.amount);
    patch.document_path.apply_to(&mut damage.document_path);
    patch.document_name.apply_to(&mut damage.document_name);
    patch
        .document_description
        .apply_to(&mut damage.document_description);
    damage.updated_at = now;
}

fn blank_decision(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Decision {
    Decision {
        id,
        claim_id,
        decision_number: None,
        decision_date: None,
        amount: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_decision(decision: &mut Decision, patch: DecisionPatch, now: DateTime<Utc>) {
    patch.decision_number.apply_to(&mut decision.decision_number);
    patch.decision_date.apply_to(&mut decision.decision_date);
    patch.amount.apply_to(&mut decision.amount);
    patch.document_path.apply_to(&mut decision.document_path);
    patch.document_name.apply_to(&mut decision.document_name);
    patch
        .document_description
        .apply_to(&mut decision.document_description);
    decision.updated_at = now;
}

fn blank_recourse(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Recourse {
    Recourse {
        id,
        claim_id,
        recourse_date: None,
        amount: None,
        basis: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_recourse(recourse: &mut Recourse, patch: RecoursePatch, now: DateTime<Utc>) {
    patch.recourse_date.apply_to(&mut recourse.recourse_date);
    patch.amount.apply_to(&mut recourse.amount);
    patch.basis.apply_to(&mut recourse.basis);
    patch.document_path.apply_to(&mut recourse.document_path);
    patch.document_name.apply_to(&mut recourse.document_name);
    patch
        .document_description
        .apply_to(&mut recourse.document_description);
    recourse.updated_at = now;
}

fn blank_settlement(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Settlement {
    Settlement {
        id,
        claim_id,
        amount: rust_decimal::Decimal::ZERO,
        currency: None,
        settlement_date: None,
        client_claim_id: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_settlement(settlement: &mut Settlement, patch: SettlementPatch, now: DateTime<Utc>) {
    patch.amount.apply_to_required(&mut settlement.amount);
    patch.currency.apply_to(&mut settlement.currency);
    patch.settlement_date.apply_to(&mut settlement.settlement_date);
    patch
        .client_claim_id
        .apply_to(&mut settlement.client_claim_id);
    patch.document_path.apply_to(&mut settlement.document_path);
    patch.document_name.apply_to(&mut settlement.document_name);
    patch
        .document_description
        .apply_to(&mut settlement.document_description);
    settlement.updated_at = now;
}

fn blank_appeal(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> Appeal {
    Appeal {
        id,
        claim_id,
        appeal_date: None,
        court_name: None,
        notes: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_appeal(appeal: &mut Appeal, patch: AppealPatch, now: DateTime<Utc>) {
    patch.appeal_date.apply_to(&mut appeal.appeal_date);
    patch.court_name.apply_to(&mut appeal.court_name);
    patch.notes.apply_to(&mut appeal.notes);
    patch.document_path.apply_to(&mut appeal.document_path);
    patch.document_name.apply_to(&mut appeal.document_name);
    patch
        .document_description
        .apply_to(&mut appeal.document_description);
    appeal.updated_at = now;
}

fn blank_client_claim(id: Uuid, claim_id: Uuid, now: DateTime<Utc>) -> ClientClaim {
    ClientClaim {
        id,
        claim_id,
        claim_number: None,
        amount: None,
        status_note: None,
        document_path: None,
        document_name: None,
        document_description: None,
        created_at: now,
        updated_at: now,
    }
}

fn patch_client_claim(client_claim: &mut ClientClaim, patch: ClientClaimPatch, now: DateTime<Utc>) {
    patch.claim_number.apply_to(&mut client_claim.claim_number);
    patch.amount.apply_to(&mut client_claim.amount);
    patch.status_note.apply_to(&mut client_claim.status_note);
    patch.document_path.apply_to(&mut client_claim.document_path);
    patch.document_name.apply_to(&mut client_claim.document_name);
    patch
        .document_description
        .apply_to(&mut client_claim.document_description);
    client_claim.updated_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::ClaimStatus;
    use crate::contract::patch::Patch;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn existing_claim() -> Claim {
        let stamp = now();
        let mut claim = Claim::new(Uuid::new_v4(), stamp);
        claim.status = ClaimStatus::Registered;
        claim.owner_name = Some("Jovan Ilić".to_string());

        let mut participant = blank_participant(Uuid::new_v4(), claim.id, stamp);
        participant.first_name = Some("Mira".to_string());
        participant
            .drivers
            .push(blank_driver(Uuid::new_v4(), claim.id, participant.id, stamp));
        claim.participants.push(participant);

        let mut damage = blank_damage(Uuid::new_v4(), claim.id, stamp);
        damage.description = Some("old".to_string());
        claim.damages.push(damage);
        claim
    }

    #[test]
    fn unknown_root_id_becomes_an_insert_with_that_id() {
        let id = Uuid::new_v4();
        let patch = ClaimPatch {
            id: Some(id),
            ..Default::default()
        };
        let change_set =
            reconcile_claim(None, patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert!(change_set.root.is_insert());
        assert_eq!(change_set.claim_id, id);
    }

    #[test]
    fn matched_child_id_becomes_an_update_with_patched_fields() {
        let claim = existing_claim();
        let damage_id = claim.damages[0].id;
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![DamagePatch {
                id: Some(damage_id),
                description: Patch::Set("new".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert_eq!(change_set.damages.changes.len(), 1);
        let change = &change_set.damages.changes[0];
        assert!(!change.is_insert());
        assert_eq!(change.record().id, damage_id);
        assert_eq!(change.record().description.as_deref(), Some("new"));
    }

    #[test]
    fn unmatched_child_id_falls_back_to_insert() {
        let claim = existing_claim();
        let stray_id = Uuid::new_v4();
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![DamagePatch {
                id: Some(stray_id),
                description: Patch::Set("fresh".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        let change = &change_set.damages.changes[0];
        assert!(change.is_insert());
        assert_eq!(change.record().id, stray_id);
        assert_eq!(change.record().claim_id, claim.id);
    }

    #[test]
    fn unmatched_existing_children_are_left_untouched_by_default() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![DamagePatch::default()]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert!(change_set.damages.stale_ids.is_empty());
    }

    #[test]
    fn delete_policy_collects_unmatched_children() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::Delete, now()).unwrap();
        assert_eq!(change_set.damages.stale_ids, vec![claim.damages[0].id]);
    }

    #[test]
    fn absent_collection_is_never_reconciled() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            ..Default::default()
        };

        // Even under the delete policy an absent list means "not edited".
        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::Delete, now()).unwrap();
        assert!(change_set.damages.is_empty());
        assert!(change_set.participants.is_empty());
    }

    #[test]
    fn new_driver_under_matched_participant_gets_both_parent_ids() {
        let claim = existing_claim();
        let participant_id = claim.participants[0].id;
        let patch = ClaimPatch {
            id: Some(claim.id),
            participants: Some(vec![ParticipantPatch {
                id: Some(participant_id),
                drivers: Some(vec![DriverPatch {
                    first_name: Patch::Set("Luka".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert_eq!(change_set.drivers.changes.len(), 1);
        let driver = change_set.drivers.changes[0].record();
        assert_eq!(driver.claim_id, claim.id);
        assert_eq!(driver.participant_id, participant_id);
        assert_eq!(driver.first_name.as_deref(), Some("Luka"));
    }

    #[test]
    fn drivers_under_inserted_participant_share_its_fresh_id() {
        let patch = ClaimPatch {
            participants: Some(vec![ParticipantPatch {
                drivers: Some(vec![DriverPatch::default(), DriverPatch::default()]),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(None, patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        let participant_id = change_set.participants.changes[0].record().id;
        assert_eq!(change_set.drivers.changes.len(), 2);
        for change in &change_set.drivers.changes {
            assert!(change.is_insert());
            assert_eq!(change.record().participant_id, participant_id);
            assert_eq!(change.record().claim_id, change_set.claim_id);
        }
    }

    #[test]
    fn matched_driver_keeps_denormalized_claim_id_consistent() {
        let mut claim = existing_claim();
        // Simulate drifted denormalization in stored data.
        claim.participants[0].drivers[0].claim_id = Uuid::new_v4();
        let participant_id = claim.participants[0].id;
        let driver_id = claim.participants[0].drivers[0].id;

        let patch = ClaimPatch {
            id: Some(claim.id),
            participants: Some(vec![ParticipantPatch {
                id: Some(participant_id),
                drivers: Some(vec![DriverPatch {
                    id: Some(driver_id),
                    phone: Patch::Set("+381641234567".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        let driver = change_set.drivers.changes[0].record();
        assert_eq!(driver.id, driver_id);
        assert_eq!(driver.claim_id, claim.id);
    }

    #[test]
    fn root_updated_at_strictly_increases_even_for_child_only_patches() {
        let claim = existing_claim();
        let prior = claim.updated_at;
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![DamagePatch {
                id: Some(claim.damages[0].id),
                description: Patch::Set("new".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        // Frozen clock: the stamp must still move past the prior value.
        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, prior).unwrap();
        assert!(change_set.root.record().updated_at > prior);
    }

    #[test]
    fn sparse_root_patch_leaves_absent_fields_alone() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            description: Patch::Set("rear-end collision".to_string()),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        let root = change_set.root.record();
        assert_eq!(root.owner_name.as_deref(), Some("Jovan Ilić"));
        assert_eq!(root.description.as_deref(), Some("rear-end collision"));
    }

    #[test]
    fn explicit_null_clears_a_root_field() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            owner_name: Patch::Clear,
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert_eq!(change_set.root.record().owner_name, None);
    }

    #[test]
    fn invalid_status_transition_is_rejected() {
        let claim = existing_claim(); // Registered
        let patch = ClaimPatch {
            id: Some(claim.id),
            status: Some(ClaimStatus::Closed),
            ..Default::default()
        };

        let result = reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now());
        assert!(matches!(result, Err(ClaimsError::Validation { .. })));
    }

    #[test]
    fn deleted_participant_takes_its_drivers_along() {
        let claim = existing_claim();
        let driver_id = claim.participants[0].drivers[0].id;
        let patch = ClaimPatch {
            id: Some(claim.id),
            participants: Some(vec![]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::Delete, now()).unwrap();
        assert_eq!(change_set.participants.stale_ids, vec![claim.participants[0].id]);
        assert_eq!(change_set.drivers.stale_ids, vec![driver_id]);
    }

    #[test]
    fn repeated_child_id_folds_onto_a_single_change() {
        let claim = existing_claim();
        let damage_id = claim.damages[0].id;
        let patch = ClaimPatch {
            id: Some(claim.id),
            damages: Some(vec![
                DamagePatch {
                    id: Some(damage_id),
                    description: Patch::Set("dented door".to_string()),
                    ..Default::default()
                },
                DamagePatch {
                    id: Some(damage_id),
                    amount: Patch::Set(rust_decimal::Decimal::new(450, 0)),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        // Both patches land on one update, the second layered over the first.
        assert_eq!(change_set.damages.changes.len(), 1);
        let damage = change_set.damages.changes[0].record();
        assert_eq!(damage.description.as_deref(), Some("dented door"));
        assert_eq!(damage.amount, Some(rust_decimal::Decimal::new(450, 0)));
    }

    #[test]
    fn repeated_client_supplied_id_yields_a_single_insert() {
        let damage_id = Uuid::new_v4();
        let patch = ClaimPatch {
            damages: Some(vec![
                DamagePatch {
                    id: Some(damage_id),
                    description: Patch::Set("scratch".to_string()),
                    ..Default::default()
                },
                DamagePatch {
                    id: Some(damage_id),
                    amount: Patch::Set(rust_decimal::Decimal::new(90, 0)),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(None, patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert_eq!(change_set.damages.changes.len(), 1);
        let change = &change_set.damages.changes[0];
        assert!(change.is_insert());
        assert_eq!(change.record().description.as_deref(), Some("scratch"));
        assert_eq!(change.record().amount, Some(rust_decimal::Decimal::new(90, 0)));
    }

    #[test]
    fn drivers_of_folded_participant_patches_stay_under_their_parent() {
        let claim = existing_claim();
        let participant_id = claim.participants[0].id;
        let patch = ClaimPatch {
            id: Some(claim.id),
            participants: Some(vec![
                ParticipantPatch {
                    id: Some(participant_id),
                    drivers: Some(vec![DriverPatch {
                        first_name: Patch::Set("Luka".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
                ParticipantPatch {
                    id: Some(participant_id),
                    drivers: Some(vec![DriverPatch {
                        first_name: Patch::Set("Sara".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let change_set =
            reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now()).unwrap();
        assert_eq!(change_set.participants.changes.len(), 1);
        // Both driver lists reconcile against the same parent.
        assert_eq!(change_set.drivers.changes.len(), 2);
        for change in &change_set.drivers.changes {
            assert_eq!(change.record().participant_id, participant_id);
        }
    }

    #[test]
    fn clearing_a_settlement_amount_is_rejected() {
        let claim = existing_claim();
        let patch = ClaimPatch {
            id: Some(claim.id),
            settlements: Some(vec![SettlementPatch {
                amount: Patch::Clear,
                ..Default::default()
            }]),
            ..Default::default()
        };

        let result = reconcile_claim(Some(&claim), patch, UnmatchedPolicy::LeaveUntouched, now());
        assert!(matches!(result, Err(ClaimsError::Validation { .. })));
    }
}
