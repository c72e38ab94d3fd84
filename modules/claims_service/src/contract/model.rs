//! Contract models for the claims service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models. The claim is an aggregate
//! root: deleting it cascades to every strongly-owned child collection, while
//! documents and notes are restricted children managed by an external
//! collaborator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Claim aggregate root with every owned collection materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub id: Uuid,
    /// Internal claim file number
    pub claim_number: Option<String>,
    /// Lifecycle state; transitions are validated against an explicit table
    pub status: ClaimStatus,
    /// Draft claims are not yet formally registered
    pub is_draft: bool,
    /// Assigned case handler (external user id)
    pub case_handler_id: Option<i64>,
    /// User who registered the claim (external user id)
    pub registered_by_id: Option<i64>,
    pub owner_name: Option<String>,
    pub correspondence_email: Option<String>,
    pub policy_number: Option<String>,
    pub vehicle_registration: Option<String>,
    pub place_of_accident: Option<String>,
    pub description: Option<String>,
    pub date_of_accident: Option<NaiveDate>,
    /// Reserved amount set aside for the claim
    pub reserve_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Strongly-owned children (cascade on delete)
    pub participants: Vec<Participant>,
    pub damages: Vec<Damage>,
    pub decisions: Vec<Decision>,
    pub recourses: Vec<Recourse>,
    pub settlements: Vec<Settlement>,
    pub appeals: Vec<Appeal>,
    pub client_claims: Vec<ClientClaim>,

    // Restricted children (never written by the save pipeline)
    pub documents: Vec<Document>,
    pub notes: Vec<Note>,
}

/// Closed set of claim lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Draft,
    Registered,
    InProgress,
    Resolved,
    Rejected,
    Closed,
}

impl ClaimStatus {
    /// Transition table for the claim lifecycle. Self-transitions are
    /// always allowed so that re-submitting a form section is a no-op.
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        use ClaimStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Draft, Registered)
                | (Registered, InProgress)
                | (Registered, Rejected)
                | (InProgress, Resolved)
                | (InProgress, Rejected)
                | (Resolved, Closed)
                | (Rejected, Closed)
                | (Closed, InProgress)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Draft => "DRAFT",
            ClaimStatus::Registered => "REGISTERED",
            ClaimStatus::InProgress => "IN_PROGRESS",
            ClaimStatus::Resolved => "RESOLVED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<ClaimStatus> {
        match s {
            "DRAFT" => Some(ClaimStatus::Draft),
            "REGISTERED" => Some(ClaimStatus::Registered),
            "IN_PROGRESS" => Some(ClaimStatus::InProgress),
            "RESOLVED" => Some(ClaimStatus::Resolved),
            "REJECTED" => Some(ClaimStatus::Rejected),
            "CLOSED" => Some(ClaimStatus::Closed),
            _ => None,
        }
    }
}

/// Role a participant plays in the accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    InjuredParty,
    AtFault,
    Other,
}

impl ParticipantRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantRole::InjuredParty => "INJURED_PARTY",
            ParticipantRole::AtFault => "AT_FAULT",
            ParticipantRole::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<ParticipantRole> {
        match s {
            "INJURED_PARTY" => Some(ParticipantRole::InjuredParty),
            "AT_FAULT" => Some(ParticipantRole::AtFault),
            "OTHER" => Some(ParticipantRole::Other),
            _ => None,
        }
    }
}

/// Party involved in the claim; owns its drivers.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub role: ParticipantRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_registration: Option<String>,
    pub policy_number: Option<String>,
    pub policy_deal_date: Option<NaiveDate>,
    pub policy_start_date: Option<NaiveDate>,
    pub policy_end_date: Option<NaiveDate>,
    pub policy_sum_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub drivers: Vec<Driver>,
}

/// Driver nested under a participant. `claim_id` denormalizes the owning
/// claim; the reconciliation engine keeps it equal to the participant's.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub participant_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Damage {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub decision_number: Option<String>,
    pub decision_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recourse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub recourse_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub basis: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Settlement paid out on the claim. `client_claim_id` is a weak reference
/// to a [`ClientClaim`] by identity value only - no foreign key is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub settlement_date: Option<NaiveDate>,
    pub client_claim_id: Option<Uuid>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appeal {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub appeal_date: Option<NaiveDate>,
    pub court_name: Option<String>,
    pub notes: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientClaim {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub claim_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status_note: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored document attached to a claim. Restricted child: the claim cannot
/// be deleted while documents exist, and the save pipeline never writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub path: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-form note on a claim. Restricted child, like [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Empty claim shell with the given id; used when creating a new root
    /// before any patch fields are applied.
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            claim_number: None,
            status: ClaimStatus::Draft,
            is_draft: true,
            case_handler_id: None,
            registered_by_id: None,
            owner_name: None,
            correspondence_email: None,
            policy_number: None,
            vehicle_registration: None,
            place_of_accident: None,
            description: None,
            date_of_accident: None,
            reserve_amount: None,
            created_at: now,
            updated_at: now,
            participants: Vec::new(),
            damages: Vec::new(),
            decisions: Vec::new(),
            recourses: Vec::new(),
            settlements: Vec::new(),
            appeals: Vec::new(),
            client_claims: Vec::new(),
            documents: Vec::new(),
            notes: Vec::new(),
        }
    }
}
