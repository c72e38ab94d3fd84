//! Sparse-patch request model
//!
//! The UI saves one form section at a time, so an update request carries only
//! the fields the client actually touched. [`Patch`] distinguishes the three
//! cases per field: key absent (keep the stored value), explicit null (clear
//! it), value (overwrite it). Child collections are optional lists; an absent
//! list leaves that collection untouched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::model::{ClaimStatus, ParticipantRole};

/// Tri-state field patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field was not present in the request; leave the stored value as-is.
    #[default]
    Keep,
    /// Field was present as an explicit null; clear the stored value.
    Clear,
    /// Field was present with a value; overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Apply this patch onto an optional field slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }

    /// Apply this patch onto a required field slot; `Clear` is ignored
    /// because the field has no empty state.
    pub fn apply_to_required(self, slot: &mut T) {
        if let Patch::Set(value) = self {
            *slot = value;
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

// Serde maps a present key through Option: null becomes Clear, a value
// becomes Set. An absent key never reaches this impl and falls back to the
// container-level default (Keep).
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Clear,
            Some(value) => Patch::Set(value),
        })
    }
}

/// Lenient identity parsing: child identities arrive as strings, and a
/// malformed one must turn the item into an insert rather than fail the
/// whole request. Plain UUID values are accepted too.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .and_then(|raw| Uuid::parse_str(&raw).ok()))
}

/// Root claim patch: scalar fields plus the optional child collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClaimPatch {
    /// Client-supplied root identity. An unknown id creates a new root with
    /// that id (upsert-by-id), a known id updates the existing root.
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub claim_number: Patch<String>,
    pub status: Option<ClaimStatus>,
    pub is_draft: Option<bool>,
    pub case_handler_id: Patch<i64>,
    pub registered_by_id: Patch<i64>,
    pub owner_name: Patch<String>,
    pub correspondence_email: Patch<String>,
    pub policy_number: Patch<String>,
    pub vehicle_registration: Patch<String>,
    pub place_of_accident: Patch<String>,
    pub description: Patch<String>,
    pub date_of_accident: Patch<NaiveDate>,
    pub reserve_amount: Patch<Decimal>,

    pub participants: Option<Vec<ParticipantPatch>>,
    pub damages: Option<Vec<DamagePatch>>,
    pub decisions: Option<Vec<DecisionPatch>>,
    pub recourses: Option<Vec<RecoursePatch>>,
    pub settlements: Option<Vec<SettlementPatch>>,
    pub appeals: Option<Vec<AppealPatch>>,
    pub client_claims: Option<Vec<ClientClaimPatch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub role: Option<ParticipantRole>,
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub address: Patch<String>,
    pub vehicle_make: Patch<String>,
    pub vehicle_registration: Patch<String>,
    pub policy_number: Patch<String>,
    pub policy_deal_date: Patch<NaiveDate>,
    pub policy_start_date: Patch<NaiveDate>,
    pub policy_end_date: Patch<NaiveDate>,
    pub policy_sum_amount: Patch<Decimal>,
    pub drivers: Option<Vec<DriverPatch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub license_number: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DamagePatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub description: Patch<String>,
    pub amount: Patch<Decimal>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecisionPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub decision_number: Patch<String>,
    pub decision_date: Patch<NaiveDate>,
    pub amount: Patch<Decimal>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecoursePatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub recourse_date: Patch<NaiveDate>,
    pub amount: Patch<Decimal>,
    pub basis: Patch<String>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettlementPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub amount: Patch<Decimal>,
    pub currency: Patch<String>,
    pub settlement_date: Patch<NaiveDate>,
    /// Weak reference to a client claim, by identity value only.
    pub client_claim_id: Patch<Uuid>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppealPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub appeal_date: Patch<NaiveDate>,
    pub court_name: Patch<String>,
    pub notes: Patch<String>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientClaimPatch {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<Uuid>,
    pub claim_number: Patch<String>,
    pub amount: Patch<Decimal>,
    pub status_note: Patch<String>,
    pub document_path: Patch<String>,
    pub document_name: Patch<String>,
    pub document_description: Patch<String>,
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ClaimStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown claim status: {raw}")))
    }
}

impl<'de> Deserialize<'de> for ParticipantRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ParticipantRole::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown participant role: {raw}")))
    }
}
