//! Read-model DTOs handed to the excluded transport layer
//!
//! Every identity value - including the settlement's weak client-claim
//! reference - is rendered as a string, and owned collections always
//! serialize as arrays, never as absent/null fields. Scalar values pass
//! through unchanged; exact round-trip is a correctness requirement.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full claim read model mirroring the nested aggregate shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDto {
    pub id: String,
    pub claim_number: Option<String>,
    pub status: String,
    pub is_draft: bool,
    pub case_handler_id: Option<i64>,
    pub registered_by_id: Option<i64>,
    pub owner_name: Option<String>,
    pub correspondence_email: Option<String>,
    pub policy_number: Option<String>,
    pub vehicle_registration: Option<String>,
    pub place_of_accident: Option<String>,
    pub description: Option<String>,
    pub date_of_accident: Option<NaiveDate>,
    pub reserve_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub participants: Vec<ParticipantDto>,
    pub damages: Vec<DamageDto>,
    pub decisions: Vec<DecisionDto>,
    pub recourses: Vec<RecourseDto>,
    pub settlements: Vec<SettlementDto>,
    pub appeals: Vec<AppealDto>,
    pub client_claims: Vec<ClientClaimDto>,
    pub documents: Vec<DocumentDto>,
    pub notes: Vec<NoteDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub claim_id: String,
    pub role: String,
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
    pub drivers: Vec<DriverDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDto {
    pub id: String,
    pub claim_id: String,
    pub participant_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageDto {
    pub id: String,
    pub claim_id: String,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionDto {
    pub id: String,
    pub claim_id: String,
    pub decision_number: Option<String>,
    pub decision_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecourseDto {
    pub id: String,
    pub claim_id: String,
    pub recourse_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub basis: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementDto {
    pub id: String,
    pub claim_id: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub settlement_date: Option<NaiveDate>,
    /// Weak reference to a client claim, rendered as its string form
    pub client_claim_id: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppealDto {
    pub id: String,
    pub claim_id: String,
    pub appeal_date: Option<NaiveDate>,
    pub court_name: Option<String>,
    pub notes: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientClaimDto {
    pub id: String,
    pub claim_id: String,
    pub claim_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status_note: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub document_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub claim_id: String,
    pub path: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDto {
    pub id: String,
    pub claim_id: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSummaryDto {
    pub id: String,
    pub claim_number: Option<String>,
    pub status: String,
    pub is_draft: bool,
    pub case_handler_id: Option<i64>,
    pub registered_by_id: Option<i64>,
    pub owner_name: Option<String>,
    pub correspondence_email: Option<String>,
    pub date_of_accident: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated list of claim summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimListResponse {
    pub items: Vec<ClaimSummaryDto>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Per-currency settlement totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementSummaryDto {
    pub totals_by_currency: std::collections::BTreeMap<String, Decimal>,
    pub count: u64,
}

// Note: Conversion implementations live in mapper.rs per module guidelines
