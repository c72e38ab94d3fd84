//! Mapper implementations for converting contract models to read DTOs
//!
//! This is the projection step: structured identities come out as strings,
//! scalar values pass through unchanged, and empty collections stay empty
//! vectors so they render as `[]` rather than null.

use super::dto::*;
use crate::contract::model as contract;
use crate::domain::filter::{ClaimSummary, Page};
use crate::domain::summary::SettlementSummary;

impl From<contract::Claim> for ClaimDto {
    fn from(claim: contract::Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            claim_number: claim.claim_number,
            status: claim.status.as_str().to_string(),
            is_draft: claim.is_draft,
            case_handler_id: claim.case_handler_id,
            registered_by_id: claim.registered_by_id,
            owner_name: claim.owner_name,
            correspondence_email: claim.correspondence_email,
            policy_number: claim.policy_number,
            vehicle_registration: claim.vehicle_registration,
            place_of_accident: claim.place_of_accident,
            description: claim.description,
            date_of_accident: claim.date_of_accident,
            reserve_amount: claim.reserve_amount,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
            participants: claim.participants.into_iter().map(Into::into).collect(),
            damages: claim.damages.into_iter().map(Into::into).collect(),
            decisions: claim.decisions.into_iter().map(Into::into).collect(),
            recourses: claim.recourses.into_iter().map(Into::into).collect(),
            settlements: claim.settlements.into_iter().map(Into::into).collect(),
            appeals: claim.appeals.into_iter().map(Into::into).collect(),
            client_claims: claim.client_claims.into_iter().map(Into::into).collect(),
            documents: claim.documents.into_iter().map(Into::into).collect(),
            notes: claim.notes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Participant> for ParticipantDto {
    fn from(participant: contract::Participant) -> Self {
        Self {
            id: participant.id.to_string(),
            claim_id: participant.claim_id.to_string(),
            role: participant.role.as_str().to_string(),
            first_name: participant.first_name,
            last_name: participant.last_name,
            email: participant.email,
            phone: participant.phone,
            address: participant.address,
            vehicle_make: participant.vehicle_make,
            vehicle_registration: participant.vehicle_registration,
            policy_number: participant.policy_number,
            policy_deal_date: participant.policy_deal_date,
            policy_start_date: participant.policy_start_date,
            policy_end_date: participant.policy_end_date,
            policy_sum_amount: participant.policy_sum_amount,
            created_at: participant.created_at,
            updated_at: participant.updated_at,
            drivers: participant.drivers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Driver> for DriverDto {
    fn from(driver: contract::Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            claim_id: driver.claim_id.to_string(),
            participant_id: driver.participant_id.to_string(),
            first_name: driver.first_name,
            last_name: driver.last_name,
            email: driver.email,
            phone: driver.phone,
            license_number: driver.license_number,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

impl From<contract::Damage> for DamageDto {
    fn from(damage: contract::Damage) -> Self {
        Self {
            id: damage.id.to_string(),
            claim_id: damage.claim_id.to_string(),
            description: damage.description,
            amount: damage.amount,
            document_path: damage.document_path,
            document_name: damage.document_name,
            document_description: damage.document_description,
            created_at: damage.created_at,
            updated_at: damage.updated_at,
        }
    }
}

impl From<contract::Decision> for DecisionDto {
    fn from(decision: contract::Decision) -> Self {
        Self {
            id: decision.id.to_string(),
            claim_id: decision.claim_id.to_string(),
            decision_number: decision.decision_number,
            decision_date: decision.decision_date,
            amount: decision.amount,
            document_path: decision.document_path,
            document_name: decision.document_name,
            document_description: decision.document_description,
            created_at: decision.created_at,
            updated_at: decision.updated_at,
        }
    }
}

impl From<contract::Recourse> for RecourseDto {
    fn from(recourse: contract::Recourse) -> Self {
        Self {
            id: recourse.id.to_string(),
            claim_id: recourse.claim_id.to_string(),
            recourse_date: recourse.recourse_date,
            amount: recourse.amount,
            basis: recourse.basis,
            document_path: recourse.document_path,
            document_name: recourse.document_name,
            document_description: recourse.document_description,
            created_at: recourse.created_at,
            updated_at: recourse.updated_at,
        }
    }
}

impl From<contract::Settlement> for SettlementDto {
    fn from(settlement: contract::Settlement) -> Self {
        Self {
            id: settlement.id.to_string(),
            claim_id: settlement.claim_id.to_string(),
            amount: settlement.amount,
            currency: settlement.currency,
            settlement_date: settlement.settlement_date,
            // Weak reference: stored as an identity, rendered as a string.
            client_claim_id: settlement.client_claim_id.map(|id| id.to_string()),
            document_path: settlement.document_path,
            document_name: settlement.document_name,
            document_description: settlement.document_description,
            created_at: settlement.created_at,
            updated_at: settlement.updated_at,
        }
    }
}

impl From<contract::Appeal> for AppealDto {
    fn from(appeal: contract::Appeal) -> Self {
        Self {
            id: appeal.id.to_string(),
            claim_id: appeal.claim_id.to_string(),
            appeal_date: appeal.appeal_date,
            court_name: appeal.court_name,
            notes: appeal.notes,
            document_path: appeal.document_path,
            document_name: appeal.document_name,
            document_description: appeal.document_description,
            created_at: appeal.created_at,
            updated_at: appeal.updated_at,
        }
    }
}

impl From<contract::ClientClaim> for ClientClaimDto {
    fn from(client_claim: contract::ClientClaim) -> Self {
        Self {
            id: client_claim.id.to_string(),
            claim_id: client_claim.claim_id.to_string(),
            claim_number: client_claim.claim_number,
            amount: client_claim.amount,
            status_note: client_claim.status_note,
            document_path: client_claim.document_path,
            document_name: client_claim.document_name,
            document_description: client_claim.document_description,
            created_at: client_claim.created_at,
            updated_at: client_claim.updated_at,
        }
    }
}

impl From<contract::Document> for DocumentDto {
    fn from(document: contract::Document) -> Self {
        Self {
            id: document.id.to_string(),
            claim_id: document.claim_id.to_string(),
            path: document.path,
            name: document.name,
            description: document.description,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

impl From<contract::Note> for NoteDto {
    fn from(note: contract::Note) -> Self {
        Self {
            id: note.id.to_string(),
            claim_id: note.claim_id.to_string(),
            content: note.content,
            author: note.author,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl From<ClaimSummary> for ClaimSummaryDto {
    fn from(summary: ClaimSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            claim_number: summary.claim_number,
            status: summary.status.as_str().to_string(),
            is_draft: summary.is_draft,
            case_handler_id: summary.case_handler_id,
            registered_by_id: summary.registered_by_id,
            owner_name: summary.owner_name,
            correspondence_email: summary.correspondence_email,
            date_of_accident: summary.date_of_accident,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

impl From<Page<ClaimSummary>> for ClaimListResponse {
    fn from(page: Page<ClaimSummary>) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

impl From<SettlementSummary> for SettlementSummaryDto {
    fn from(summary: SettlementSummary) -> Self {
        Self {
            totals_by_currency: summary.totals_by_currency,
            count: summary.count,
        }
    }
}
