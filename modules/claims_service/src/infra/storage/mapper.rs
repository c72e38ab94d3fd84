//! Conversions between storage entities and contract models
//!
//! Row-to-model conversions for the root and participants are fallible
//! because status and role are stored as strings; everything else maps
//! infallibly. Model-to-active-model conversions set every column so the
//! same impl serves both inserts and full-row updates.

use anyhow::anyhow;
use sea_orm::ActiveValue::Set;

use crate::contract::model::{
    Appeal, Claim, ClaimStatus, ClientClaim, Damage, Decision, Document, Driver, Note,
    Participant, ParticipantRole, Recourse, Settlement,
};

use super::entity;

impl TryFrom<entity::Model> for Claim {
    type Error = anyhow::Error;

    /// Root row to model; child collections start empty and are filled by
    /// the repository from their own tables.
    fn try_from(row: entity::Model) -> Result<Self, Self::Error> {
        let status = ClaimStatus::parse(&row.status)
            .ok_or_else(|| anyhow!("claim {} has unknown status '{}'", row.id, row.status))?;
        Ok(Claim {
            id: row.id,
            claim_number: row.claim_number,
            status,
            is_draft: row.is_draft,
            case_handler_id: row.case_handler_id,
            registered_by_id: row.registered_by_id,
            owner_name: row.owner_name,
            correspondence_email: row.correspondence_email,
            policy_number: row.policy_number,
            vehicle_registration: row.vehicle_registration,
            place_of_accident: row.place_of_accident,
            description: row.description,
            date_of_accident: row.date_of_accident,
            reserve_amount: row.reserve_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
            participants: Vec::new(),
            damages: Vec::new(),
            decisions: Vec::new(),
            recourses: Vec::new(),
            settlements: Vec::new(),
            appeals: Vec::new(),
            client_claims: Vec::new(),
            documents: Vec::new(),
            notes: Vec::new(),
        })
    }
}

impl From<&Claim> for entity::ActiveModel {
    fn from(claim: &Claim) -> Self {
        Self {
            id: Set(claim.id),
            claim_number: Set(claim.claim_number.clone()),
            status: Set(claim.status.as_str().to_string()),
            is_draft: Set(claim.is_draft),
            case_handler_id: Set(claim.case_handler_id),
            registered_by_id: Set(claim.registered_by_id),
            owner_name: Set(claim.owner_name.clone()),
            correspondence_email: Set(claim.correspondence_email.clone()),
            policy_number: Set(claim.policy_number.clone()),
            vehicle_registration: Set(claim.vehicle_registration.clone()),
            place_of_accident: Set(claim.place_of_accident.clone()),
            description: Set(claim.description.clone()),
            date_of_accident: Set(claim.date_of_accident),
            reserve_amount: Set(claim.reserve_amount),
            created_at: Set(claim.created_at),
            updated_at: Set(claim.updated_at),
        }
    }
}

impl TryFrom<entity::participant::Model> for Participant {
    type Error = anyhow::Error;

    fn try_from(row: entity::participant::Model) -> Result<Self, Self::Error> {
        let role = ParticipantRole::parse(&row.role)
            .ok_or_else(|| anyhow!("participant {} has unknown role '{}'", row.id, row.role))?;
        Ok(Participant {
            id: row.id,
            claim_id: row.claim_id,
            role,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            vehicle_make: row.vehicle_make,
            vehicle_registration: row.vehicle_registration,
            policy_number: row.policy_number,
            policy_deal_date: row.policy_deal_date,
            policy_start_date: row.policy_start_date,
            policy_end_date: row.policy_end_date,
            policy_sum_amount: row.policy_sum_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
            drivers: Vec::new(),
        })
    }
}

impl From<&Participant> for entity::participant::ActiveModel {
    fn from(participant: &Participant) -> Self {
        Self {
            id: Set(participant.id),
            claim_id: Set(participant.claim_id),
            role: Set(participant.role.as_str().to_string()),
            first_name: Set(participant.first_name.clone()),
            last_name: Set(participant.last_name.clone()),
            email: Set(participant.email.clone()),
            phone: Set(participant.phone.clone()),
            address: Set(participant.address.clone()),
            vehicle_make: Set(participant.vehicle_make.clone()),
            vehicle_registration: Set(participant.vehicle_registration.clone()),
            policy_number: Set(participant.policy_number.clone()),
            policy_deal_date: Set(participant.policy_deal_date),
            policy_start_date: Set(participant.policy_start_date),
            policy_end_date: Set(participant.policy_end_date),
            policy_sum_amount: Set(participant.policy_sum_amount),
            created_at: Set(participant.created_at),
            updated_at: Set(participant.updated_at),
        }
    }
}

impl From<entity::driver::Model> for Driver {
    fn from(row: entity::driver::Model) -> Self {
        Driver {
            id: row.id,
            claim_id: row.claim_id,
            participant_id: row.participant_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            license_number: row.license_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Driver> for entity::driver::ActiveModel {
    fn from(driver: &Driver) -> Self {
        Self {
            id: Set(driver.id),
            claim_id: Set(driver.claim_id),
            participant_id: Set(driver.participant_id),
            first_name: Set(driver.first_name.clone()),
            last_name: Set(driver.last_name.clone()),
            email: Set(driver.email.clone()),
            phone: Set(driver.phone.clone()),
            license_number: Set(driver.license_number.clone()),
            created_at: Set(driver.created_at),
            updated_at: Set(driver.updated_at),
        }
    }
}

impl From<entity::damage::Model> for Damage {
    fn from(row: entity::damage::Model) -> Self {
        Damage {
            id: row.id,
            claim_id: row.claim_id,
            description: row.description,
            amount: row.amount,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Damage> for entity::damage::ActiveModel {
    fn from(damage: &Damage) -> Self {
        Self {
            id: Set(damage.id),
            claim_id: Set(damage.claim_id),
            description: Set(damage.description.clone()),
            amount: Set(damage.amount),
            document_path: Set(damage.document_path.clone()),
            document_name: Set(damage.document_name.clone()),
            document_description: Set(damage.document_description.clone()),
            created_at: Set(damage.created_at),
            updated_at: Set(damage.updated_at),
        }
    }
}

impl From<entity::decision::Model> for Decision {
    fn from(row: entity::decision::Model) -> Self {
        Decision {
            id: row.id,
            claim_id: row.claim_id,
            decision_number: row.decision_number,
            decision_date: row.decision_date,
            amount: row.amount,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Decision> for entity::decision::ActiveModel {
    fn from(decision: &Decision) -> Self {
        Self {
            id: Set(decision.id),
            claim_id: Set(decision.claim_id),
            decision_number: Set(decision.decision_number.clone()),
            decision_date: Set(decision.decision_date),
            amount: Set(decision.amount),
            document_path: Set(decision.document_path.clone()),
            document_name: Set(decision.document_name.clone()),
            document_description: Set(decision.document_description.clone()),
            created_at: Set(decision.created_at),
            updated_at: Set(decision.updated_at),
        }
    }
}

impl From<entity::recourse::Model> for Recourse {
    fn from(row: entity::recourse::Model) -> Self {
        Recourse {
            id: row.id,
            claim_id: row.claim_id,
            recourse_date: row.recourse_date,
            amount: row.amount,
            basis: row.basis,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Recourse> for entity::recourse::ActiveModel {
    fn from(recourse: &Recourse) -> Self {
        Self {
            id: Set(recourse.id),
            claim_id: Set(recourse.claim_id),
            recourse_date: Set(recourse.recourse_date),
            amount: Set(recourse.amount),
            basis: Set(recourse.basis.clone()),
            document_path: Set(recourse.document_path.clone()),
            document_name: Set(recourse.document_name.clone()),
            document_description: Set(recourse.document_description.clone()),
            created_at: Set(recourse.created_at),
            updated_at: Set(recourse.updated_at),
        }
    }
}

impl From<entity::settlement::Model> for Settlement {
    fn from(row: entity::settlement::Model) -> Self {
        Settlement {
            id: row.id,
            claim_id: row.claim_id,
            amount: row.amount,
            currency: row.currency,
            settlement_date: row.settlement_date,
            client_claim_id: row.client_claim_id,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Settlement> for entity::settlement::ActiveModel {
    fn from(settlement: &Settlement) -> Self {
        Self {
            id: Set(settlement.id),
            claim_id: Set(settlement.claim_id),
            amount: Set(settlement.amount),
            currency: Set(settlement.currency.clone()),
            settlement_date: Set(settlement.settlement_date),
            client_claim_id: Set(settlement.client_claim_id),
            document_path: Set(settlement.document_path.clone()),
            document_name: Set(settlement.document_name.clone()),
            document_description: Set(settlement.document_description.clone()),
            created_at: Set(settlement.created_at),
            updated_at: Set(settlement.updated_at),
        }
    }
}

impl From<entity::appeal::Model> for Appeal {
    fn from(row: entity::appeal::Model) -> Self {
        Appeal {
            id: row.id,
            claim_id: row.claim_id,
            appeal_date: row.appeal_date,
            court_name: row.court_name,
            notes: row.notes,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Appeal> for entity::appeal::ActiveModel {
    fn from(appeal: &Appeal) -> Self {
        Self {
            id: Set(appeal.id),
            claim_id: Set(appeal.claim_id),
            appeal_date: Set(appeal.appeal_date),
            court_name: Set(appeal.court_name.clone()),
            notes: Set(appeal.notes.clone()),
            document_path: Set(appeal.document_path.clone()),
            document_name: Set(appeal.document_name.clone()),
            document_description: Set(appeal.document_description.clone()),
            created_at: Set(appeal.created_at),
            updated_at: Set(appeal.updated_at),
        }
    }
}

impl From<entity::client_claim::Model> for ClientClaim {
    fn from(row: entity::client_claim::Model) -> Self {
        ClientClaim {
            id: row.id,
            claim_id: row.claim_id,
            claim_number: row.claim_number,
            amount: row.amount,
            status_note: row.status_note,
            document_path: row.document_path,
            document_name: row.document_name,
            document_description: row.document_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&ClientClaim> for entity::client_claim::ActiveModel {
    fn from(client_claim: &ClientClaim) -> Self {
        Self {
            id: Set(client_claim.id),
            claim_id: Set(client_claim.claim_id),
            claim_number: Set(client_claim.claim_number.clone()),
            amount: Set(client_claim.amount),
            status_note: Set(client_claim.status_note.clone()),
            document_path: Set(client_claim.document_path.clone()),
            document_name: Set(client_claim.document_name.clone()),
            document_description: Set(client_claim.document_description.clone()),
            created_at: Set(client_claim.created_at),
            updated_at: Set(client_claim.updated_at),
        }
    }
}

impl From<entity::document::Model> for Document {
    fn from(row: entity::document::Model) -> Self {
        Document {
            id: row.id,
            claim_id: row.claim_id,
            path: row.path,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<entity::note::Model> for Note {
    fn from(row: entity::note::Model) -> Self {
        Note {
            id: row.id,
            claim_id: row.claim_id,
            content: row.content,
            author: row.author,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
