//! Listing filter, sort and pagination types
//!
//! The semantics live here as pure functions so they can be tested (and used
//! by in-memory stores) without a database; the SQL repository mirrors them
//! with native conditions.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::contract::model::{Claim, ClaimStatus};

/// Multi-criteria claim listing filter. `search` is a case-insensitive
/// substring match over the fixed free-text column set; the exact filters
/// combine with it and each other using AND semantics.
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub search: Option<String>,
    pub case_handler_id: Option<i64>,
    pub registered_by_id: Option<i64>,
    pub is_draft: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    ClaimNumber,
    OwnerName,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

/// 1-based page request.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
    pub sort: Sort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Flat row for claim listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSummary {
    pub id: Uuid,
    pub claim_number: Option<String>,
    pub status: ClaimStatus,
    pub is_draft: bool,
    pub case_handler_id: Option<i64>,
    pub registered_by_id: Option<i64>,
    pub owner_name: Option<String>,
    pub correspondence_email: Option<String>,
    pub date_of_accident: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimSummary {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            claim_number: claim.claim_number.clone(),
            status: claim.status,
            is_draft: claim.is_draft,
            case_handler_id: claim.case_handler_id,
            registered_by_id: claim.registered_by_id,
            owner_name: claim.owner_name.clone(),
            correspondence_email: claim.correspondence_email.clone(),
            date_of_accident: claim.date_of_accident,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

impl ClaimFilter {
    /// The free-text columns the `search` term is matched against.
    pub fn searched_columns(claim: &Claim) -> [&Option<String>; 6] {
        [
            &claim.claim_number,
            &claim.owner_name,
            &claim.correspondence_email,
            &claim.policy_number,
            &claim.vehicle_registration,
            &claim.place_of_accident,
        ]
    }

    /// AND of all configured criteria; a claim matches the search term if
    /// any searched column contains it, case-insensitively.
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(handler) = self.case_handler_id {
            if claim.case_handler_id != Some(handler) {
                return false;
            }
        }
        if let Some(registrar) = self.registered_by_id {
            if claim.registered_by_id != Some(registrar) {
                return false;
            }
        }
        if let Some(is_draft) = self.is_draft {
            if claim.is_draft != is_draft {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref() {
            let term = term.to_lowercase();
            let hit = Self::searched_columns(claim).into_iter().any(|column| {
                column
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(&term))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Filter, sort and paginate a set of claims in memory. Ties on the sort key
/// break on the id so paging stays deterministic across calls.
pub fn evaluate(
    claims: &[Claim],
    filter: &ClaimFilter,
    page: &PageRequest,
) -> Page<ClaimSummary> {
    let mut matched: Vec<ClaimSummary> = claims
        .iter()
        .filter(|claim| filter.matches(claim))
        .map(ClaimSummary::from)
        .collect();

    matched.sort_by(|a, b| {
        let ordering = match page.sort.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::ClaimNumber => a.claim_number.cmp(&b.claim_number),
            SortKey::OwnerName => a.owner_name.cmp(&b.owner_name),
        };
        let ordering = if page.sort.descending {
            ordering.reverse()
        } else {
            ordering
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });

    let total = matched.len() as u64;
    let page_number = page.page.max(1);
    let offset = (page_number - 1).saturating_mul(page.page_size) as usize;
    let items: Vec<ClaimSummary> = matched
        .into_iter()
        .skip(offset)
        .take(page.page_size as usize)
        .collect();

    Page {
        items,
        total,
        page: page_number,
        page_size: page.page_size,
    }
}
