//! Integration tests for the claims service save/get/delete/list pipeline

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use claims_service::config::{Config, UnmatchedPolicy};
use claims_service::contract::error::ClaimsError;
use claims_service::contract::model::{Claim, Document, Note};
use claims_service::domain::filter::{ClaimFilter, PageRequest, Sort, SortKey};

mod common;
use common::{
    default_service, patch, service_with, ClearingDocumentStore, MockClaimsRepo,
    RecordingSearchIndex, StubDocumentStore,
};

#[tokio::test]
async fn save_creates_a_claim_under_the_client_supplied_id() {
    let repo = MockClaimsRepo::new();
    let service = default_service(repo.clone());
    let id = Uuid::new_v4();

    let claim = service
        .save(patch(json!({
            "id": id.to_string(),
            "owner_name": "Jelena Marković",
            "policy_number": "POL-2024-0017"
        })))
        .await
        .unwrap();

    assert_eq!(claim.id, id);
    assert_eq!(claim.owner_name.as_deref(), Some("Jelena Marković"));
    assert_eq!(claim.policy_number.as_deref(), Some("POL-2024-0017"));
    assert!(claim.is_draft);
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn second_save_updates_in_place_and_moves_updated_at_forward() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    let first = service
        .save(patch(json!({ "id": id.to_string(), "owner_name": "first" })))
        .await
        .unwrap();
    let second = service
        .save(patch(json!({ "id": id.to_string(), "owner_name": "second" })))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.owner_name.as_deref(), Some("second"));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn child_patch_fields_survive_a_reload() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{
                "description": "rear bumper torn off",
                "amount": "1250.50",
                "document_name": "estimate.pdf"
            }]
        })))
        .await
        .unwrap();

    let reloaded = service.get(id).await.unwrap();
    assert_eq!(reloaded.damages.len(), 1);
    let damage = &reloaded.damages[0];
    assert_eq!(damage.claim_id, id);
    assert_eq!(damage.description.as_deref(), Some("rear bumper torn off"));
    assert_eq!(damage.amount, Some(Decimal::new(125050, 2)));
    assert_eq!(damage.document_name.as_deref(), Some("estimate.pdf"));
}

#[tokio::test]
async fn nested_driver_lands_under_its_participant() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    let claim = service
        .save(patch(json!({
            "id": id.to_string(),
            "participants": [{
                "role": "AT_FAULT",
                "last_name": "Kovač",
                "drivers": [{ "first_name": "Marko", "license_number": "B-99012" }]
            }]
        })))
        .await
        .unwrap();

    assert_eq!(claim.participants.len(), 1);
    let participant = &claim.participants[0];
    assert_eq!(participant.drivers.len(), 1);
    let driver = &participant.drivers[0];
    assert_eq!(driver.participant_id, participant.id);
    assert_eq!(driver.claim_id, id);
    assert_eq!(driver.license_number.as_deref(), Some("B-99012"));
}

#[tokio::test]
async fn child_only_change_still_moves_the_root_updated_at() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    let before = service
        .save(patch(json!({ "id": id.to_string() })))
        .await
        .unwrap();
    let after = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "description": "windshield crack" }]
        })))
        .await
        .unwrap();

    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.damages.len(), 1);
}

#[tokio::test]
async fn matched_child_is_updated_instead_of_duplicated() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    let first = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "description": "initial" }]
        })))
        .await
        .unwrap();
    let damage_id = first.damages[0].id;

    let second = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "id": damage_id.to_string(), "description": "revised" }]
        })))
        .await
        .unwrap();

    assert_eq!(second.damages.len(), 1);
    assert_eq!(second.damages[0].id, damage_id);
    assert_eq!(second.damages[0].description.as_deref(), Some("revised"));
}

#[tokio::test]
async fn malformed_child_identity_becomes_a_fresh_insert() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "description": "initial" }]
        })))
        .await
        .unwrap();

    let claim = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "id": "not-a-uuid", "description": "second row" }]
        })))
        .await
        .unwrap();

    assert_eq!(claim.damages.len(), 2);
}

#[tokio::test]
async fn invalid_status_transition_is_rejected() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    service
        .save(patch(json!({ "id": id.to_string(), "status": "DRAFT" })))
        .await
        .unwrap();

    let result = service
        .save(patch(json!({ "id": id.to_string(), "status": "CLOSED" })))
        .await;
    assert!(matches!(result, Err(ClaimsError::Validation { .. })));

    // The legal path still works.
    let registered = service
        .save(patch(json!({ "id": id.to_string(), "status": "REGISTERED" })))
        .await
        .unwrap();
    assert_eq!(registered.status.as_str(), "REGISTERED");
}

#[tokio::test]
async fn get_unknown_claim_is_not_found() {
    let service = default_service(MockClaimsRepo::new());
    let result = service.get(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ClaimsError::NotFound { .. })));
}

#[tokio::test]
async fn storage_failure_surfaces_as_internal_error() {
    let repo = MockClaimsRepo::new();
    repo.set_fail_writes(true);
    let service = default_service(repo);

    let result = service.save(patch(json!({ "owner_name": "x" }))).await;
    assert!(matches!(result, Err(ClaimsError::Internal)));
}

#[tokio::test]
async fn index_failure_never_fails_the_save() {
    let repo = MockClaimsRepo::new();
    let service = service_with(
        repo.clone(),
        Arc::new(RecordingSearchIndex::failing()),
        Arc::new(StubDocumentStore),
        Config::default(),
    );

    let claim = service
        .save(patch(json!({ "owner_name": "indexed anyway" })))
        .await
        .unwrap();
    assert_eq!(repo.count(), 1);
    assert_eq!(claim.owner_name.as_deref(), Some("indexed anyway"));
}

#[tokio::test]
async fn successful_save_reaches_the_search_index() {
    let index = Arc::new(RecordingSearchIndex::new());
    let service = service_with(
        MockClaimsRepo::new(),
        index.clone(),
        Arc::new(StubDocumentStore),
        Config::default(),
    );

    let claim = service.save(patch(json!({}))).await.unwrap();
    assert_eq!(index.indexed.read().as_slice(), &[claim.id]);
}

fn claim_with_document(id: Uuid) -> Claim {
    let now = Utc::now();
    let mut claim = Claim::new(id, now);
    claim.documents.push(Document {
        id: Uuid::new_v4(),
        claim_id: id,
        path: "claims/estimate.pdf".to_string(),
        name: Some("estimate.pdf".to_string()),
        description: None,
        created_at: now,
        updated_at: now,
    });
    claim.notes.push(Note {
        id: Uuid::new_v4(),
        claim_id: id,
        content: "called the owner".to_string(),
        author: Some("handler-7".to_string()),
        created_at: now,
        updated_at: now,
    });
    claim
}

#[tokio::test]
async fn delete_is_refused_while_restricted_children_remain() {
    let repo = MockClaimsRepo::new();
    let id = Uuid::new_v4();
    repo.seed(claim_with_document(id));

    // The stub store claims success but detaches nothing.
    let service = service_with(
        repo.clone(),
        Arc::new(RecordingSearchIndex::new()),
        Arc::new(StubDocumentStore),
        Config::default(),
    );

    let result = service.delete(id).await;
    assert!(matches!(result, Err(ClaimsError::Conflict { .. })));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn delete_succeeds_once_documents_are_released() {
    let repo = MockClaimsRepo::new();
    let id = Uuid::new_v4();
    repo.seed(claim_with_document(id));

    let index = Arc::new(RecordingSearchIndex::new());
    let service = service_with(
        repo.clone(),
        index.clone(),
        Arc::new(ClearingDocumentStore::new(repo.clone())),
        Config::default(),
    );

    service.delete(id).await.unwrap();
    assert_eq!(repo.count(), 0);
    assert_eq!(index.removed.read().as_slice(), &[id]);
}

#[tokio::test]
async fn unmatched_children_are_kept_by_default_and_deleted_under_the_policy() {
    // Default: a patch listing one damage does not drop the other.
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();
    let first = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "description": "one" }, { "description": "two" }]
        })))
        .await
        .unwrap();
    let kept_id = first.damages[0].id;
    let after = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "id": kept_id.to_string(), "description": "one updated" }]
        })))
        .await
        .unwrap();
    assert_eq!(after.damages.len(), 2);

    // Delete policy: the omitted damage goes away.
    let config = Config {
        unmatched_children: UnmatchedPolicy::Delete,
        ..Config::default()
    };
    let service = service_with(
        MockClaimsRepo::new(),
        Arc::new(RecordingSearchIndex::new()),
        Arc::new(StubDocumentStore),
        config,
    );
    let id = Uuid::new_v4();
    let first = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "description": "one" }, { "description": "two" }]
        })))
        .await
        .unwrap();
    let kept_id = first.damages[0].id;
    let after = service
        .save(patch(json!({
            "id": id.to_string(),
            "damages": [{ "id": kept_id.to_string() }]
        })))
        .await
        .unwrap();
    assert_eq!(after.damages.len(), 1);
    assert_eq!(after.damages[0].id, kept_id);
}

#[tokio::test]
async fn listing_combines_search_and_exact_filters() {
    let service = default_service(MockClaimsRepo::new());

    service
        .save(patch(json!({
            "owner_name": "Example Holdings",
            "case_handler_id": 7
        })))
        .await
        .unwrap();
    service
        .save(patch(json!({
            "correspondence_email": "office@example.com",
            "case_handler_id": 9
        })))
        .await
        .unwrap();
    service
        .save(patch(json!({
            "owner_name": "Petar Simić",
            "case_handler_id": 7
        })))
        .await
        .unwrap();

    let page = service
        .list(
            ClaimFilter {
                search: Some("example".to_string()),
                case_handler_id: Some(7),
                ..Default::default()
            },
            PageRequest {
                page: 1,
                page_size: 10,
                sort: Sort::default(),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].owner_name.as_deref(), Some("Example Holdings"));
}

#[tokio::test]
async fn page_request_is_normalized_against_the_config() {
    let service = default_service(MockClaimsRepo::new());
    for _ in 0..3 {
        service.save(patch(json!({}))).await.unwrap();
    }

    // Page 0 and size 0 fall back to the first page and the default size.
    let page = service
        .list(
            ClaimFilter::default(),
            PageRequest {
                page: 0,
                page_size: 0,
                sort: Sort::default(),
            },
        )
        .await
        .unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 25);
    assert_eq!(page.total, 3);

    // An oversized request is clamped to the configured maximum.
    let page = service
        .list(
            ClaimFilter::default(),
            PageRequest {
                page: 1,
                page_size: 100_000,
                sort: Sort {
                    key: SortKey::CreatedAt,
                    descending: true,
                },
            },
        )
        .await
        .unwrap();
    assert_eq!(page.page_size, 200);
}

#[tokio::test]
async fn settlement_summary_totals_per_currency_with_default_fallback() {
    let service = default_service(MockClaimsRepo::new());
    let id = Uuid::new_v4();

    service
        .save(patch(json!({
            "id": id.to_string(),
            "settlements": [
                { "amount": "100", "currency": "USD" },
                { "amount": "50", "currency": "USD" },
                { "amount": "200" }
            ]
        })))
        .await
        .unwrap();

    let summary = service.settlement_summary(id).await.unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(
        summary.totals_by_currency.get("USD"),
        Some(&Decimal::new(150, 0))
    );
    assert_eq!(
        summary.totals_by_currency.get("EUR"),
        Some(&Decimal::new(200, 0))
    );
}
