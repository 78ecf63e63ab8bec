//! Integration tests for the UpdateRequest repository: insertion,
//! lookup, the conditional review transition, and filtered listing.

use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tripmart_core::TripmartError;
use tripmart_core::models::update_request::{
    CreateUpdateRequest, RequestFilter, RequestStatus, RequestType, ReviewDecision,
};
use tripmart_core::repository::{Pagination, UpdateRequestRepository};
use tripmart_db::repository::SurrealUpdateRequestRepository;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tripmart_db::run_migrations(&db).await.unwrap();
    db
}

fn obj(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn sample_request(vendor_id: Uuid) -> CreateUpdateRequest {
    CreateUpdateRequest {
        vendor_id,
        service_id: None,
        request_type: RequestType::ProfileUpdate,
        requested_by: vendor_id,
        requested_by_name: "Vera Vendor".into(),
        current_data: obj(json!({"business_name": "A"})),
        requested_data: obj(json!({"business_name": "B"})),
        changed_fields: vec!["businessName".into()],
    }
}

fn approval(reviewer: Uuid) -> ReviewDecision {
    ReviewDecision {
        status: RequestStatus::Approved,
        reviewed_by: reviewer,
        reviewed_by_name: "Ann Admin".into(),
        review_reason: None,
    }
}

#[tokio::test]
async fn insert_and_find_request() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);
    let vendor_id = Uuid::new_v4();

    let request = repo.insert(sample_request(vendor_id)).await.unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.vendor_id, vendor_id);
    assert_eq!(request.changed_fields, vec!["businessName"]);
    assert!(request.reviewed_at.is_none());
    assert!(request.reviewed_by.is_none());

    let fetched = repo.find_by_id(request.id).await.unwrap();
    assert_eq!(fetched.id, request.id);
    assert_eq!(fetched.requested_data, json!({"business_name": "B"}));
    assert_eq!(fetched.current_data, json!({"business_name": "A"}));
}

#[tokio::test]
async fn find_missing_request_is_not_found() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);

    let result = repo.find_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(TripmartError::NotFound { .. })));
}

#[tokio::test]
async fn mark_reviewed_flips_pending_request_once() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);
    let reviewer = Uuid::new_v4();

    let request = repo.insert(sample_request(Uuid::new_v4())).await.unwrap();

    let reviewed = repo
        .mark_reviewed(request.id, approval(reviewer))
        .await
        .unwrap()
        .expect("pending request should match");

    assert_eq!(reviewed.status, RequestStatus::Approved);
    assert_eq!(reviewed.reviewed_by, Some(reviewer));
    assert_eq!(reviewed.reviewed_by_name.as_deref(), Some("Ann Admin"));
    assert!(reviewed.reviewed_at.is_some());

    // The second attempt finds no pending request.
    let second = repo
        .mark_reviewed(request.id, approval(reviewer))
        .await
        .unwrap();
    assert!(second.is_none());

    // And the stored document keeps the first verdict.
    let stored = repo.find_by_id(request.id).await.unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
}

#[tokio::test]
async fn mark_reviewed_records_rejection_reason() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);

    let request = repo.insert(sample_request(Uuid::new_v4())).await.unwrap();

    let reviewed = repo
        .mark_reviewed(
            request.id,
            ReviewDecision {
                status: RequestStatus::Rejected,
                reviewed_by: Uuid::new_v4(),
                reviewed_by_name: "Ann Admin".into(),
                review_reason: Some("incomplete documents".into()),
            },
        )
        .await
        .unwrap()
        .expect("pending request should match");

    assert_eq!(reviewed.status, RequestStatus::Rejected);
    assert_eq!(
        reviewed.review_reason.as_deref(),
        Some("incomplete documents")
    );
}

#[tokio::test]
async fn mark_reviewed_on_missing_request_is_none() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);

    let result = repo
        .mark_reviewed(Uuid::new_v4(), approval(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn list_filters_by_vendor_and_status() {
    let db = setup().await;
    let repo = SurrealUpdateRequestRepository::new(db);
    let vendor_a = Uuid::new_v4();
    let vendor_b = Uuid::new_v4();

    let first = repo.insert(sample_request(vendor_a)).await.unwrap();
    repo.insert(sample_request(vendor_a)).await.unwrap();
    repo.insert(sample_request(vendor_b)).await.unwrap();

    repo.mark_reviewed(first.id, approval(Uuid::new_v4()))
        .await
        .unwrap()
        .expect("pending request should match");

    let pending_a = repo
        .list(
            RequestFilter {
                vendor_id: Some(vendor_a),
                status: Some(RequestStatus::Pending),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(pending_a.len(), 1);
    assert_eq!(pending_a[0].vendor_id, vendor_a);

    let all_pending = repo
        .list(
            RequestFilter {
                vendor_id: None,
                status: Some(RequestStatus::Pending),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(all_pending.len(), 2);

    let everything = repo
        .list(RequestFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}
