//! Integration tests for Vendor and VendorService repository
//! implementations using in-memory SurrealDB.

use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tripmart_core::TripmartError;
use tripmart_core::models::vendor::{CreateVendor, VendorStatus};
use tripmart_core::repository::{VendorRepository, VendorServiceRepository};
use tripmart_db::repository::{SurrealVendorRepository, SurrealVendorServiceRepository};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tripmart_db::run_migrations(&db).await.unwrap();
    db
}

fn sample_vendor() -> CreateVendor {
    CreateVendor {
        business_name: "Island Tours".into(),
        contact_person: "Vera Vendor".into(),
        email: "vera@example.com".into(),
        phone_number: "111".into(),
        vendor_type: Some("tour_operator".into()),
        business_address: Some("1 Harbour Rd".into()),
        operating_areas: vec!["south".into()],
    }
}

fn obj(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// -----------------------------------------------------------------------
// Vendor tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_vendor() {
    let db = setup().await;
    let repo = SurrealVendorRepository::new(db);

    let vendor = repo.create(sample_vendor()).await.unwrap();

    assert_eq!(vendor.business_name, "Island Tours");
    assert_eq!(vendor.status, VendorStatus::Pending);
    assert_eq!(vendor.operating_areas, vec!["south".to_string()]);

    let fetched = repo.get_by_id(vendor.id).await.unwrap();
    assert_eq!(fetched.id, vendor.id);
    assert_eq!(fetched.business_name, vendor.business_name);
    assert_eq!(fetched.phone_number.as_deref(), Some("111"));
}

#[tokio::test]
async fn get_missing_vendor_is_not_found() {
    let db = setup().await;
    let repo = SurrealVendorRepository::new(db);

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(TripmartError::NotFound { .. })));
}

#[tokio::test]
async fn update_fields_touches_only_named_fields() {
    let db = setup().await;
    let repo = SurrealVendorRepository::new(db);

    let vendor = repo.create(sample_vendor()).await.unwrap();

    let updated = repo
        .update_fields(
            vendor.id,
            obj(json!({"business_name": "Island Adventures", "tax_id": "T-42"})),
        )
        .await
        .unwrap();

    assert_eq!(updated.business_name, "Island Adventures");
    assert_eq!(updated.tax_id.as_deref(), Some("T-42"));
    // Untouched fields survive the partial update.
    assert_eq!(updated.phone_number.as_deref(), Some("111"));
    assert_eq!(updated.contact_person.as_deref(), Some("Vera Vendor"));
    assert!(updated.updated_at >= vendor.updated_at);
}

// -----------------------------------------------------------------------
// VendorService tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn insert_and_get_service() {
    let db = setup().await;
    let vendor_repo = SurrealVendorRepository::new(db.clone());
    let repo = SurrealVendorServiceRepository::new(db);

    let vendor = vendor_repo.create(sample_vendor()).await.unwrap();

    let service = repo
        .insert_fields(obj(json!({
            "vendor_id": vendor.id.to_string(),
            "service_name": "City Tour",
            "service_category": "tours",
            "retail_price": 50.0,
            "languages_offered": ["en", "de"],
        })))
        .await
        .unwrap();

    assert_eq!(service.vendor_id, vendor.id);
    assert_eq!(service.service_name, "City Tour");
    assert_eq!(service.retail_price, Some(50.0));

    let fetched = repo.get_by_id(service.id).await.unwrap();
    assert_eq!(fetched.id, service.id);
    assert_eq!(fetched.languages_offered, vec!["en", "de"]);
}

#[tokio::test]
async fn insert_fields_ignores_submitted_id() {
    let db = setup().await;
    let vendor_repo = SurrealVendorRepository::new(db.clone());
    let repo = SurrealVendorServiceRepository::new(db);

    let vendor = vendor_repo.create(sample_vendor()).await.unwrap();
    let forged = Uuid::new_v4();

    let service = repo
        .insert_fields(obj(json!({
            "id": forged.to_string(),
            "vendor_id": vendor.id.to_string(),
            "service_name": "Boat Trip",
        })))
        .await
        .unwrap();

    assert_ne!(service.id, forged);
}

#[tokio::test]
async fn update_service_fields() {
    let db = setup().await;
    let vendor_repo = SurrealVendorRepository::new(db.clone());
    let repo = SurrealVendorServiceRepository::new(db);

    let vendor = vendor_repo.create(sample_vendor()).await.unwrap();
    let service = repo
        .insert_fields(obj(json!({
            "vendor_id": vendor.id.to_string(),
            "service_name": "City Tour",
            "retail_price": 50.0,
        })))
        .await
        .unwrap();

    let updated = repo
        .update_fields(service.id, obj(json!({"retail_price": 65.0})))
        .await
        .unwrap();

    assert_eq!(updated.retail_price, Some(65.0));
    assert_eq!(updated.service_name, "City Tour"); // unchanged
}

#[tokio::test]
async fn list_services_by_vendor() {
    let db = setup().await;
    let vendor_repo = SurrealVendorRepository::new(db.clone());
    let repo = SurrealVendorServiceRepository::new(db);

    let vendor = vendor_repo.create(sample_vendor()).await.unwrap();
    let other = vendor_repo.create(sample_vendor()).await.unwrap();

    for name in ["City Tour", "Boat Trip"] {
        repo.insert_fields(obj(json!({
            "vendor_id": vendor.id.to_string(),
            "service_name": name,
        })))
        .await
        .unwrap();
    }
    repo.insert_fields(obj(json!({
        "vendor_id": other.id.to_string(),
        "service_name": "Unrelated",
    })))
    .await
    .unwrap();

    let services = repo.list_by_vendor(vendor.id).await.unwrap();
    assert_eq!(services.len(), 2);
    assert!(services.iter().all(|s| s.vendor_id == vendor.id));
}
