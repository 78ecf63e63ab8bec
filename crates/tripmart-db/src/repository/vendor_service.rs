//! SurrealDB implementation of [`VendorServiceRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tripmart_core::error::TripmartResult;
use tripmart_core::models::vendor_service::VendorService;
use tripmart_core::repository::VendorServiceRepository;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct VendorServiceRow {
    vendor_id: String,
    service_name: String,
    service_category: Option<String>,
    short_description: Option<String>,
    whats_included: Option<String>,
    whats_not_included: Option<String>,
    duration_value: Option<i64>,
    duration_unit: Option<String>,
    languages_offered: Vec<String>,
    group_size_min: Option<i64>,
    group_size_max: Option<i64>,
    daily_capacity: Option<i64>,
    operating_days: Vec<String>,
    locations_covered: Vec<String>,
    retail_price: Option<f64>,
    currency: Option<String>,
    not_suitable_for: Option<String>,
    important_info: Option<String>,
    cancellation_policy: Option<String>,
    accessibility_info: Option<String>,
    image_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct VendorServiceRowWithId {
    record_id: String,
    vendor_id: String,
    service_name: String,
    service_category: Option<String>,
    short_description: Option<String>,
    whats_included: Option<String>,
    whats_not_included: Option<String>,
    duration_value: Option<i64>,
    duration_unit: Option<String>,
    languages_offered: Vec<String>,
    group_size_min: Option<i64>,
    group_size_max: Option<i64>,
    daily_capacity: Option<i64>,
    operating_days: Vec<String>,
    locations_covered: Vec<String>,
    retail_price: Option<f64>,
    currency: Option<String>,
    not_suitable_for: Option<String>,
    important_info: Option<String>,
    cancellation_policy: Option<String>,
    accessibility_info: Option<String>,
    image_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VendorServiceRow {
    fn into_service(self, id: Uuid) -> Result<VendorService, DbError> {
        let vendor_id = Uuid::parse_str(&self.vendor_id)
            .map_err(|e| DbError::Decode(format!("invalid vendor UUID: {e}")))?;
        Ok(VendorService {
            id,
            vendor_id,
            service_name: self.service_name,
            service_category: self.service_category,
            short_description: self.short_description,
            whats_included: self.whats_included,
            whats_not_included: self.whats_not_included,
            duration_value: self.duration_value,
            duration_unit: self.duration_unit,
            languages_offered: self.languages_offered,
            group_size_min: self.group_size_min,
            group_size_max: self.group_size_max,
            daily_capacity: self.daily_capacity,
            operating_days: self.operating_days,
            locations_covered: self.locations_covered,
            retail_price: self.retail_price,
            currency: self.currency,
            not_suitable_for: self.not_suitable_for,
            important_info: self.important_info,
            cancellation_policy: self.cancellation_policy,
            accessibility_info: self.accessibility_info,
            image_urls: self.image_urls,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl VendorServiceRowWithId {
    fn try_into_service(self) -> Result<VendorService, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = VendorServiceRow {
            vendor_id: self.vendor_id,
            service_name: self.service_name,
            service_category: self.service_category,
            short_description: self.short_description,
            whats_included: self.whats_included,
            whats_not_included: self.whats_not_included,
            duration_value: self.duration_value,
            duration_unit: self.duration_unit,
            languages_offered: self.languages_offered,
            group_size_min: self.group_size_min,
            group_size_max: self.group_size_max,
            daily_capacity: self.daily_capacity,
            operating_days: self.operating_days,
            locations_covered: self.locations_covered,
            retail_price: self.retail_price,
            currency: self.currency,
            not_suitable_for: self.not_suitable_for,
            important_info: self.important_info,
            cancellation_policy: self.cancellation_policy,
            accessibility_info: self.accessibility_info,
            image_urls: self.image_urls,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_service(id)
    }
}

/// SurrealDB implementation of the VendorService repository.
#[derive(Clone)]
pub struct SurrealVendorServiceRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVendorServiceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> VendorServiceRepository for SurrealVendorServiceRepository<C> {
    async fn insert_fields(
        &self,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> TripmartResult<VendorService> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        // A submitted payload must not choose the record id.
        fields.remove("id");
        let content = serde_json::Value::Object(fields);

        let result = self
            .db
            .query("CREATE type::record('vendor_service', $id) CONTENT $content")
            .bind(("id", id_str.clone()))
            .bind(("content", content))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VendorServiceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor_service".into(),
            id: id_str,
        })?;

        Ok(row.into_service(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TripmartResult<VendorService> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('vendor_service', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VendorServiceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor_service".into(),
            id: id_str,
        })?;

        Ok(row.into_service(id)?)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        mut fields: serde_json::Map<String, serde_json::Value>,
    ) -> TripmartResult<VendorService> {
        let id_str = id.to_string();

        fields.remove("id");
        let patch = serde_json::Value::Object(fields);

        let result = self
            .db
            .query(
                "UPDATE type::record('vendor_service', $id) MERGE $patch; \
                 UPDATE type::record('vendor_service', $id) \
                 SET updated_at = time::now();",
            )
            .bind(("id", id_str.clone()))
            .bind(("patch", patch))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VendorServiceRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor_service".into(),
            id: id_str,
        })?;

        Ok(row.into_service(id)?)
    }

    async fn list_by_vendor(&self, vendor_id: Uuid) -> TripmartResult<Vec<VendorService>> {
        let vendor_id_str = vendor_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM vendor_service \
                 WHERE vendor_id = $vendor_id ORDER BY created_at ASC",
            )
            .bind(("vendor_id", vendor_id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VendorServiceRowWithId> = result.take(0).map_err(DbError::from)?;
        let mut services = Vec::with_capacity(rows.len());
        for row in rows {
            services.push(row.try_into_service()?);
        }
        Ok(services)
    }
}
