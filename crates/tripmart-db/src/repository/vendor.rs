//! SurrealDB implementation of [`VendorRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tripmart_core::error::TripmartResult;
use tripmart_core::models::vendor::{CreateVendor, Vendor, VendorStatus};
use tripmart_core::repository::VendorRepository;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct VendorRow {
    business_name: String,
    legal_name: Option<String>,
    contact_person: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    vendor_type: Option<String>,
    vendor_type_other: Option<String>,
    operating_areas: Vec<String>,
    operating_areas_other: Option<String>,
    business_address: Option<String>,
    business_reg_number: Option<String>,
    tax_id: Option<String>,
    bank_name: Option<String>,
    bank_name_other: Option<String>,
    account_holder_name: Option<String>,
    account_number: Option<String>,
    bank_branch: Option<String>,
    reg_certificate_url: Option<String>,
    nic_passport_url: Option<String>,
    tourism_license_url: Option<String>,
    logo_url: Option<String>,
    cover_image_url: Option<String>,
    gallery_urls: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<VendorStatus, DbError> {
    match s {
        "pending" => Ok(VendorStatus::Pending),
        "approved" => Ok(VendorStatus::Approved),
        "rejected" => Ok(VendorStatus::Rejected),
        "suspended" => Ok(VendorStatus::Suspended),
        other => Err(DbError::Decode(format!("unknown vendor status: {other}"))),
    }
}

impl VendorRow {
    fn into_vendor(self, id: Uuid) -> Result<Vendor, DbError> {
        Ok(Vendor {
            id,
            business_name: self.business_name,
            legal_name: self.legal_name,
            contact_person: self.contact_person,
            email: self.email,
            phone_number: self.phone_number,
            vendor_type: self.vendor_type,
            vendor_type_other: self.vendor_type_other,
            operating_areas: self.operating_areas,
            operating_areas_other: self.operating_areas_other,
            business_address: self.business_address,
            business_reg_number: self.business_reg_number,
            tax_id: self.tax_id,
            bank_name: self.bank_name,
            bank_name_other: self.bank_name_other,
            account_holder_name: self.account_holder_name,
            account_number: self.account_number,
            bank_branch: self.bank_branch,
            reg_certificate_url: self.reg_certificate_url,
            nic_passport_url: self.nic_passport_url,
            tourism_license_url: self.tourism_license_url,
            logo_url: self.logo_url,
            cover_image_url: self.cover_image_url,
            gallery_urls: self.gallery_urls,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Vendor repository.
#[derive(Clone)]
pub struct SurrealVendorRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVendorRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> VendorRepository for SurrealVendorRepository<C> {
    async fn create(&self, input: CreateVendor) -> TripmartResult<Vendor> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('vendor', $id) SET \
                 business_name = $business_name, \
                 contact_person = $contact_person, \
                 email = $email, \
                 phone_number = $phone_number, \
                 vendor_type = $vendor_type, \
                 business_address = $business_address, \
                 operating_areas = $operating_areas, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("business_name", input.business_name))
            .bind(("contact_person", Some(input.contact_person)))
            .bind(("email", Some(input.email)))
            .bind(("phone_number", Some(input.phone_number)))
            .bind(("vendor_type", input.vendor_type))
            .bind(("business_address", input.business_address))
            .bind(("operating_areas", input.operating_areas))
            .bind(("status", "pending".to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VendorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor".into(),
            id: id_str,
        })?;

        Ok(row.into_vendor(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TripmartResult<Vendor> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('vendor', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VendorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor".into(),
            id: id_str,
        })?;

        Ok(row.into_vendor(id)?)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> TripmartResult<Vendor> {
        let id_str = id.to_string();
        let patch = serde_json::Value::Object(fields);

        // MERGE touches only the named fields; unknown keys are
        // dropped by the SCHEMAFULL table definition. The second
        // statement stamps updated_at on the same record.
        let result = self
            .db
            .query(
                "UPDATE type::record('vendor', $id) MERGE $patch; \
                 UPDATE type::record('vendor', $id) \
                 SET updated_at = time::now();",
            )
            .bind(("id", id_str.clone()))
            .bind(("patch", patch))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VendorRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "vendor".into(),
            id: id_str,
        })?;

        Ok(row.into_vendor(id)?)
    }
}
