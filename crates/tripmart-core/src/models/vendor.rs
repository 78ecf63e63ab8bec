//! Vendor profile domain model.
//!
//! Field names here are the internal (storage) names. The
//! caller-facing camelCase names are translated by the approval
//! crate's field table before anything reaches this struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Onboarding review state of a vendor account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Approved => "approved",
            VendorStatus::Rejected => "rejected",
            VendorStatus::Suspended => "suspended",
        }
    }
}

/// A registered travel vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub business_name: String,
    pub legal_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Vendor category (e.g. tour operator, accommodation provider).
    pub vendor_type: Option<String>,
    pub vendor_type_other: Option<String>,
    pub operating_areas: Vec<String>,
    pub operating_areas_other: Option<String>,
    pub business_address: Option<String>,
    pub business_reg_number: Option<String>,
    pub tax_id: Option<String>,
    pub bank_name: Option<String>,
    pub bank_name_other: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub bank_branch: Option<String>,
    pub reg_certificate_url: Option<String>,
    pub nic_passport_url: Option<String>,
    pub tourism_license_url: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub gallery_urls: Vec<String>,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    /// The vendor as a field-name → value map, keyed on internal
    /// (storage) names. This is the "current record" side of a
    /// profile diff.
    pub fn field_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Fields required to register a new vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVendor {
    pub business_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone_number: String,
    pub vendor_type: Option<String>,
    pub business_address: Option<String>,
    pub operating_areas: Vec<String>,
}
