//! Vendor service (tour/activity listing) domain model.
//!
//! Services are child records of a vendor. Service field names are
//! already internal (snake_case) at the caller boundary, so no name
//! translation applies to this domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable service offered by a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorService {
    pub id: Uuid,
    /// Owning vendor. Forced by the approval engine on insertion;
    /// never taken from a submitted payload.
    pub vendor_id: Uuid,
    pub service_name: String,
    pub service_category: Option<String>,
    pub short_description: Option<String>,
    pub whats_included: Option<String>,
    pub whats_not_included: Option<String>,
    pub duration_value: Option<i64>,
    pub duration_unit: Option<String>,
    pub languages_offered: Vec<String>,
    pub group_size_min: Option<i64>,
    pub group_size_max: Option<i64>,
    pub daily_capacity: Option<i64>,
    pub operating_days: Vec<String>,
    pub locations_covered: Vec<String>,
    pub retail_price: Option<f64>,
    pub currency: Option<String>,
    pub not_suitable_for: Option<String>,
    pub important_info: Option<String>,
    pub cancellation_policy: Option<String>,
    pub accessibility_info: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorService {
    /// The service as a field-name → value map (the "current record"
    /// side of a service diff).
    pub fn field_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}
