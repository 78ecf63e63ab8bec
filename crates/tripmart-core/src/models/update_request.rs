//! Update request domain model.
//!
//! An update request is a vendor-submitted change-set against the
//! vendor's own profile or one of its services. It is created in the
//! `pending` state and transitions exactly once to `approved` or
//! `rejected`; there is no path back to `pending` and a reviewed
//! request is never written again.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of change the request proposes. Determines which record
/// store an approval applies to and whether diff-against-current or
/// raw-insert semantics are used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    ProfileUpdate,
    ServiceUpdate,
    ServiceAddition,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::ProfileUpdate => "profile_update",
            RequestType::ServiceUpdate => "service_update",
            RequestType::ServiceAddition => "service_addition",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of an update request. `Pending` is the only
/// non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted change proposal awaiting (or past) review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: Uuid,
    /// The vendor whose data the request concerns (the subject).
    pub vendor_id: Uuid,
    /// The specific service targeted by a `service_update` request.
    /// Absent for profile-scoped requests and additions.
    pub service_id: Option<Uuid>,
    pub request_type: RequestType,
    pub requested_by: Uuid,
    pub requested_by_name: String,
    /// Field → value as it existed at submission time, keyed on
    /// internal names. Empty for `service_addition`.
    pub current_data: serde_json::Value,
    /// Field → proposed value, keyed on internal names. For
    /// `service_addition` this is the complete new record.
    pub requested_data: serde_json::Value,
    /// External (caller-facing) names of the changed fields, in the
    /// order they were diffed. Fixed at creation, never recomputed.
    pub changed_fields: Vec<String>,
    pub status: RequestStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_by_name: Option<String>,
    pub review_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Null while `pending`.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Fields required to persist a new (pending) update request.
#[derive(Debug, Clone)]
pub struct CreateUpdateRequest {
    pub vendor_id: Uuid,
    pub service_id: Option<Uuid>,
    pub request_type: RequestType,
    pub requested_by: Uuid,
    pub requested_by_name: String,
    pub current_data: serde_json::Map<String, serde_json::Value>,
    pub requested_data: serde_json::Map<String, serde_json::Value>,
    pub changed_fields: Vec<String>,
}

/// The reviewer's verdict, applied atomically to a pending request.
#[derive(Debug, Clone)]
pub struct ReviewDecision {
    /// Terminal status to move to (`Approved` or `Rejected`).
    pub status: RequestStatus,
    pub reviewed_by: Uuid,
    pub reviewed_by_name: String,
    /// Required for rejections, absent for approvals.
    pub review_reason: Option<String>,
}

/// Filter for listing update requests (admin view).
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub vendor_id: Option<Uuid>,
    pub status: Option<RequestStatus>,
}
