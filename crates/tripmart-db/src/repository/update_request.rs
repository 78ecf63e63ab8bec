//! SurrealDB implementation of [`UpdateRequestRepository`].
//!
//! The review transition is a single conditional UPDATE guarded on
//! `status = 'pending'`. SurrealDB executes each statement atomically,
//! so two concurrent reviews of the same request can never both
//! observe a pending document.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tripmart_core::error::TripmartResult;
use tripmart_core::models::update_request::{
    CreateUpdateRequest, RequestFilter, RequestStatus, RequestType, ReviewDecision, UpdateRequest,
};
use tripmart_core::repository::{Pagination, UpdateRequestRepository};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UpdateRequestRow {
    vendor_id: String,
    service_id: Option<String>,
    request_type: String,
    requested_by: String,
    requested_by_name: String,
    current_data: serde_json::Value,
    requested_data: serde_json::Value,
    changed_fields: Vec<String>,
    status: String,
    reviewed_by: Option<String>,
    reviewed_by_name: Option<String>,
    review_reason: Option<String>,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UpdateRequestRowWithId {
    record_id: String,
    vendor_id: String,
    service_id: Option<String>,
    request_type: String,
    requested_by: String,
    requested_by_name: String,
    current_data: serde_json::Value,
    requested_data: serde_json::Value,
    changed_fields: Vec<String>,
    status: String,
    reviewed_by: Option<String>,
    reviewed_by_name: Option<String>,
    review_reason: Option<String>,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<RequestStatus, DbError> {
    match s {
        "pending" => Ok(RequestStatus::Pending),
        "approved" => Ok(RequestStatus::Approved),
        "rejected" => Ok(RequestStatus::Rejected),
        other => Err(DbError::Decode(format!("unknown request status: {other}"))),
    }
}

fn parse_request_type(s: &str) -> Result<RequestType, DbError> {
    match s {
        "profile_update" => Ok(RequestType::ProfileUpdate),
        "service_update" => Ok(RequestType::ServiceUpdate),
        "service_addition" => Ok(RequestType::ServiceAddition),
        other => Err(DbError::Decode(format!("unknown request type: {other}"))),
    }
}

fn parse_uuid(s: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_opt_uuid(s: Option<String>, what: &str) -> Result<Option<Uuid>, DbError> {
    s.map(|v| parse_uuid(&v, what)).transpose()
}

impl UpdateRequestRow {
    fn into_request(self, id: Uuid) -> Result<UpdateRequest, DbError> {
        Ok(UpdateRequest {
            id,
            vendor_id: parse_uuid(&self.vendor_id, "vendor")?,
            service_id: parse_opt_uuid(self.service_id, "service")?,
            request_type: parse_request_type(&self.request_type)?,
            requested_by: parse_uuid(&self.requested_by, "requester")?,
            requested_by_name: self.requested_by_name,
            current_data: self.current_data,
            requested_data: self.requested_data,
            changed_fields: self.changed_fields,
            status: parse_status(&self.status)?,
            reviewed_by: parse_opt_uuid(self.reviewed_by, "reviewer")?,
            reviewed_by_name: self.reviewed_by_name,
            review_reason: self.review_reason,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        })
    }
}

impl UpdateRequestRowWithId {
    fn try_into_request(self) -> Result<UpdateRequest, DbError> {
        let id = parse_uuid(&self.record_id, "request")?;
        let row = UpdateRequestRow {
            vendor_id: self.vendor_id,
            service_id: self.service_id,
            request_type: self.request_type,
            requested_by: self.requested_by,
            requested_by_name: self.requested_by_name,
            current_data: self.current_data,
            requested_data: self.requested_data,
            changed_fields: self.changed_fields,
            status: self.status,
            reviewed_by: self.reviewed_by,
            reviewed_by_name: self.reviewed_by_name,
            review_reason: self.review_reason,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        };
        row.into_request(id)
    }
}

/// SurrealDB implementation of the UpdateRequest repository.
#[derive(Clone)]
pub struct SurrealUpdateRequestRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUpdateRequestRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UpdateRequestRepository for SurrealUpdateRequestRepository<C> {
    async fn insert(&self, input: CreateUpdateRequest) -> TripmartResult<UpdateRequest> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('update_request', $id) SET \
                 vendor_id = $vendor_id, \
                 service_id = $service_id, \
                 request_type = $request_type, \
                 requested_by = $requested_by, \
                 requested_by_name = $requested_by_name, \
                 current_data = $current_data, \
                 requested_data = $requested_data, \
                 changed_fields = $changed_fields, \
                 status = $status, \
                 reviewed_by = NONE, \
                 reviewed_by_name = NONE, \
                 review_reason = NONE, \
                 reviewed_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("vendor_id", input.vendor_id.to_string()))
            .bind(("service_id", input.service_id.map(|s| s.to_string())))
            .bind(("request_type", input.request_type.as_str().to_string()))
            .bind(("requested_by", input.requested_by.to_string()))
            .bind(("requested_by_name", input.requested_by_name))
            .bind((
                "current_data",
                serde_json::Value::Object(input.current_data),
            ))
            .bind((
                "requested_data",
                serde_json::Value::Object(input.requested_data),
            ))
            .bind(("changed_fields", input.changed_fields))
            .bind(("status", RequestStatus::Pending.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<UpdateRequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "update_request".into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }

    async fn find_by_id(&self, id: Uuid) -> TripmartResult<UpdateRequest> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('update_request', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UpdateRequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "update_request".into(),
            id: id_str,
        })?;

        Ok(row.into_request(id)?)
    }

    async fn mark_reviewed(
        &self,
        id: Uuid,
        decision: ReviewDecision,
    ) -> TripmartResult<Option<UpdateRequest>> {
        let id_str = id.to_string();

        // Conditional test-and-set: only a pending request matches.
        // An empty result means the request does not exist or was
        // already reviewed; the caller disambiguates.
        let result = self
            .db
            .query(
                "UPDATE type::record('update_request', $id) SET \
                 status = $status, \
                 reviewed_by = $reviewed_by, \
                 reviewed_by_name = $reviewed_by_name, \
                 review_reason = $review_reason, \
                 reviewed_at = time::now() \
                 WHERE status = 'pending'",
            )
            .bind(("id", id_str))
            .bind(("status", decision.status.as_str().to_string()))
            .bind(("reviewed_by", decision.reviewed_by.to_string()))
            .bind(("reviewed_by_name", decision.reviewed_by_name))
            .bind(("review_reason", decision.review_reason))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<UpdateRequestRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_request(id)?)),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        filter: RequestFilter,
        pagination: Pagination,
    ) -> TripmartResult<Vec<UpdateRequest>> {
        let mut conditions = Vec::new();
        if filter.vendor_id.is_some() {
            conditions.push("vendor_id = $vendor_id");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM update_request \
             {where_clause}ORDER BY created_at DESC \
             LIMIT $limit START $offset",
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));

        if let Some(vendor_id) = filter.vendor_id {
            builder = builder.bind(("vendor_id", vendor_id.to_string()));
        }
        if let Some(status) = filter.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<UpdateRequestRowWithId> = result.take(0).map_err(DbError::from)?;
        let mut requests = Vec::with_capacity(rows.len());
        for row in rows {
            requests.push(row.try_into_request()?);
        }
        Ok(requests)
    }
}
