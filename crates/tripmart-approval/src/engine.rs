//! Update-request engine — submission and review orchestration.
//!
//! One invariant governs every operation here: the persisted state
//! change happens-before the chat notification, and a notification
//! failure never rolls back or hides a state change. The request
//! store's conditional update is the only concurrency control for
//! reviews; there is no separate lock.

use serde_json::{Map, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use tripmart_core::error::{TripmartError, TripmartResult};
use tripmart_core::models::chat_message::{CreateChatMessage, MessageType, Sender};
use tripmart_core::models::update_request::{
    CreateUpdateRequest, RequestFilter, RequestStatus, RequestType, ReviewDecision, UpdateRequest,
};
use tripmart_core::repository::{
    ChatMessageRepository, Pagination, UpdateRequestRepository, VendorRepository,
    VendorServiceRepository,
};

use crate::diff::{DiffOutcome, FieldNaming, compute_diff};
use crate::error::ApprovalError;
use crate::fields;
use crate::messages;

/// Input for a vendor profile update submission.
///
/// `changes` is keyed on external (camelCase) field names; null
/// values mean "not requested".
#[derive(Debug)]
pub struct SubmitProfileUpdate {
    pub vendor_id: Uuid,
    pub requested_by: Uuid,
    pub requested_by_name: String,
    pub changes: Map<String, Value>,
}

/// Input for a service update submission. `changes` is keyed on
/// internal field names (the service domain has no name translation).
#[derive(Debug)]
pub struct SubmitServiceUpdate {
    pub vendor_id: Uuid,
    pub service_id: Uuid,
    pub requested_by: Uuid,
    pub requested_by_name: String,
    pub changes: Map<String, Value>,
}

/// Input for a new-service submission. `service` is the complete new
/// record; no diff applies.
#[derive(Debug)]
pub struct SubmitServiceAddition {
    pub vendor_id: Uuid,
    pub requested_by: Uuid,
    pub requested_by_name: String,
    pub service: Map<String, Value>,
}

/// Reviewer identity for an approve/reject call.
#[derive(Debug)]
pub struct ReviewInput {
    pub request_id: Uuid,
    pub reviewed_by: Uuid,
    pub reviewed_by_name: String,
}

/// The update-request engine.
///
/// Generic over repository implementations so the workflow layer has
/// no dependency on the database crate. Constructed once at process
/// startup with its stores injected; holds no other state.
pub struct ApprovalEngine<V, S, R, M>
where
    V: VendorRepository,
    S: VendorServiceRepository,
    R: UpdateRequestRepository,
    M: ChatMessageRepository,
{
    vendor_repo: V,
    service_repo: S,
    request_repo: R,
    message_repo: M,
}

impl<V, S, R, M> ApprovalEngine<V, S, R, M>
where
    V: VendorRepository,
    S: VendorServiceRepository,
    R: UpdateRequestRepository,
    M: ChatMessageRepository,
{
    pub fn new(vendor_repo: V, service_repo: S, request_repo: R, message_repo: M) -> Self {
        Self {
            vendor_repo,
            service_repo,
            request_repo,
            message_repo,
        }
    }

    // -------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------

    /// Submit a vendor profile change-set for review.
    ///
    /// Diffs the candidate against the current vendor record; an
    /// all-unchanged candidate is a validation error and creates
    /// nothing.
    pub async fn submit_profile_update(
        &self,
        input: SubmitProfileUpdate,
    ) -> TripmartResult<UpdateRequest> {
        // 1. Load the current record — the request store must not see
        //    a change-set for a vendor that does not exist.
        let vendor = self.vendor_repo.get_by_id(input.vendor_id).await?;

        // 2. Diff candidate against current.
        let diff = match compute_diff(&vendor.field_map(), &input.changes, FieldNaming::Profile) {
            DiffOutcome::Changed(diff) => diff,
            DiffOutcome::Unchanged => return Err(ApprovalError::NoChanges.into()),
        };

        // 3. Persist the pending request. A store failure fails the
        //    whole submission; no partial state exists.
        let request = self
            .request_repo
            .insert(CreateUpdateRequest {
                vendor_id: input.vendor_id,
                service_id: None,
                request_type: RequestType::ProfileUpdate,
                requested_by: input.requested_by,
                requested_by_name: input.requested_by_name.clone(),
                current_data: diff.current_data,
                requested_data: diff.requested_data,
                changed_fields: diff.changed_fields,
            })
            .await?;

        info!(request_id = %request.id, vendor_id = %request.vendor_id,
              "profile update request created");

        // 4. Best-effort notification.
        let summary = messages::field_summary(&request.changed_fields);
        self.notify(
            &request,
            Sender::Vendor,
            input.requested_by,
            input.requested_by_name,
            MessageType::UpdateRequest,
            messages::profile_update_submitted(&summary),
        )
        .await;

        Ok(request)
    }

    /// Submit a change-set against one of the vendor's services.
    pub async fn submit_service_update(
        &self,
        input: SubmitServiceUpdate,
    ) -> TripmartResult<UpdateRequest> {
        // 1. Load the target service.
        let service = self.service_repo.get_by_id(input.service_id).await?;

        // 2. Diff — service fields are already internal names.
        let diff = match compute_diff(&service.field_map(), &input.changes, FieldNaming::Internal) {
            DiffOutcome::Changed(diff) => diff,
            DiffOutcome::Unchanged => return Err(ApprovalError::NoChanges.into()),
        };

        // 3. Persist.
        let request = self
            .request_repo
            .insert(CreateUpdateRequest {
                vendor_id: input.vendor_id,
                service_id: Some(input.service_id),
                request_type: RequestType::ServiceUpdate,
                requested_by: input.requested_by,
                requested_by_name: input.requested_by_name.clone(),
                current_data: diff.current_data,
                requested_data: diff.requested_data,
                changed_fields: diff.changed_fields,
            })
            .await?;

        info!(request_id = %request.id, service_id = %input.service_id,
              "service update request created");

        // 4. Best-effort notification.
        let summary = messages::field_summary(&request.changed_fields);
        self.notify(
            &request,
            Sender::Vendor,
            input.requested_by,
            input.requested_by_name,
            MessageType::UpdateRequest,
            messages::service_update_submitted(&summary),
        )
        .await;

        Ok(request)
    }

    /// Submit a brand-new service for review. The full payload is the
    /// change-set; there is nothing to diff against.
    pub async fn submit_service_addition(
        &self,
        input: SubmitServiceAddition,
    ) -> TripmartResult<UpdateRequest> {
        if input.service.is_empty() {
            return Err(ApprovalError::NoChanges.into());
        }

        // Subject must exist before a request can reference it.
        let vendor = self.vendor_repo.get_by_id(input.vendor_id).await?;

        let changed_fields: Vec<String> = input.service.keys().cloned().collect();
        let service_name = service_name_of(&input.service);

        let request = self
            .request_repo
            .insert(CreateUpdateRequest {
                vendor_id: vendor.id,
                service_id: None,
                request_type: RequestType::ServiceAddition,
                requested_by: input.requested_by,
                requested_by_name: input.requested_by_name.clone(),
                current_data: Map::new(),
                requested_data: input.service,
                changed_fields,
            })
            .await?;

        info!(request_id = %request.id, vendor_id = %request.vendor_id,
              "service addition request created");

        self.notify(
            &request,
            Sender::Vendor,
            input.requested_by,
            input.requested_by_name,
            MessageType::UpdateRequest,
            messages::service_addition_submitted(&service_name),
        )
        .await;

        Ok(request)
    }

    // -------------------------------------------------------------------
    // Review
    // -------------------------------------------------------------------

    /// Approve a pending request and apply its changes to the record
    /// store.
    ///
    /// The status transition commits first; a downstream apply
    /// failure is logged but does not surface or roll back (the
    /// request document remains the source of truth for what was
    /// approved).
    pub async fn approve(&self, input: ReviewInput) -> TripmartResult<UpdateRequest> {
        // 1. Atomic pending → approved.
        let request = self
            .mark_reviewed_or_conflict(
                input.request_id,
                ReviewDecision {
                    status: RequestStatus::Approved,
                    reviewed_by: input.reviewed_by,
                    reviewed_by_name: input.reviewed_by_name.clone(),
                    review_reason: None,
                },
            )
            .await?;

        info!(request_id = %request.id, request_type = %request.request_type,
              reviewed_by = %input.reviewed_by, "update request approved");

        // 2. Apply the approved changes downstream.
        let confirmation = self.apply_approved(&request).await;

        // 3. Best-effort confirmation to the vendor's thread.
        self.notify(
            &request,
            Sender::Admin,
            input.reviewed_by,
            input.reviewed_by_name,
            MessageType::System,
            confirmation,
        )
        .await;

        Ok(request)
    }

    /// Reject a pending request with a mandatory reason. No record
    /// store mutation occurs.
    pub async fn reject(&self, input: ReviewInput, reason: String) -> TripmartResult<UpdateRequest> {
        if reason.trim().is_empty() {
            return Err(ApprovalError::ReasonRequired.into());
        }

        let request = self
            .mark_reviewed_or_conflict(
                input.request_id,
                ReviewDecision {
                    status: RequestStatus::Rejected,
                    reviewed_by: input.reviewed_by,
                    reviewed_by_name: input.reviewed_by_name.clone(),
                    review_reason: Some(reason.clone()),
                },
            )
            .await?;

        info!(request_id = %request.id, reviewed_by = %input.reviewed_by,
              "update request rejected");

        self.notify(
            &request,
            Sender::Admin,
            input.reviewed_by,
            input.reviewed_by_name,
            MessageType::System,
            messages::request_rejected(
                request.reviewed_by_name.as_deref().unwrap_or_default(),
                &reason,
            ),
        )
        .await;

        Ok(request)
    }

    // -------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------

    pub async fn get_request(&self, request_id: Uuid) -> TripmartResult<UpdateRequest> {
        self.request_repo.find_by_id(request_id).await
    }

    /// List requests for the admin view, newest first.
    pub async fn list_requests(
        &self,
        filter: RequestFilter,
        pagination: Pagination,
    ) -> TripmartResult<Vec<UpdateRequest>> {
        self.request_repo.list(filter, pagination).await
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    /// Conditional transition; turns a missed match into the precise
    /// error: `NotFound` when no such request exists, otherwise
    /// `AlreadyReviewed` carrying the terminal status.
    async fn mark_reviewed_or_conflict(
        &self,
        request_id: Uuid,
        decision: ReviewDecision,
    ) -> TripmartResult<UpdateRequest> {
        match self.request_repo.mark_reviewed(request_id, decision).await? {
            Some(request) => Ok(request),
            None => match self.request_repo.find_by_id(request_id).await {
                Ok(existing) => Err(ApprovalError::AlreadyReviewed {
                    status: existing.status,
                }
                .into()),
                Err(TripmartError::NotFound { entity, id }) => {
                    Err(TripmartError::NotFound { entity, id })
                }
                Err(other) => Err(other),
            },
        }
    }

    /// Apply an approved request to its record store and return the
    /// confirmation message text. Failures are logged, never
    /// surfaced: the status transition has already committed.
    async fn apply_approved(&self, request: &UpdateRequest) -> String {
        let reviewer_name = request.reviewed_by_name.as_deref().unwrap_or_default();
        let requested = request
            .requested_data
            .as_object()
            .cloned()
            .unwrap_or_default();

        match request.request_type {
            RequestType::ProfileUpdate => {
                // Keys are internal at this point (the diff already
                // translated them); mapping again is a pass-through
                // fallback for anything that slipped through.
                let mut patch = Map::new();
                for (key, value) in requested {
                    if !fields::is_known(&key) {
                        warn!(field = %key, "unmapped field passed through");
                    }
                    patch.insert(fields::resolve_internal(&key).to_string(), value);
                }

                if let Err(e) = self
                    .vendor_repo
                    .update_fields(request.vendor_id, patch)
                    .await
                {
                    error!(request_id = %request.id, error = %e,
                           "failed to apply approved profile update");
                }

                messages::profile_update_approved(reviewer_name)
            }
            RequestType::ServiceUpdate => {
                match request.service_id {
                    Some(service_id) => {
                        if let Err(e) =
                            self.service_repo.update_fields(service_id, requested).await
                        {
                            error!(request_id = %request.id, service_id = %service_id,
                                   error = %e, "failed to apply approved service update");
                        }
                    }
                    None => {
                        error!(request_id = %request.id,
                               "service update request has no target service");
                    }
                }

                messages::service_update_approved(reviewer_name)
            }
            RequestType::ServiceAddition => {
                let service_name = service_name_of(&requested);

                // Ownership is never taken from the payload.
                let mut fields = requested;
                fields.insert(
                    "vendor_id".to_string(),
                    Value::String(request.vendor_id.to_string()),
                );

                if let Err(e) = self.service_repo.insert_fields(fields).await {
                    error!(request_id = %request.id, error = %e,
                           "failed to insert approved new service");
                }

                messages::service_addition_approved(&service_name, reviewer_name)
            }
        }
    }

    /// Append a chat message to the subject's thread. Best-effort:
    /// a sink failure is logged and swallowed.
    async fn notify(
        &self,
        request: &UpdateRequest,
        sender: Sender,
        sender_id: Uuid,
        sender_name: String,
        message_type: MessageType,
        message: String,
    ) {
        let result = self
            .message_repo
            .append(CreateChatMessage {
                vendor_id: request.vendor_id,
                sender,
                sender_id,
                sender_name,
                message,
                message_type,
                update_request_id: Some(request.id),
            })
            .await;

        if let Err(e) = result {
            warn!(request_id = %request.id, error = %e,
                  "failed to append chat notification");
        }
    }
}

/// The display name for a submitted service payload.
fn service_name_of(fields: &Map<String, Value>) -> String {
    fields
        .get("service_name")
        .and_then(Value::as_str)
        .unwrap_or("New Service")
        .to_string()
}
