//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Point lookups return a single
//! record or a `NotFound` error; list queries always return a `Vec` —
//! a return shape is never overloaded.

use uuid::Uuid;

use crate::error::TripmartResult;
use crate::models::{
    chat_message::{ChatMessage, CreateChatMessage, Sender},
    update_request::{CreateUpdateRequest, RequestFilter, ReviewDecision, UpdateRequest},
    vendor::{CreateVendor, Vendor},
    vendor_service::VendorService,
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// Vendor profile records.
pub trait VendorRepository: Send + Sync {
    fn create(&self, input: CreateVendor) -> impl Future<Output = TripmartResult<Vendor>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TripmartResult<Vendor>> + Send;

    /// Partial update: only the named fields are touched. Keys are
    /// internal (storage) field names.
    fn update_fields(
        &self,
        id: Uuid,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> impl Future<Output = TripmartResult<Vendor>> + Send;
}

/// Vendor service (listing) records.
pub trait VendorServiceRepository: Send + Sync {
    /// Insert a brand-new service record from a field map. The map
    /// must include `vendor_id` and `service_name`.
    fn insert_fields(
        &self,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> impl Future<Output = TripmartResult<VendorService>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TripmartResult<VendorService>> + Send;

    /// Partial update: only the named fields are touched.
    fn update_fields(
        &self,
        id: Uuid,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> impl Future<Output = TripmartResult<VendorService>> + Send;

    fn list_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> impl Future<Output = TripmartResult<Vec<VendorService>>> + Send;
}

/// Persisted update requests (the change-request document store).
pub trait UpdateRequestRepository: Send + Sync {
    fn insert(
        &self,
        input: CreateUpdateRequest,
    ) -> impl Future<Output = TripmartResult<UpdateRequest>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = TripmartResult<UpdateRequest>> + Send;

    /// Atomically flip a *pending* request to the decision's terminal
    /// status, stamping reviewer fields and `reviewed_at`.
    ///
    /// Returns `Ok(None)` when no pending request matched the id —
    /// either it does not exist or it was already reviewed; callers
    /// disambiguate with [`find_by_id`](Self::find_by_id). This
    /// conditional update is the sole serialization point for
    /// concurrent reviews.
    fn mark_reviewed(
        &self,
        id: Uuid,
        decision: ReviewDecision,
    ) -> impl Future<Output = TripmartResult<Option<UpdateRequest>>> + Send;

    /// List requests matching the filter, newest first.
    fn list(
        &self,
        filter: RequestFilter,
        pagination: Pagination,
    ) -> impl Future<Output = TripmartResult<Vec<UpdateRequest>>> + Send;
}

/// Append-only chat message log (the notification sink).
pub trait ChatMessageRepository: Send + Sync {
    fn append(
        &self,
        input: CreateChatMessage,
    ) -> impl Future<Output = TripmartResult<ChatMessage>> + Send;

    /// A vendor's thread, oldest first.
    fn list_by_vendor(
        &self,
        vendor_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = TripmartResult<Vec<ChatMessage>>> + Send;

    /// Recent messages across all threads, newest first (admin view).
    fn list_recent(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = TripmartResult<Vec<ChatMessage>>> + Send;

    /// Stamp `read_at` on the counterparty's unread messages in a
    /// vendor's thread. Returns how many messages were stamped.
    fn mark_read(
        &self,
        vendor_id: Uuid,
        reader: Sender,
    ) -> impl Future<Output = TripmartResult<u64>> + Send;

    /// Unread vendor-authored messages across all threads.
    fn unread_count_for_admin(&self) -> impl Future<Output = TripmartResult<u64>> + Send;

    /// Unread admin-authored messages in one vendor's thread.
    fn unread_count_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> impl Future<Output = TripmartResult<u64>> + Send;
}
