//! Chat message domain model.
//!
//! Messages form an append-only log per vendor thread. The only
//! mutation ever applied is a single `read_at` stamp by the
//! read-marking operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the vendor↔admin conversation authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Vendor,
    Admin,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Vendor => "vendor",
            Sender::Admin => "admin",
        }
    }

    /// The counterparty whose messages a reader marks as read.
    pub fn other(&self) -> Sender {
        match self {
            Sender::Vendor => Sender::Admin,
            Sender::Admin => Sender::Vendor,
        }
    }
}

/// Message kind. `UpdateRequest` and `System` messages are emitted by
/// the approval engine as side effects of the request lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    UpdateRequest,
    System,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::UpdateRequest => "update_request",
            MessageType::System => "system",
        }
    }
}

/// A single message in a vendor's chat thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// The vendor thread this message belongs to.
    pub vendor_id: Uuid,
    pub sender: Sender,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub message_type: MessageType,
    /// Cross-reference to the update request this message announces.
    pub update_request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Fields required to append a new chat message.
#[derive(Debug, Clone)]
pub struct CreateChatMessage {
    pub vendor_id: Uuid,
    pub sender: Sender,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub message_type: MessageType,
    pub update_request_id: Option<Uuid>,
}
