//! SurrealDB implementation of [`ChatMessageRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tripmart_core::error::TripmartResult;
use tripmart_core::models::chat_message::{ChatMessage, CreateChatMessage, MessageType, Sender};
use tripmart_core::repository::{ChatMessageRepository, Pagination};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ChatMessageRow {
    vendor_id: String,
    sender: String,
    sender_id: String,
    sender_name: String,
    message: String,
    message_type: String,
    update_request_id: Option<String>,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ChatMessageRowWithId {
    record_id: String,
    vendor_id: String,
    sender: String,
    sender_id: String,
    sender_name: String,
    message: String,
    message_type: String,
    update_request_id: Option<String>,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_sender(s: &str) -> Result<Sender, DbError> {
    match s {
        "vendor" => Ok(Sender::Vendor),
        "admin" => Ok(Sender::Admin),
        other => Err(DbError::Decode(format!("unknown sender: {other}"))),
    }
}

fn parse_message_type(s: &str) -> Result<MessageType, DbError> {
    match s {
        "text" => Ok(MessageType::Text),
        "update_request" => Ok(MessageType::UpdateRequest),
        "system" => Ok(MessageType::System),
        other => Err(DbError::Decode(format!("unknown message type: {other}"))),
    }
}

impl ChatMessageRow {
    fn into_message(self, id: Uuid) -> Result<ChatMessage, DbError> {
        let vendor_id = Uuid::parse_str(&self.vendor_id)
            .map_err(|e| DbError::Decode(format!("invalid vendor UUID: {e}")))?;
        let sender_id = Uuid::parse_str(&self.sender_id)
            .map_err(|e| DbError::Decode(format!("invalid sender UUID: {e}")))?;
        let update_request_id = self
            .update_request_id
            .map(|v| Uuid::parse_str(&v))
            .transpose()
            .map_err(|e| DbError::Decode(format!("invalid request UUID: {e}")))?;
        Ok(ChatMessage {
            id,
            vendor_id,
            sender: parse_sender(&self.sender)?,
            sender_id,
            sender_name: self.sender_name,
            message: self.message,
            message_type: parse_message_type(&self.message_type)?,
            update_request_id,
            created_at: self.created_at,
            read_at: self.read_at,
        })
    }
}

impl ChatMessageRowWithId {
    fn try_into_message(self) -> Result<ChatMessage, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = ChatMessageRow {
            vendor_id: self.vendor_id,
            sender: self.sender,
            sender_id: self.sender_id,
            sender_name: self.sender_name,
            message: self.message,
            message_type: self.message_type,
            update_request_id: self.update_request_id,
            created_at: self.created_at,
            read_at: self.read_at,
        };
        row.into_message(id)
    }
}

/// SurrealDB implementation of the ChatMessage repository.
#[derive(Clone)]
pub struct SurrealChatMessageRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealChatMessageRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ChatMessageRepository for SurrealChatMessageRepository<C> {
    async fn append(&self, input: CreateChatMessage) -> TripmartResult<ChatMessage> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('chat_message', $id) SET \
                 vendor_id = $vendor_id, \
                 sender = $sender, \
                 sender_id = $sender_id, \
                 sender_name = $sender_name, \
                 message = $message, \
                 message_type = $message_type, \
                 update_request_id = $update_request_id, \
                 read_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("vendor_id", input.vendor_id.to_string()))
            .bind(("sender", input.sender.as_str().to_string()))
            .bind(("sender_id", input.sender_id.to_string()))
            .bind(("sender_name", input.sender_name))
            .bind(("message", input.message))
            .bind(("message_type", input.message_type.as_str().to_string()))
            .bind((
                "update_request_id",
                input.update_request_id.map(|v| v.to_string()),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ChatMessageRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "chat_message".into(),
            id: id_str,
        })?;

        Ok(row.into_message(id)?)
    }

    async fn list_by_vendor(
        &self,
        vendor_id: Uuid,
        pagination: Pagination,
    ) -> TripmartResult<Vec<ChatMessage>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM chat_message \
                 WHERE vendor_id = $vendor_id ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("vendor_id", vendor_id.to_string()))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ChatMessageRowWithId> = result.take(0).map_err(DbError::from)?;
        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(row.try_into_message()?);
        }
        Ok(messages)
    }

    async fn list_recent(&self, pagination: Pagination) -> TripmartResult<Vec<ChatMessage>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM chat_message \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ChatMessageRowWithId> = result.take(0).map_err(DbError::from)?;
        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(row.try_into_message()?);
        }
        Ok(messages)
    }

    async fn mark_read(&self, vendor_id: Uuid, reader: Sender) -> TripmartResult<u64> {
        // The reader marks the counterparty's messages as read.
        let sender = reader.other();

        let result = self
            .db
            .query(
                "UPDATE chat_message SET read_at = time::now() \
                 WHERE vendor_id = $vendor_id AND sender = $sender \
                 AND read_at = NONE",
            )
            .bind(("vendor_id", vendor_id.to_string()))
            .bind(("sender", sender.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ChatMessageRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.len() as u64)
    }

    async fn unread_count_for_admin(&self) -> TripmartResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM chat_message \
                 WHERE sender = 'vendor' AND read_at = NONE GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn unread_count_for_vendor(&self, vendor_id: Uuid) -> TripmartResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM chat_message \
                 WHERE vendor_id = $vendor_id AND sender = 'admin' \
                 AND read_at = NONE GROUP ALL",
            )
            .bind(("vendor_id", vendor_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
