//! Error types for the Tripmart system.

use thiserror::Error;

use crate::models::update_request::RequestStatus;

#[derive(Debug, Error)]
pub enum TripmartError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The update request left the `pending` state before this review
    /// attempt. Carries the terminal status so callers can render
    /// "already approved" / "already rejected" precisely.
    #[error("Update request already reviewed: status is {status}")]
    AlreadyReviewed { status: RequestStatus },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TripmartResult<T> = Result<T, TripmartError>;
