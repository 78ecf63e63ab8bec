//! Approval workflow error types.

use thiserror::Error;
use tripmart_core::error::TripmartError;
use tripmart_core::models::update_request::RequestStatus;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("no changes requested")]
    NoChanges,

    #[error("a rejection reason is required")]
    ReasonRequired,

    #[error("request already reviewed: status is {status}")]
    AlreadyReviewed { status: RequestStatus },
}

impl From<ApprovalError> for TripmartError {
    fn from(err: ApprovalError) -> Self {
        match err {
            ApprovalError::NoChanges | ApprovalError::ReasonRequired => TripmartError::Validation {
                message: err.to_string(),
            },
            ApprovalError::AlreadyReviewed { status } => TripmartError::AlreadyReviewed { status },
        }
    }
}
