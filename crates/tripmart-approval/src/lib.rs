//! Tripmart Approval — the update-request engine: field-level diffs,
//! the pending → approved/rejected lifecycle, and the chat messages
//! announcing each transition.

pub mod diff;
pub mod engine;
pub mod error;
pub mod fields;
pub mod messages;

pub use diff::{DiffOutcome, FieldDiff, FieldNaming, compute_diff};
pub use engine::{
    ApprovalEngine, ReviewInput, SubmitProfileUpdate, SubmitServiceAddition, SubmitServiceUpdate,
};
pub use error::ApprovalError;
