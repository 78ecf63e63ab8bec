//! Domain models for Tripmart.
//!
//! These are the core types shared across all crates.

pub mod chat_message;
pub mod update_request;
pub mod vendor;
pub mod vendor_service;
