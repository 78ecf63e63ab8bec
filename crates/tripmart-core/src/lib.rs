//! Tripmart Core — domain models, repository traits, and the shared
//! error taxonomy for the travel-vendor marketplace backend.
//!
//! This crate is I/O-free. Storage implementations live in
//! `tripmart-db`; the update-request approval workflow lives in
//! `tripmart-approval`.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{TripmartError, TripmartResult};
