//! SurrealDB repository implementations.

mod chat_message;
mod update_request;
mod vendor;
mod vendor_service;

pub use chat_message::SurrealChatMessageRepository;
pub use update_request::SurrealUpdateRequestRepository;
pub use vendor::SurrealVendorRepository;
pub use vendor_service::SurrealVendorServiceRepository;
