//! `leafy-store` — persistence gateway, notifier port, and the storefront
//! application service.
//!
//! The gateway collapses the original deployment's duplicated storage
//! fallback chains into one trait with two backends: in-memory (tests/dev)
//! and Postgres. Which backend runs is a wiring decision made once at
//! startup, not scattered through request handlers.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod notifier;
pub mod postgres;
pub mod service;

pub use error::StoreError;
pub use gateway::StoreGateway;
pub use memory::MemoryStore;
pub use notifier::{Notifier, NotifyError, TracingNotifier};
pub use postgres::PgStore;
pub use service::Storefront;
