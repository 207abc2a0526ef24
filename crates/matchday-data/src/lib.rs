//! Data access for the federation platform.
//!
//! All records live in the hosted backend's tables; this crate is the thin
//! layer between the admin forms and that service. Each entity declares
//! its table and dependent tables once ([`schema::EntityRecord`]), and the
//! [`gateway::MutationGateway`] drives every create/update/delete through
//! one code path: run the backend call under a deadline, then drop the
//! cached reads of the mutated table and its dependents before reporting
//! success.

pub mod backend;
pub mod config;
pub mod di;
pub mod entities;
pub mod error;
pub mod gateway;
pub mod reads;
pub mod schema;

pub use backend::{HttpBackend, MemoryBackend, SelectQuery, SortOrder, TableBackend};
pub use config::BackendConfig;
pub use error::{BackendError, BackendResult, DataError, MutationOp, Result};
pub use gateway::{Deleted, MutationGateway};
pub use reads::ReadStore;
pub use schema::{dependents_of, invalidation_set, EntityRecord, ENTITY_TABLES};
