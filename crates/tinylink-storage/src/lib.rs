//! Repository backends for tinylink.
//!
//! [`InMemoryRepository`] backs tests and single-process deployments.
//! [`PostgresRepository`] is the durable store; it relies on a unique
//! constraint on `short_code` for allocation safety across processes.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::{PostgresConfig, PostgresRepository};
pub use tinylink_core::{ReadRepository, RecordId, Repository, StorageError, UrlRecord};
