//! Metadata store for uploaded files.
//!
//! Handlers only see the `MetadataStore` trait; production wires in the
//! Postgres implementation, tests the in-memory one.

pub mod postgres;
#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub mod failing;

use async_trait::async_trait;
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::file::{FileRecord, NewFileRecord};

pub use postgres::PgMetadataStore;

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persists a record, assigning its id and upload timestamp.
    async fn insert(&self, new_file: NewFileRecord) -> Result<FileRecord, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<FileRecord>, AppError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<FileRecord>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// Identifiers that are not UUIDs can never match a stored record.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}
