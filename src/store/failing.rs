use async_trait::async_trait;
use crate::errors::AppError;
use crate::models::file::{FileRecord, NewFileRecord};
use super::MetadataStore;

/// A store whose backend is unreachable; every call fails.
#[derive(Default)]
pub struct UnavailableMetadataStore;

fn unavailable() -> AppError {
    AppError::DatabaseError("metadata store unavailable".to_string())
}

#[async_trait]
impl MetadataStore for UnavailableMetadataStore {
    async fn insert(&self, _new_file: NewFileRecord) -> Result<FileRecord, AppError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<FileRecord>, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<FileRecord>, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }
}
