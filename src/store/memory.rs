use std::sync::Mutex;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::file::{FileRecord, NewFileRecord};
use super::{parse_id, MetadataStore};

#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: Mutex<Vec<FileRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<FileRecord>>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::DatabaseError("metadata store lock poisoned".to_string()))
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, new_file: NewFileRecord) -> Result<FileRecord, AppError> {
        let record = FileRecord {
            id: Uuid::new_v4(),
            filename: new_file.filename,
            original_name: new_file.original_name,
            mime_type: new_file.mime_type,
            size: new_file.size,
            path: new_file.path,
            uploaded_at: Utc::now(),
        };
        self.records()?.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FileRecord>, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.records()?.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<FileRecord>, AppError> {
        Ok(self.records()?.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_file(name: &str) -> NewFileRecord {
        NewFileRecord {
            filename: format!("stored-{}", name),
            original_name: name.to_string(),
            mime_type: "text/plain".to_string(),
            size: 3,
            path: format!("uploads/stored-{}", name),
        }
    }

    #[actix_web::test]
    async fn insert_assigns_distinct_ids() {
        let store = InMemoryMetadataStore::new();
        let a = store.insert(new_file("a.txt")).await.unwrap();
        let b = store.insert(new_file("b.txt")).await.unwrap();
        assert_ne!(a.id, b.id);

        let found = store.find_by_id(&a.id.to_string()).await.unwrap();
        assert_eq!(found, Some(a.clone()));

        let listed: Vec<_> = store.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(listed, vec![a.id, b.id]);
    }

    #[actix_web::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryMetadataStore::new();
        let rec = store.insert(new_file("a.txt")).await.unwrap();
        let id = rec.id.to_string();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn malformed_ids_are_not_found() {
        let store = InMemoryMetadataStore::new();
        store.insert(new_file("a.txt")).await.unwrap();
        assert!(store.find_by_id("not-an-id").await.unwrap().is_none());
        assert!(!store.delete("not-an-id").await.unwrap());
    }
}
