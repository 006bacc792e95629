use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::file::{FileRecord, NewFileRecord};
use super::{parse_id, MetadataStore};

pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        PgMetadataStore { pool }
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn insert(&self, new_file: NewFileRecord) -> Result<FileRecord, AppError> {
        let record = sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (id, filename, original_name, mime_type, size, path, uploaded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, filename, original_name, mime_type, size, path, uploaded_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_file.filename)
        .bind(&new_file.original_name)
        .bind(&new_file.mime_type)
        .bind(new_file.size)
        .bind(&new_file.path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FileRecord>, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let record = sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<FileRecord>, AppError> {
        let records = sqlx::query_as::<_, FileRecord>("SELECT * FROM files ORDER BY uploaded_at ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
