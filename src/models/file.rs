use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A record before the metadata store has assigned its id and timestamp.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
}

/// List view of a record; the storage path stays server-side.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileListing {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<FileRecord> for FileListing {
    fn from(record: FileRecord) -> Self {
        FileListing {
            id: record.id,
            filename: record.filename,
            original_name: record.original_name,
            mime_type: record.mime_type,
            size: record.size,
            uploaded_at: record.uploaded_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&FileRecord> for UploadedFile {
    fn from(record: &FileRecord) -> Self {
        UploadedFile {
            id: record.id,
            filename: record.filename.clone(),
            original_name: record.original_name.clone(),
            size: record.size,
            uploaded_at: record.uploaded_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub message: String,
    pub file: UploadedFile,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
