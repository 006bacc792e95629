use std::io;
use std::path::{Path, PathBuf};
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;

/// Directory of uploaded blobs, addressed by server-generated filenames.
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
    public_prefix: String,
}

impl BlobStore {
    /// `public_prefix` is the relative path recorded in metadata, e.g. `uploads`.
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        BlobStore {
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// `<unix millis>-<uuid>` keeping the original extension when it looks sane.
    pub fn generate_filename(original_name: &str) -> String {
        let stem = format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple());
        match Path::new(original_name).extension().and_then(|ext| ext.to_str()) {
            Some(ext)
                if !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!("{}.{}", stem, ext.to_ascii_lowercase())
            }
            _ => stem,
        }
    }

    /// On-disk location, always recomputed from the directory and filename.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn relative_path(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix, filename)
    }

    pub async fn create(&self, filename: &str) -> io::Result<fs::File> {
        fs::File::create(self.path_for(filename)).await
    }

    pub async fn exists(&self, filename: &str) -> bool {
        fs::metadata(self.path_for(filename))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    pub async fn remove(&self, filename: &str) -> io::Result<()> {
        fs::remove_file(self.path_for(filename)).await
    }
}
