use actix_multipart::{Field, Multipart};
use actix_web::http::header::ContentDisposition;
use futures_util::TryStreamExt as _;
use log::warn;
use tokio::io::AsyncWriteExt;
use crate::errors::AppError;
use crate::utils::blob_store::BlobStore;

/// RFC 7578 default for parts without a Content-Type.
const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A file part that has already been written to the blob store.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: usize,
}

/// Client filename of a part, from `filename` or else the RFC 5987
/// `filename*` form. Empty names (an unfilled file input) count as absent.
fn part_filename(disposition: &ContentDisposition) -> Option<String> {
    disposition
        .get_filename()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| {
            disposition
                .get_filename_ext()
                .map(|ext| String::from_utf8_lossy(&ext.value).into_owned())
                .filter(|name| !name.is_empty())
        })
}

/// Streams the single file part named `field_name` into `blobs`.
///
/// Returns `Ok(None)` when the request carried no such file. Every error
/// path removes whatever blob was written.
pub async fn read_single_file(
    mut payload: Multipart,
    blobs: &BlobStore,
    field_name: &str,
    max_size: usize,
) -> Result<Option<StoredUpload>, AppError> {
    let mut stored: Option<StoredUpload> = None;

    loop {
        let next = payload.try_next().await;
        let mut field = match next {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                discard(blobs, stored.take()).await;
                warn!("Multipart parse error: {}", err);
                return Err(AppError::BadRequest("Malformed multipart request".to_string()));
            }
        };

        let disposition = field.content_disposition();
        let is_target = disposition.get_name() == Some(field_name);
        let original_name = part_filename(disposition);

        match (is_target, original_name) {
            (true, Some(original_name)) => {
                if stored.is_some() {
                    discard(blobs, stored.take()).await;
                    return Err(AppError::BadRequest("Unexpected field".to_string()));
                }
                stored = Some(write_field(&mut field, blobs, original_name, max_size).await?);
            }
            (false, Some(_)) => {
                discard(blobs, stored.take()).await;
                return Err(AppError::BadRequest("Unexpected field".to_string()));
            }
            _ => {
                if let Err(err) = drain(&mut field).await {
                    discard(blobs, stored.take()).await;
                    return Err(err);
                }
            }
        }
    }

    Ok(stored)
}

async fn write_field(
    field: &mut Field,
    blobs: &BlobStore,
    original_name: String,
    max_size: usize,
) -> Result<StoredUpload, AppError> {
    let declared_mime = field.content_type().map(|mime| mime.to_string());
    let filename = BlobStore::generate_filename(&original_name);

    let mut upload = StoredUpload {
        filename,
        original_name,
        mime_type: declared_mime.clone().unwrap_or_default(),
        size: 0,
    };

    match stream_to_blob(field, blobs, &mut upload, declared_mime.is_none(), max_size).await {
        Ok(()) => Ok(upload),
        Err(err) => {
            discard(blobs, Some(upload)).await;
            Err(err)
        }
    }
}

async fn stream_to_blob(
    field: &mut Field,
    blobs: &BlobStore,
    upload: &mut StoredUpload,
    sniff_mime: bool,
    max_size: usize,
) -> Result<(), AppError> {
    let mut file = blobs.create(&upload.filename).await?;
    let mut first_chunk = true;

    while let Some(chunk) = field.try_next().await.map_err(|err| {
        warn!("Upload read error: {}", err);
        AppError::BadRequest("Malformed multipart request".to_string())
    })? {
        if first_chunk && sniff_mime {
            upload.mime_type = infer::get(&chunk)
                .map(|kind| kind.mime_type())
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string();
        }
        first_chunk = false;

        upload.size += chunk.len();
        if upload.size > max_size {
            return Err(AppError::BadRequest(format!(
                "File size cannot exceed {}MB",
                max_size / (1024 * 1024)
            )));
        }
        file.write_all(&chunk).await?;
    }

    if first_chunk && sniff_mime {
        upload.mime_type = DEFAULT_MIME_TYPE.to_string();
    }
    file.flush().await?;
    Ok(())
}

async fn drain(field: &mut Field) -> Result<(), AppError> {
    while field
        .try_next()
        .await
        .map_err(|_| AppError::BadRequest("Malformed multipart request".to_string()))?
        .is_some()
    {}
    Ok(())
}

async fn discard(blobs: &BlobStore, upload: Option<StoredUpload>) {
    if let Some(upload) = upload {
        if let Err(err) = blobs.remove(&upload.filename).await {
            warn!("Could not remove partial upload {}: {}", upload.filename, err);
        }
    }
}
