use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::http::header::{
    self, Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue, HeaderValue,
};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{info, warn};
use crate::config::{MAX_FILE_SIZE, UPLOAD_FIELD};
use crate::errors::AppError;
use crate::models::file::{FileListing, MessageResponse, NewFileRecord, UploadResponse, UploadedFile};
use crate::store::MetadataStore;
use crate::utils::blob_store::BlobStore;
use crate::utils::multipart::read_single_file;

fn attachment(original_name: &str) -> ContentDisposition {
    let mut parameters = vec![DispositionParam::Filename(original_name.to_string())];
    if !original_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: original_name.as_bytes().to_vec(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub async fn upload_file(
    req: HttpRequest,
    store: web::Data<dyn MetadataStore>,
    blobs: web::Data<BlobStore>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    if !is_multipart(&req) {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    }

    let upload = read_single_file(payload, &blobs, UPLOAD_FIELD, MAX_FILE_SIZE)
        .await
        .map_err(|err| match err {
            AppError::BadRequest(_) => err,
            other => AppError::internal("Upload error", "Error uploading file")(other),
        })?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    // The blob is already on disk; a failure here leaves it orphaned.
    let record = store
        .insert(NewFileRecord {
            path: blobs.relative_path(&upload.filename),
            filename: upload.filename,
            original_name: upload.original_name,
            mime_type: upload.mime_type,
            size: upload.size as i64,
        })
        .await
        .map_err(AppError::internal("Upload error", "Error uploading file"))?;

    info!("Stored {} as {} ({} bytes)", record.original_name, record.filename, record.size);

    Ok(HttpResponse::Created().json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file: UploadedFile::from(&record),
    }))
}

pub async fn download_file(
    req: HttpRequest,
    store: web::Data<dyn MetadataStore>,
    blobs: web::Data<BlobStore>,
    file_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = store
        .find_by_id(&file_id)
        .await
        .map_err(AppError::internal("Download error", "Error downloading file"))?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    if !blobs.exists(&record.filename).await {
        warn!("Blob {} missing for file {}", record.filename, record.id);
        return Err(AppError::NotFound("File not found on server".to_string()));
    }

    let named = NamedFile::open_async(blobs.path_for(&record.filename))
        .await
        .map_err(|err| AppError::internal("Download error", "Error downloading file")(AppError::from(err)))?
        .set_content_disposition(attachment(&record.original_name));

    let mut resp = named.into_response(&req);
    match HeaderValue::from_str(&record.mime_type) {
        Ok(value) => {
            resp.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        Err(_) => warn!("Stored MIME type {:?} is not a valid header value", record.mime_type),
    }
    Ok(resp)
}

pub async fn delete_file(
    store: web::Data<dyn MetadataStore>,
    blobs: web::Data<BlobStore>,
    file_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = store
        .find_by_id(&file_id)
        .await
        .map_err(AppError::internal("Delete error", "Error deleting file"))?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    // Orphaned metadata must still be removable, so a missing blob is not fatal.
    if let Err(err) = blobs.remove(&record.filename).await {
        warn!("File delete error for {}: {}", record.filename, err);
    }

    store
        .delete(&file_id)
        .await
        .map_err(AppError::internal("Delete error", "Error deleting file"))?;

    info!("Deleted file {}", record.id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}

pub async fn list_files(store: web::Data<dyn MetadataStore>) -> Result<HttpResponse, AppError> {
    let files: Vec<FileListing> = store
        .list()
        .await
        .map_err(AppError::internal("List error", "Error retrieving files"))?
        .into_iter()
        .map(FileListing::from)
        .collect();

    Ok(HttpResponse::Ok().json(files))
}
