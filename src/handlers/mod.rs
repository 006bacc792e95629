pub mod file;

use std::path::Path;
use actix_files::Files;
use actix_web::dev::fn_service;
use actix_web::web;
use crate::config::PUBLIC_UPLOADS_PREFIX;
use crate::errors;

/// Registers the file API; mounted under `config::API_PREFIX`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/upload")
            .route(web::post().to(file::upload_file))
            .default_service(web::to(errors::method_not_allowed)),
    )
    .service(
        web::resource("/download/{id}")
            .route(web::get().to(file::download_file))
            .default_service(web::to(errors::method_not_allowed)),
    )
    .service(
        web::resource("/delete/{id}")
            .route(web::delete().to(file::delete_file))
            .default_service(web::to(errors::method_not_allowed)),
    )
    .service(
        web::resource("/files")
            .route(web::get().to(file::list_files))
            .default_service(web::to(errors::method_not_allowed)),
    );
}

/// Read-only view of the blob directory under `/uploads`.
pub fn static_files(dir: &Path) -> Files {
    Files::new(PUBLIC_UPLOADS_PREFIX, dir).default_handler(fn_service(errors::static_not_found))
}
