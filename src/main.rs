mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod store;
mod utils;


use std::io;
use std::sync::Arc;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use config::{Config, API_PREFIX, UPLOADS_DIR};
use store::{MetadataStore, PgMetadataStore};
use utils::blob_store::BlobStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let blobs = BlobStore::new(UPLOADS_DIR, UPLOADS_DIR);
    blobs.ensure_dir().await?;
    info!("Storing uploads in {}", blobs.dir().display());

    // The database must be reachable before any request is accepted.
    let pool = db::create_pool(&config.database_url).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;
    db::init_schema(&pool).await.map_err(|err| {
        error!("Failed to initialise the files table: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;

    let store: Arc<dyn MetadataStore> = Arc::new(PgMetadataStore::new(pool));
    let store = web::Data::from(store);
    let blob_data = web::Data::new(blobs.clone());

    info!("Starting server at {}:{}", config.bind_address().0, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(blob_data.clone())
            .service(handlers::static_files(blobs.dir()))
            .service(web::scope(API_PREFIX).configure(handlers::configure))
            .default_service(web::to(errors::route_not_found))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
