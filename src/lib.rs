use std::sync::Arc;

use actix_cors::Cors;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::images::ImageStore;
use crate::images::cloudinary::CloudinaryStore;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::main::show_index;
use crate::routes::products::{add_product, delete_product, list_products};

pub mod db;
pub mod domain;
pub mod forms;
pub mod images;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let image_store: Arc<dyn ImageStore> = Arc::new(CloudinaryStore::new(&server_config.image_host));

    // Key and store for the flash message cookies.
    let secret_key = Key::from(server_config.secret.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(list_products)
                    .service(add_product)
                    .service(delete_product),
            )
            .service(show_index)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::from(image_store.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
