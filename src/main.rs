use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use env_logger::Env;

use product_catalog::db::{establish_connection_pool, run_pending_migrations};
use product_catalog::image_store::ImageStore;
use product_catalog::image_store::cloudinary::CloudinaryImageStore;
use product_catalog::models::config::ServerConfig;
use product_catalog::repository::DieselRepository;
use product_catalog::routes::{configure, json_config, multipart_config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match run_pending_migrations(&pool) {
        Ok(applied) => log::info!("Applied {applied} pending migration(s)"),
        Err(e) => {
            log::error!("Failed to run database migrations: {e}");
            std::process::exit(1);
        }
    }

    let image_store: Arc<dyn ImageStore> =
        match CloudinaryImageStore::new(server_config.image_store.clone()) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                log::error!("Failed to build image store client: {e}");
                std::process::exit(1);
            }
        };

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(image_store.clone()))
            .app_data(json_config())
            .app_data(multipart_config())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
