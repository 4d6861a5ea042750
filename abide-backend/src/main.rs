use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod assembler;
mod classify;
mod config;
mod content;
mod controllers;
mod db;
mod error;
mod models;
mod scripture;
mod video;

use assembler::ResponseAssembler;
use config::Config;
use content::ContentLibrary;
use db::Database;
use scripture::ScriptureProvider;
use video::{VideoSearch, VideoSelector, YouTubeClient};

pub struct AppState {
    pub db: Arc<Database>,
    pub assembler: Arc<ResponseAssembler>,
    pub content: Arc<ContentLibrary>,
    pub provider: ScriptureProvider,
    pub config: Config,
}

/// Log a startup failure and exit
fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{}: {}", context, err);
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().unwrap_or_else(|e| fail("Invalid configuration", e));
    let port = config.port;

    let provider = ScriptureProvider::from_name(&config.bible_provider)
        .unwrap_or_else(|e| fail("Unusable Bible provider", e));
    log::info!(
        "Using {} verse provider ({})",
        provider.as_str(),
        provider.translations().join(", ")
    );

    let config_dir = config
        .resolve_config_dir()
        .unwrap_or_else(|e| fail("Content directory unavailable", e));
    log::info!("Using config directory: {:?}", config_dir);
    let content = Arc::new(
        ContentLibrary::load(&config_dir).unwrap_or_else(|e| fail("Failed to load content", e)),
    );

    log::info!("Initializing database at {}", config.database_url);
    let db = Arc::new(
        Database::new(&config.database_url)
            .unwrap_or_else(|e| fail("Failed to initialize database", e)),
    );

    let search: Option<Arc<dyn VideoSearch>> = match &config.video.api_key {
        Some(key) => {
            let client = YouTubeClient::new(&config.video.api_url, key, config.video.request_timeout)
                .unwrap_or_else(|e| fail("Failed to create YouTube client", e));
            log::info!("[VIDEO] YouTube search enabled");
            Some(Arc::new(client))
        }
        None => {
            log::info!("[VIDEO] No YOUTUBE_API_KEY set, serving fallback videos only");
            None
        }
    };
    let videos = VideoSelector::new(search, content.videos.clone(), &config.video);
    let assembler = Arc::new(ResponseAssembler::new(Arc::clone(&content), videos, &config.video));

    log::info!("Starting Abide server on port {}", port);

    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                assembler: Arc::clone(&assembler),
                content: Arc::clone(&content),
                provider,
                config: config.clone(),
            }))
            .configure(controllers::health::config)
            .configure(controllers::feeling::config)
            .configure(controllers::devotion::config)
            .configure(controllers::history::config)
            .configure(controllers::users::config)
            .configure(controllers::verses::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
