pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::auth::AuthService;
use crate::storage::{BlobStore, ImageStorage};
use crate::utils::AssetUrlHelper;
use std::sync::Arc;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub asset_helper: AssetUrlHelper,
    pub auth_service: AuthService,
    pub images: ImageStorage,
}

impl AppState {
    pub fn new(
        db: DbPool,
        redis: redis::Client,
        config: Config,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let asset_helper = AssetUrlHelper::new(&config.assets());
        let auth_service = AuthService::new(config.auth());
        let images = ImageStorage::new(blob_store, config.storage().max_image_bytes);
        Self {
            db,
            redis,
            config: Arc::new(config),
            asset_helper,
            auth_service,
            images,
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .with_current_span(true)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}
