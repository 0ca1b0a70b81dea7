use axum::{Server, http::HeaderValue, middleware::from_fn};
use hr_backend::{
    AppState,
    config::Config,
    db::create_pool,
    init_tracing,
    middleware::{logger::logger, request_tracking_middleware},
    routes::create_router,
    storage::LocalBlobStore,
};
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    init_tracing(&config);

    let db = match create_pool(&config.database()) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database connection pool");
            process::exit(1);
        }
    };

    let redis = match redis::Client::open(config.redis().url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create Redis client");
            process::exit(1);
        }
    };

    let storage = config.storage();
    let blob_store = Arc::new(LocalBlobStore::new(storage.root.clone()));

    let addr: SocketAddr = match config.server_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, address = %config.server_address(), "Invalid server address");
            process::exit(1);
        }
    };
    let cors = cors_layer(&config.server().cors_origins);

    let state = Arc::new(AppState::new(db, redis, config, blob_store));

    let app = create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware))
        .layer(from_fn(logger));

    tracing::info!(address = %addr, storage_root = %storage.root.display(), "Server starting");
    if let Err(e) = Server::bind(&addr).serve(app.into_make_service()).await {
        tracing::error!(error = %e, "Server error");
        process::exit(1);
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    layer.allow_origin(origins)
}
