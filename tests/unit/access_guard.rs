use std::sync::Arc;

use axum::{
    Extension, Router,
    body::Body,
    http::{Request, StatusCode, header::{AUTHORIZATION, CONTENT_TYPE}},
    middleware::from_fn,
    routing::get,
};
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use hr_backend::{
    AppState,
    config::Config,
    db::models::auth::AuthEmployee,
    middleware::manager_only,
    routes::create_router,
    storage::MemoryBlobStore,
};
use tower::ServiceExt;

use crate::{employee_identity, manager_identity};

fn guarded(caller: Option<AuthEmployee>) -> Router {
    let router = Router::new()
        .route("/departments", get(|| async { "departments" }))
        .route_layer(from_fn(manager_only));
    match caller {
        Some(caller) => router.layer(Extension(caller)),
        None => router,
    }
}

async fn status_of(router: Router, uri: &str) -> StatusCode {
    router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn manager_passes_the_guard() {
    let status = status_of(guarded(Some(manager_identity())), "/departments").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn non_manager_gets_not_found() {
    let manager = manager_identity();
    let status = status_of(guarded(Some(employee_identity(manager.id))), "/departments").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn anonymous_caller_is_unauthorized() {
    let status = status_of(guarded(None), "/departments").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// A router over a pool that never connects; only requests rejected before
/// any query can be exercised with it.
fn offline_app() -> Router {
    let config = Config {
        database_url: "postgres://localhost/unused".to_string(),
        database_max_connections: 1,
        database_min_connections: 0,
        database_connection_timeout: 1,
        redis_url: "redis://127.0.0.1/".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        jwt_secret: "integration-secret".to_string(),
        jwt_access_token_expires_in: 3600,
        jwt_refresh_token_expires_in: 7200,
        log_level: "info".to_string(),
        log_format: "plain".to_string(),
        assets_url: "http://localhost:8000/assets".to_string(),
        bcrypt_cost: 4,
        storage_root: std::env::temp_dir(),
        max_image_size_kb: 2048,
    };
    let pool = Pool::builder()
        .build_unchecked(ConnectionManager::<PgConnection>::new(&config.database_url));
    let redis = redis::Client::open(config.redis_url.as_str()).unwrap();
    let state = AppState::new(pool, redis, config, Arc::new(MemoryBlobStore::new()));
    create_router(Arc::new(state))
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    for uri in ["/departments", "/employees", "/tasks", "/auth/profile"] {
        assert_eq!(status_of(offline_app(), uri).await, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = offline_app()
        .oneshot(
            Request::get("/tasks")
                .header(AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blank_refresh_token_is_rejected_before_lookup() {
    let response = offline_app()
        .oneshot(
            Request::post("/auth/refresh")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"refresh_token":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
