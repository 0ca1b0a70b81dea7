use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::{AppState, cache::redis_health_check, db::models::api::ApiResponse};

#[derive(Serialize)]
pub struct HealthStatus {
    pub database: bool,
    pub redis: bool,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.db.get() {
        Ok(mut conn) => diesel::sql_query("SELECT 1").execute(&mut conn).is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not get a database connection");
            false
        }
    };

    let redis = match redis_health_check(&state.redis).await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Redis health check failed");
            false
        }
    };

    let status = HealthStatus { database, redis };
    if database {
        (StatusCode::OK, Json(ApiResponse::success(status, "OK")))
    } else {
        let mut response = ApiResponse::success(status, "Database unavailable");
        response.success = false;
        response.code = 503;
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
