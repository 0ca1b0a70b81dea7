use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{AuthEmployee, LoginRequest, RefreshTokenRequest},
        employee::EmployeeResponse,
    },
    db::repositories::EmployeeRepo,
    error::AppError,
    services::AccountsService,
    validation::ValidatedJson,
};

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match AccountsService::login(&mut conn, &state.auth_service, &payload).await {
        Ok(login) => {
            let response = ApiResponse::success(login, "Login successful");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match AccountsService::refresh(&mut conn, &state.auth_service, &payload) {
        Ok(tokens) => {
            let response = ApiResponse::success(tokens, "Token refreshed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    caller: AuthEmployee,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeeRepo::find_by_id(&mut conn, caller.id) {
        Ok(Some(employee)) => {
            let profile = EmployeeResponse::from_employee(employee, &state.asset_helper);
            let response = ApiResponse::success(profile, "Profile retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => AppError::auth("Unknown account").into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
