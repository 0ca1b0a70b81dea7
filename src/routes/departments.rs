use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        department::{DepartmentRequest, SearchQuery},
    },
    middleware::extract_request_id,
    services::DepartmentsService,
    validation::ValidatedJson,
};

pub async fn get_departments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::list(&mut conn) {
        Ok(departments) => {
            let meta = ResponseMeta::with_total(departments.len())
                .with_request_id(extract_request_id(&headers));
            let response = ApiResponse::success_with_meta(
                departments,
                "Departments retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn search_departments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::search(&mut conn, query.term()) {
        Ok(departments) => {
            let meta = ResponseMeta::with_total(departments.len())
                .with_request_id(extract_request_id(&headers));
            let response = ApiResponse::success_with_meta(
                departments,
                "Departments retrieved successfully",
                meta,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::show(&mut conn, department_id) {
        Ok(department) => {
            let response = ApiResponse::success(department, "Department retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_department(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<DepartmentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::create(&mut conn, &payload) {
        Ok(department) => {
            tracing::info!(department_id = %department.id, "Department created");
            let response = ApiResponse::created(department, "Department created successfully.");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<DepartmentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::update(&mut conn, department_id, &payload) {
        Ok(department) => {
            let response = ApiResponse::success(department, "Department updated successfully.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match DepartmentsService::delete(&mut conn, department_id) {
        Ok(()) => {
            tracing::info!(department_id = %department_id, "Department deleted");
            let response = ApiResponse::<()>::ok("Department deleted successfully.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
