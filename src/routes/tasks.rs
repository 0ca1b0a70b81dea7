use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        auth::AuthEmployee,
        employee::EmployeeSummary,
        task::TaskRequest,
    },
    error::AppError,
    middleware::extract_request_id,
    services::TasksService,
    validation::ValidatedJson,
};

/// Managers see the tasks they created, everyone else the tasks assigned to them.
pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
    caller: AuthEmployee,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::list(&mut conn, &caller) {
        Ok(tasks) => {
            let meta = ResponseMeta::with_total(tasks.len()).with_request_id(extract_request_id(&headers));
            let response = ApiResponse::success_with_meta(tasks, "Tasks retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    caller: AuthEmployee,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::show(&mut conn, &caller, task_id) {
        Ok(task) => {
            let response = ApiResponse::success(task, "Task retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_assignees(
    State(state): State<Arc<AppState>>,
    caller: AuthEmployee,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::assignees(&mut conn, &caller) {
        Ok(employees) => {
            let employees: Vec<EmployeeSummary> = employees.into_iter().map(Into::into).collect();
            let response = ApiResponse::success(employees, "Assignees retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    caller: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::create(&mut conn, &caller, payload) {
        Ok(task) => {
            let response = ApiResponse::created(task, "Task created successfully!");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    caller: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::update(&mut conn, &caller, task_id, payload) {
        Ok(task) => {
            let response = ApiResponse::success(task, "Task updated successfully!");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match TasksService::delete(&mut conn, task_id) {
        Ok(()) => {
            tracing::info!(task_id = %task_id, "Task deleted");
            let response = ApiResponse::<()>::ok("Task deleted successfully!");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
