pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod tasks;

use crate::{
    AppState,
    middleware::{auth_middleware, manager_only},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Room for the text fields of a multipart employee form next to the image.
const FORM_FIELDS_ALLOWANCE: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token));

    // Any signed-in employee.
    let employee_routes = Router::new()
        .route("/auth/profile", get(auth::get_profile))
        .route("/tasks", get(tasks::get_tasks))
        .route("/tasks/:task_id", get(tasks::get_task));

    let manager_routes = Router::new()
        .route(
            "/departments",
            get(departments::get_departments).post(departments::create_department),
        )
        .route("/departments/search", get(departments::search_departments))
        .route(
            "/departments/:department_id",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/employees",
            get(employees::get_employees).post(employees::create_employee),
        )
        .route("/employees/search", get(employees::search_employees))
        .route(
            "/employees/:employee_id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/assignees", get(tasks::get_assignees))
        .route(
            "/tasks/:task_id",
            axum::routing::put(tasks::update_task).delete(tasks::delete_task),
        )
        .route_layer(from_fn(manager_only))
        .layer(DefaultBodyLimit::max(
            state.images.max_bytes() + FORM_FIELDS_ALLOWANCE,
        ));

    let protected_routes = employee_routes
        .merge(manager_routes)
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/assets", ServeDir::new(&state.config.storage_root))
        .with_state(state)
}
