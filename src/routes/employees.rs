use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    cache::EmployeeCache,
    db::models::{
        api::{ApiResponse, ResponseMeta},
        department::SearchQuery,
        employee::EmployeeResponse,
    },
    error::AppError,
    middleware::extract_request_id,
    services::EmployeesService,
    storage::ImageUpload,
    validation::employee::parse_employee_form,
};

/// Name of the multipart part carrying the profile image.
pub const IMAGE_FIELD: &str = "image";

/// Splits a multipart employee form into its text fields and the optional image.
///
/// A file input left empty arrives as a part with no filename and no bytes;
/// it counts as "no image".
pub async fn read_employee_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<ImageUpload>), AppError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read image: {}", e)))?;
            if original_name.is_empty() && bytes.is_empty() {
                continue;
            }
            image = Some(ImageUpload::new(original_name, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read field {}: {}", name, e)))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, image))
}

pub async fn get_employees(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeesService::list(&mut conn) {
        Ok(employees) => {
            let employees = EmployeeResponse::from_list(employees, &state.asset_helper);
            let meta = ResponseMeta::with_total(employees.len())
                .with_request_id(extract_request_id(&headers));
            let response =
                ApiResponse::success_with_meta(employees, "Employees retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn search_employees(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeesService::search(&mut conn, query.term()) {
        Ok(employees) => {
            let employees = EmployeeResponse::from_list(employees, &state.asset_helper);
            let meta = ResponseMeta::with_total(employees.len())
                .with_request_id(extract_request_id(&headers));
            let response =
                ApiResponse::success_with_meta(employees, "Employees retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeesService::show(&mut conn, employee_id) {
        Ok(employee) => {
            let employee = EmployeeResponse::from_employee(employee, &state.asset_helper);
            let response = ApiResponse::success(employee, "Employee retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let (fields, image) = match read_employee_multipart(multipart).await {
        Ok(parts) => parts,
        Err(err) => return err.into_response(),
    };
    let form = match parse_employee_form(fields) {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };

    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeesService::create(&mut conn, &state.images, form, image, state.config.bcrypt_cost)
        .await
    {
        Ok(employee) => {
            let employee = EmployeeResponse::from_employee(employee, &state.asset_helper);
            let response = ApiResponse::created(employee, "Employee created successfully.");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
    multipart: Multipart,
) -> impl IntoResponse {
    let (fields, image) = match read_employee_multipart(multipart).await {
        Ok(parts) => parts,
        Err(err) => return err.into_response(),
    };
    let form = match parse_employee_form(fields) {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };

    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    let result = EmployeesService::update(
        &mut conn,
        &state.images,
        employee_id,
        form,
        image,
        state.config.bcrypt_cost,
    )
    .await;

    match result {
        Ok(employee) => {
            EmployeeCache::new(state.redis.clone()).invalidate(employee.id).await;
            let employee = EmployeeResponse::from_employee(employee, &state.asset_helper);
            let response = ApiResponse::success(employee, "Employee updated successfully.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(err) => return AppError::from(err).into_response(),
    };

    match EmployeesService::delete(&mut conn, &state.images, employee_id).await {
        Ok(employee) => {
            EmployeeCache::new(state.redis.clone()).invalidate(employee.id).await;
            let response = ApiResponse::<()>::ok("Employee deleted successfully.");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
