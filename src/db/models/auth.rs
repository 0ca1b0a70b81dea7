use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::EmployeeRole;
use crate::db::models::employee::Employee;
use crate::db::models::task::TaskScope;
use crate::error::AppError;

/// The authenticated caller, as placed in request extensions by the auth middleware.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthEmployee {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub manager_id: Option<Uuid>,
    pub role: EmployeeRole,
}

impl AuthEmployee {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Managers see the tasks they authored; everybody else sees their own.
    pub fn task_scope(&self) -> TaskScope {
        if self.is_manager() {
            TaskScope::CreatedBy(self.id)
        } else {
            TaskScope::AssignedTo(self.id)
        }
    }
}

impl From<&Employee> for AuthEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            email: employee.email.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            manager_id: employee.manager_id,
            role: employee.role,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthEmployee>()
            .cloned()
            .ok_or_else(|| AppError::auth("Unauthorized"))
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub employee: AuthEmployee,
}

#[derive(Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
