use diesel::prelude::*;
use tokio::task;

use crate::{
    db::models::api::error_codes,
    db::models::auth::{
        AuthEmployee, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
    },
    db::repositories::EmployeeRepo,
    error::AppError,
    middleware::auth::AuthService,
};

/// Hashes on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))?
        .map_err(AppError::from)
}

fn invalid_credentials() -> AppError {
    AppError::Auth {
        message: format!("Invalid email or password ({})", error_codes::AUTH_INVALID_CREDENTIALS),
    }
}

pub struct AccountsService;

impl AccountsService {
    pub async fn login(
        conn: &mut PgConnection,
        tokens: &AuthService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let employee = EmployeeRepo::find_by_email(conn, &req.email)?.ok_or_else(|| {
            tracing::warn!(email = %req.email, "Login failed - unknown email");
            invalid_credentials()
        })?;

        if !verify_password(req.password.clone(), employee.password_hash.clone()).await? {
            tracing::warn!(email = %req.email, "Login failed - invalid password");
            return Err(invalid_credentials());
        }

        let caller = AuthEmployee::from(&employee);
        let access_token = tokens.generate_access_token(&caller)?;
        let refresh_token = tokens.generate_refresh_token(caller.id)?;

        tracing::info!(employee_id = %caller.id, role = caller.role.as_str(), "Login succeeded");
        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_token_ttl_secs(),
            employee: caller,
        })
    }

    pub fn refresh(
        conn: &mut PgConnection,
        tokens: &AuthService,
        req: &RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        let claims = tokens.verify_refresh_token(&req.refresh_token)?;
        let employee = EmployeeRepo::find_by_id(conn, claims.sub)?.ok_or_else(|| {
            AppError::auth(format!("Invalid token ({})", error_codes::AUTH_INVALID_TOKEN))
        })?;

        let access_token = tokens.generate_access_token(&AuthEmployee::from(&employee))?;
        Ok(RefreshTokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_token_ttl_secs(),
        })
    }
}
