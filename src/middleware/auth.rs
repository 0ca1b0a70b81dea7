use crate::cache::EmployeeCache;
use crate::config::AuthConfig;
use crate::db::enums::EmployeeRole;
use crate::db::models::auth::AuthEmployee;
use crate::db::repositories::EmployeeRepo;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // employee id
    pub email: String,
    pub role: EmployeeRole,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
    pub kind: String,
}

const REFRESH_KIND: &str = "refresh";

/// Issues and verifies JWTs (HS256).
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn access_token_ttl_secs(&self) -> u64 {
        self.config.access_token_expires_in
    }

    pub fn generate_access_token(
        &self,
        employee: &AuthEmployee,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = Claims {
            sub: employee.id,
            email: employee.email.clone(),
            role: employee.role,
            exp: now + self.config.access_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
    }

    pub fn generate_refresh_token(
        &self,
        employee_id: Uuid,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = RefreshClaims {
            sub: employee_id,
            exp: now + self.config.refresh_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            kind: REFRESH_KIND.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        if token_data.claims.kind != REFRESH_KIND {
            return Err(AppError::auth("Invalid token"));
        }
        Ok(token_data.claims)
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Verifies the bearer token and stores the caller as [`AuthEmployee`] in
/// request extensions.
pub async fn auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or_else(|| AppError::auth("Missing bearer token"))?;

    let claims = state
        .auth_service
        .verify_token(&token)
        .map_err(|_| AppError::auth("Invalid token"))?;

    let caller = load_caller(&state, claims.sub).await?;
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

async fn load_caller(state: &AppState, employee_id: Uuid) -> Result<AuthEmployee, AppError> {
    let cache = EmployeeCache::new(state.redis.clone());
    if let Some(cached) = cache.get(employee_id).await {
        return Ok(cached);
    }

    let mut conn = state.db.get()?;
    let employee = EmployeeRepo::find_by_id(&mut conn, employee_id)?
        .ok_or_else(|| AppError::auth("Unknown account"))?;
    let caller = AuthEmployee::from(&employee);

    cache.set(&caller).await;
    Ok(caller)
}

/// Lets only managers through. Everyone else gets a plain 404 so that
/// manager-only routes are not revealed.
pub async fn manager_only<B>(request: Request<B>, next: Next<B>) -> Result<Response, AppError> {
    let caller = request
        .extensions()
        .get::<AuthEmployee>()
        .map(|caller| (caller.id, caller.is_manager()));

    match caller {
        Some((_, true)) => Ok(next.run(request).await),
        Some((employee_id, false)) => {
            tracing::debug!(employee_id = %employee_id, uri = %request.uri(), "Manager-only route refused");
            Err(AppError::not_found("Resource"))
        }
        None => Err(AppError::auth("Unauthorized")),
    }
}
