use redis::AsyncCommands;
use uuid::Uuid;

use crate::db::models::auth::AuthEmployee;

const EMPLOYEE_CACHE_PREFIX: &str = "employee:";

/// One hour.
const EMPLOYEE_CACHE_TTL: u64 = 3600;

pub fn employee_key(employee_id: Uuid) -> String {
    format!("{}{}", EMPLOYEE_CACHE_PREFIX, employee_id)
}

/// Caches the authenticated caller between requests.
///
/// Redis is an optimisation here: every failure is logged and reported as a
/// miss so the caller falls back to the database.
#[derive(Clone)]
pub struct EmployeeCache {
    redis_client: redis::Client,
}

impl EmployeeCache {
    pub fn new(redis_client: redis::Client) -> Self {
        Self { redis_client }
    }

    async fn connection(&self) -> Option<redis::aio::MultiplexedConnection> {
        match self.redis_client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, skipping employee cache");
                None
            }
        }
    }

    pub async fn get(&self, employee_id: Uuid) -> Option<AuthEmployee> {
        let mut conn = self.connection().await?;
        let key = employee_key(employee_id);

        let cached: Option<String> = match conn.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read cached employee");
                return None;
            }
        };

        match serde_json::from_str(&cached?) {
            Ok(employee) => Some(employee),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable cached employee");
                self.invalidate(employee_id).await;
                None
            }
        }
    }

    pub async fn set(&self, employee: &AuthEmployee) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        let key = employee_key(employee.id);

        let json = match serde_json::to_string(employee) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize employee for cache");
                return;
            }
        };

        let result: redis::RedisResult<()> = conn.set_ex(&key, json, EMPLOYEE_CACHE_TTL).await;
        if let Err(e) = result {
            tracing::warn!(key = %key, error = %e, "Failed to cache employee");
        }
    }

    pub async fn invalidate(&self, employee_id: Uuid) {
        let Some(mut conn) = self.connection().await else {
            return;
        };
        let key = employee_key(employee_id);

        let result: redis::RedisResult<i32> = conn.del(&key).await;
        match result {
            Ok(_) => tracing::debug!(key = %key, "Employee cache invalidated"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to invalidate employee cache"),
        }
    }
}
