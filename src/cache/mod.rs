pub mod employee_cache;

pub use employee_cache::EmployeeCache;

use redis::{Client, cmd};

use crate::error::AppError;

pub async fn redis_health_check(redis_client: &Client) -> Result<bool, AppError> {
    let mut conn = redis_client.get_multiplexed_async_connection().await?;

    let pong: String = cmd("PING").query_async(&mut conn).await?;

    Ok(pong == "PONG")
}
