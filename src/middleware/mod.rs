pub mod auth;
pub mod logger;
pub mod request_tracking;

pub use auth::{AuthService, auth_middleware, manager_only};
pub use request_tracking::{REQUEST_ID_HEADER, extract_request_id, request_tracking_middleware};
