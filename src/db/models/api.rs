use serde::Serialize;

// Unified response envelope; `message` carries the status message shown to the user.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

impl ResponseMeta {
    pub fn with_total(total_count: usize) -> Self {
        Self {
            request_id: None,
            total_count: Some(total_count as i64),
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, field: Option<String>, message: &str) -> Self {
        let mut response = Self::build(false, code, message);
        response.errors = Some(vec![ErrorDetail {
            field,
            code: error_code.to_string(),
            message: message.to_string(),
        }]);
        response
    }

    pub fn success(data: T, message: &str) -> Self {
        let mut response = Self::build(true, 200, message);
        response.data = Some(data);
        response
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        let mut response = Self::success(data, message);
        response.meta = Some(meta);
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        let mut response = Self::build(true, 201, message);
        response.data = Some(data);
        response
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        let mut response = Self::build(false, 400, "Validation failed");
        response.errors = Some(errors);
        response
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", None, message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", None, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", None, message)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, error_code, field, message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", None, message)
    }
}

// Business error codes
pub mod error_codes {
    pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_001";
    pub const AUTH_INVALID_TOKEN: &str = "AUTH_002";

    pub const DEPARTMENT_HAS_EMPLOYEES: &str = "DEPARTMENT_001";

    pub const EMPLOYEE_EMAIL_EXISTS: &str = "EMPLOYEE_001";
    pub const EMPLOYEE_INVALID_MANAGER: &str = "EMPLOYEE_002";
    pub const EMPLOYEE_INVALID_DEPARTMENT: &str = "EMPLOYEE_003";
    pub const EMPLOYEE_INVALID_IMAGE: &str = "EMPLOYEE_004";

    pub const TASK_INVALID_ASSIGNEE: &str = "TASK_001";

    pub const RECORD_IN_USE: &str = "SYSTEM_001";
    pub const RECORD_EXISTS: &str = "SYSTEM_002";
}
