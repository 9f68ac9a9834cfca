use serde::Serialize;

/// One field-level or cross-field error. `field` is `None` for violations
/// that span more than one field.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(field: Option<&str>, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.map(|f| f.to_string()),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Error envelope returned for every non-2xx response.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(code: u16, message: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            code,
            message: message.to_string(),
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self::new(400, "Validation failed", errors)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(
            400,
            message,
            vec![ErrorDetail::new(None, "BAD_REQUEST", message)],
        )
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(
            401,
            message,
            vec![ErrorDetail::new(None, "UNAUTHORIZED", message)],
        )
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(
            404,
            message,
            vec![ErrorDetail::new(None, "NOT_FOUND", message)],
        )
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::new(
            409,
            message,
            vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new(
            500,
            message,
            vec![ErrorDetail::new(None, "INTERNAL_ERROR", message)],
        )
    }
}

// Stable business error codes
pub mod error_codes {
    // Task write rules
    pub const TASK_BACKLOG_STATUS: &str = "TASK_001";
    pub const TASK_STARTED_NOT_BEGUN: &str = "TASK_002";
    pub const TASK_COMPLETED_NOT_DONE: &str = "TASK_003";
    pub const TASK_DONE_SPRINT_LOCKED: &str = "TASK_004";
    pub const TASK_SPRINT_ENDED: &str = "TASK_005";
    pub const TASK_NAME_REQUIRED: &str = "TASK_006";
    pub const TASK_UNKNOWN_SPRINT: &str = "TASK_007";
    pub const TASK_UNKNOWN_ASSIGNEE: &str = "TASK_008";

    // Sprint write rules
    pub const SPRINT_END_PAST: &str = "SPRINT_001";
    pub const SPRINT_END_TAKEN: &str = "SPRINT_002";

    // Users
    pub const USER_USERNAME_EXISTS: &str = "USER_001";
    pub const USER_USERNAME_INVALID: &str = "USER_002";

    // Collection queries
    pub const QUERY_BAD_ORDERING: &str = "QUERY_001";

    // Authentication
    pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_001";
    pub const AUTH_INVALID_TOKEN: &str = "AUTH_002";
    pub const AUTH_ACCOUNT_DISABLED: &str = "AUTH_003";
}
