use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Required field missing or request body unreadable.
    Validation,
    /// Email already registered.
    Conflict,
    /// No account exists for the supplied email.
    UnknownAccount,
    /// Credentials did not match.
    Unauthorized,
    Internal,
}

/// Failure body returned by every auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub success: bool,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
        }
    }
}
