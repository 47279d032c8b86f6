use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::services::AccountError;

/// Body shape of every non-200 response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Domain or validation failure, surfaced with a specific message.
    BadRequest(String),

    /// Any authentication or authorization failure. The body never says
    /// which check failed or whether the login exists.
    Forbidden,

    /// Internal failure; detail goes to the log, not the caller.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Forbidden => (StatusCode::FORBIDDEN, "go away".to_string()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "error".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AlreadyExists => Self::bad_request("Account exists, cannot create"),
            AccountError::WeakPassword => Self::bad_request("Too weak password"),
            AccountError::ExternalFlagMismatch => {
                Self::bad_request("There should be: password == null <==> external account")
            }
            AccountError::ExternalAccountImmutable => {
                Self::bad_request("Cannot change password of external account")
            }
            AccountError::Database(msg) => Self::Internal(msg),
        }
    }
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
