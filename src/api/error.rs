use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response::ErrorResponse;
use crate::error::{AppError, ValidationReason};
use crate::store::StoreError;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    Unauthorized { code: &'static str, message: String },
    Conflict { code: &'static str, message: String },
    InternalError(String),
    DatabaseError(String),
    StoreTimeout(String),
}

impl ApiError {
    pub fn bad_request(reason: ValidationReason, msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: reason.code(),
            message: msg.into(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: "unauthorized",
            message: msg.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            code: "invalid-credentials",
            message: INVALID_CREDENTIALS_MESSAGE.to_string(),
        }
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Infrastructure details stay in the logs.
    fn body(&self) -> ErrorResponse {
        let (error, message) = match self {
            ApiError::BadRequest { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::Conflict { code, message } => (*code, message.clone()),
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                ("internal-error", "An internal error occurred".to_string())
            }
            ApiError::StoreTimeout(_) => (
                "store-timeout",
                "The data store did not respond in time, please retry".to_string(),
            ),
        };

        ErrorResponse {
            error: error.to_string(),
            message,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation { reason, message } => ApiError::bad_request(reason, message),
            AppError::Conflict { reason } => ApiError::Conflict {
                code: reason.code(),
                message: reason.message().to_string(),
            },
            AppError::InvalidCredentials => ApiError::invalid_credentials(),
            AppError::Store(e @ StoreError::Timeout(_)) => ApiError::StoreTimeout(e.to_string()),
            AppError::Store(e) => ApiError::database_error(e.to_string()),
            AppError::Hashing(e) => ApiError::internal_error(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InternalError(cause) => tracing::error!("internal error: {}", cause),
            ApiError::DatabaseError(cause) => tracing::error!("store error: {}", cause),
            ApiError::StoreTimeout(cause) => tracing::error!("store timeout: {}", cause),
            _ => {}
        }

        let status = self.status_code();
        (status, Json(self.body())).into_response()
    }
}
