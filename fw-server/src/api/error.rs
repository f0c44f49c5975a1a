//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes. Infrastructure faults are logged
//! with their detail and returned as opaque 500s; credential hashes and
//! the signing secret never appear in any response body.

use crate::services::ServiceError;

use fw_auth::AuthError;
use fw_core::CoreError;
use fw_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "INVALID_TRANSITION")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Email already registered (409)
    #[error("Conflict: {message} {location}")]
    Duplicate {
        message: String,
        location: ErrorLocation,
    },

    /// KYC transition not permitted (409)
    #[error("Conflict: {message} {location}")]
    InvalidTransition {
        message: String,
        location: ErrorLocation,
    },

    /// Authentication failure (401) with a specific error code
    #[error("Unauthorized ({code}): {message} {location}")]
    Unauthorized {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::Duplicate { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "DUPLICATE_EMAIL".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::InvalidTransition { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "INVALID_TRANSITION".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Unauthorized { code, message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: code.into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            AuthError::InvalidCredentials { .. } => ApiError::Unauthorized {
                code: "INVALID_CREDENTIALS",
                message: "Invalid credentials".to_string(),
                location,
            },
            AuthError::TokenExpired { .. } => ApiError::Unauthorized {
                code: "TOKEN_EXPIRED",
                message: "Token expired".to_string(),
                location,
            },
            AuthError::InvalidSignature { .. } => ApiError::Unauthorized {
                code: "INVALID_SIGNATURE",
                message: "Token signature verification failed".to_string(),
                location,
            },
            AuthError::MalformedToken { .. } => ApiError::Unauthorized {
                code: "MALFORMED_TOKEN",
                message: "Malformed token".to_string(),
                location,
            },
            AuthError::InvalidClaim { claim, .. } => ApiError::Unauthorized {
                code: "INVALID_CLAIM",
                message: format!("Invalid claim '{}'", claim),
                location,
            },
            AuthError::MissingHeader { .. } => ApiError::Unauthorized {
                code: "MISSING_AUTH_HEADER",
                message: "Authorization header required".to_string(),
                location,
            },
            AuthError::InvalidScheme { .. } => ApiError::Unauthorized {
                code: "INVALID_AUTH_SCHEME",
                message: "Bearer token required".to_string(),
                location,
            },
            // Infrastructure faults: log the detail, answer opaquely
            AuthError::Hashing { .. } | AuthError::Signing { .. } => {
                log::error!("Auth infrastructure error: {}", e);
                ApiError::Internal {
                    message: "Internal server error".to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::DuplicateEmail { .. } => ApiError::Duplicate {
                message: "Email already registered".to_string(),
                location,
            },
            DbError::UserNotFound { .. } => ApiError::NotFound {
                message: "User not found".to_string(),
                location,
            },
            DbError::Sqlx { .. } | DbError::Initialization { .. } => {
                log::error!("Database error: {}", e);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert domain errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::InvalidKycTransition { from, to, .. } => ApiError::InvalidTransition {
                message: format!("Cannot change KYC status from {} to {}", from, to),
                location,
            },
            CoreError::InvalidKycStatus { value, .. } => ApiError::Validation {
                message: format!("Invalid KYC status: {}", value),
                field: Some("status".to_string()),
                location,
            },
            CoreError::Validation { message, .. } => ApiError::Validation {
                message,
                field: None,
                location,
            },
            CoreError::Uuid { source, .. } => ApiError::Validation {
                message: format!("Invalid UUID format: {}", source),
                field: None,
                location,
            },
        }
    }
}

/// Convert service errors to API errors
impl From<ServiceError> for ApiError {
    #[track_caller]
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation {
                message,
                field,
                location,
            } => ApiError::Validation {
                message,
                field,
                location,
            },
            ServiceError::Internal { message, location } => {
                log::error!("Service error: {} {}", message, location);
                ApiError::Internal {
                    message: "Internal server error".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            ServiceError::Db { source } => ApiError::from(source),
            ServiceError::Core { source } => ApiError::from(source),
            ServiceError::Auth { source } => ApiError::from(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
