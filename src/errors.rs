//! # Error Handling
//!
//! A single error type for the paged-query and CRUD layers that:
//! - Maps each failure class to the right HTTP status code
//! - Sends sanitized bodies with a machine-readable `code` field
//! - Logs internal details (database errors, etc.) via `tracing`
//!
//! Internal errors are never sent to clients; they are logged server-side
//! and replaced with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, TransactionError};
use serde::Serialize;
use std::fmt;

use crate::validation::ValidationError;

/// API error type with automatic logging and sanitized responses.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found. Covers both truly absent records and records hidden
    /// by a visibility flag; callers cannot tell the two apart.
    NotFound {
        /// Resource type (e.g. "user")
        resource: String,
        /// Optional identifier that wasn't found
        id: Option<String>,
    },

    /// 400 Bad Request - `limit`/`offset` outside the accepted range or
    /// otherwise malformed paging input. Raised before any store access.
    InvalidPageParameter {
        /// User-facing error message
        message: String,
    },

    /// 400 Bad Request - a name in `orderBy`, `fields` or a filter
    /// parameter does not resolve to a field on the resource. Raised
    /// before any store access.
    UnknownField {
        /// The offending name
        field: String,
        /// Which parameter carried it ("orderBy", "fields", "filter")
        context: &'static str,
    },

    /// 400 Bad Request - payload validation failed
    ValidationFailed {
        /// User-facing validation errors
        errors: Vec<String>,
    },

    /// 499 Client Closed Request - the caller abandoned the request
    /// before the operation completed. No partial body is sent.
    Aborted,

    /// 500 Internal Server Error - store failure (details logged, not
    /// exposed, never retried here)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to the user)
        internal: DbErr,
    },

    /// 500 Internal Server Error - generic internal error
    Internal {
        /// User-facing generic message
        message: String,
        /// Internal error details (logged, not sent to the user)
        internal: Option<String>,
    },
}

impl ApiError {
    /// Create a 404 Not Found error
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Create a 400 error for out-of-range or malformed paging input
    pub fn invalid_page_parameter(message: impl Into<String>) -> Self {
        Self::InvalidPageParameter {
            message: message.into(),
        }
    }

    /// Create a 400 error for an unresolvable field name
    pub fn unknown_field(field: impl Into<String>, context: &'static str) -> Self {
        Self::UnknownField {
            field: field.into(),
            context,
        }
    }

    /// Create a 400 Validation Failed error
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Create the request-aborted error (HTTP 499)
    #[must_use]
    pub fn aborted() -> Self {
        Self::Aborted
    }

    /// Create a 500 error from a store failure. The details are logged
    /// but not sent to the user.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Create a 500 error with optional internal details
    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidPageParameter { .. }
            | Self::UnknownField { .. }
            | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            // 499 Client Closed Request (nginx convention, no constant in http)
            Self::Aborted => StatusCode::from_u16(499)
                .map_or(StatusCode::INTERNAL_SERVER_ERROR, |status| status),
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable reason sent alongside the message
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidPageParameter { .. } => "invalid_page_parameter",
            Self::UnknownField { .. } => "unknown_field",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::Aborted => "request_aborted",
            Self::Database { .. } => "database_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Get the user-facing error message (sanitized)
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => {
                if let Some(id) = id {
                    format!("{resource} with id '{id}' not found")
                } else {
                    format!("{resource} not found")
                }
            }
            Self::InvalidPageParameter { message } => message.clone(),
            Self::UnknownField { field, context } => {
                format!("'{field}' is not a recognised field for {context}")
            }
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::Aborted => "Request aborted by the client".to_string(),
            Self::Database { message, .. } | Self::Internal { message, .. } => message.clone(),
        }
    }

    /// Log internal error details (not sent to the user).
    ///
    /// Uses `tracing`; produces nothing unless the caller installed a
    /// subscriber.
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    /// Error message
    error: String,
    /// Machine-readable reason
    code: &'static str,
    /// Optional list of validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                code: self.code(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                code: self.code(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Convert Sea-ORM `DbErr` to `ApiError`.
///
/// `DbErr::RecordNotFound` becomes 404; every other variant becomes a 500
/// with the detail logged internally.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::Database {
                message: "A database error occurred".to_string(),
                internal: err,
            },
        }
    }
}

/// Transaction failures carry the same taxonomy as the underlying store
/// error; a failed begin/commit is a store failure like any other.
impl From<TransactionError<DbErr>> for ApiError {
    fn from(err: TransactionError<DbErr>) -> Self {
        match err {
            TransactionError::Connection(e) | TransactionError::Transaction(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationFailed {
            errors: vec![err.to_string()],
        }
    }
}
