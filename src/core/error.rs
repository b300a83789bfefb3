//! Typed error handling for the storefront API
//!
//! Every failure a handler can produce is a [`ShopError`]. The enum is split
//! by category so callers (and tests) can match on what went wrong instead
//! of inspecting strings:
//!
//! - [`ValidationError`]: the payload was rejected before touching storage
//! - [`RequestError`]: the request itself could not be read
//! - [`StorageError`]: the document store failed or is not configured
//!
//! `ShopError` implements `IntoResponse`, so handlers simply return
//! `Result<_, ShopError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Storage error text is cut to this many characters before it is returned
pub const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum ShopError {
    /// Payload rejected by the validation layer
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request could not be decoded
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Document store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ShopError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShopError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ShopError::Request(e) => e.status_code(),
            ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ShopError::Validation(_) => "VALIDATION_ERROR",
            ShopError::Request(e) => e.error_code(),
            ShopError::Storage(e) => e.error_code(),
            ShopError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ShopError::Storage(_) | ShopError::Internal(_) => {
                truncate_detail(&self.to_string(), MAX_ERROR_DETAIL_CHARS)
            }
            _ => self.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ShopError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
///
/// `field` is a path into the payload, e.g. `price` or `items[2].quantity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed their rules
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// The payload is not a JSON object
    #[error("Expected a JSON object, got {found}")]
    NotAnObject { found: String },

    /// A query parameter failed its rules
    #[error("Invalid query parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

impl ValidationError {
    /// Field errors collected by the validation layer, if any
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to reading the HTTP request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Body is not valid JSON
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Body is not declared as JSON
    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the document store
#[derive(Debug, Error)]
pub enum StorageError {
    /// No store handle was configured at startup
    #[error("Database not available")]
    NotConfigured,

    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Insert failed
    #[error("Failed to insert into '{collection}': {message}")]
    WriteFailed { collection: String, message: String },

    /// Find failed
    #[error("Failed to query '{collection}': {message}")]
    QueryFailed { collection: String, message: String },

    /// A stored document could not be converted
    #[error("Malformed document in '{collection}': {message}")]
    MalformedDocument { collection: String, message: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NotConfigured
            | StorageError::WriteFailed { .. }
            | StorageError::QueryFailed { .. } => "STORAGE_ERROR",
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::MalformedDocument { .. } => "STORAGE_DOCUMENT_ERROR",
        }
    }
}

/// Cut `text` to at most `max_chars` characters, on a char boundary
pub fn truncate_detail(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// A specialized Result type for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
