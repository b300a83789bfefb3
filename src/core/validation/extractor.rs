//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that reads a JSON body
//! and turns it into a typed record before the handler runs. A handler that
//! receives a `Validated<T>` can hand the record to storage directly.

use crate::core::error::{RequestError, ShopError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::Value;

/// Types that can be built from an untyped request payload
pub trait FromPayload: Sized {
    /// Check every field rule and build the record, or report all failures
    fn from_payload(payload: &Value) -> Result<Self, ValidationError>;
}

/// Axum extractor that validates a JSON body into `T`
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_menu_item(
///     State(state): State<AppState>,
///     Validated(item): Validated<MenuItem>,
/// ) -> Result<impl IntoResponse, ShopError> {
///     // item is a fully validated MenuItem
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FromPayload + Send,
{
    type Rejection = ShopError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => RequestError::UnsupportedMediaType,
                other => RequestError::InvalidBody {
                    message: other.body_text(),
                },
            })?;

        let record = T::from_payload(&payload).map_err(|errors| {
            tracing::debug!(%errors, "payload rejected");
            errors
        })?;

        Ok(Validated(record))
    }
}
