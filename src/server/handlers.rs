//! HTTP handlers for the storefront resources
//!
//! Every create handler receives an already validated record through
//! [`Validated`], performs one write and answers `201 {"id": "<text>"}`.
//! Listing handlers return records with their id rendered as text.

use crate::core::error::{ShopResult, ValidationError};
use crate::core::id::DocumentId;
use crate::core::resource::{Record, Resource};
use crate::core::store::Filter;
use crate::core::validation::Validated;
use crate::models::{CateringRequest, MenuItem, Order};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Orders returned by `GET /api/orders` when no limit is given
pub const DEFAULT_ORDER_LIMIT: i64 = 20;

/// Body of every successful create
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: DocumentId,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

impl MenuQuery {
    /// Exact-match category filter; an empty category means no filter
    pub fn filter(&self) -> Filter {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => Filter::all().eq("category", category),
            _ => Filter::all(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub limit: Option<i64>,
}

impl OrdersQuery {
    /// Store limit for the query; `0` lifts the limit
    pub fn store_limit(&self) -> Result<Option<usize>, ValidationError> {
        match self.limit.unwrap_or(DEFAULT_ORDER_LIMIT) {
            limit if limit < 0 => Err(ValidationError::InvalidParameter {
                name: "limit".to_string(),
                message: "must be greater than or equal to 0".to_string(),
            }),
            0 => Ok(None),
            limit => Ok(Some(usize::try_from(limit).unwrap_or(usize::MAX))),
        }
    }
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ValidationError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ValidationError::InvalidParameter {
            name: "query".to_string(),
            message: rejection.body_text(),
        })
}

async fn create<T: Resource>(
    state: &AppState,
    record: T,
) -> ShopResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.service::<T>()?.create(&record).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Coffee Shop Backend is running" }))
}

/// POST /api/menu
pub async fn create_menu_item(
    State(state): State<AppState>,
    Validated(item): Validated<MenuItem>,
) -> ShopResult<(StatusCode, Json<CreatedResponse>)> {
    create(&state, item).await
}

/// GET /api/menu?category=
pub async fn list_menu(
    State(state): State<AppState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> ShopResult<Json<Vec<Record<MenuItem>>>> {
    let params = query_params(query)?;
    let items = state
        .service::<MenuItem>()?
        .list(&params.filter(), None)
        .await?;
    Ok(Json(items))
}

/// POST /api/catering
pub async fn create_catering_request(
    State(state): State<AppState>,
    Validated(request): Validated<CateringRequest>,
) -> ShopResult<(StatusCode, Json<CreatedResponse>)> {
    create(&state, request).await
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Validated(order): Validated<Order>,
) -> ShopResult<(StatusCode, Json<CreatedResponse>)> {
    create(&state, order).await
}

/// GET /api/orders?limit=
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> ShopResult<Json<Vec<Record<Order>>>> {
    let limit = query_params(query)?.store_limit()?;
    let orders = state
        .service::<Order>()?
        .list(&Filter::all(), limit)
        .await?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_query_filter() {
        let query = MenuQuery {
            category: Some("Coffee".to_string()),
        };
        assert_eq!(query.filter(), Filter::all().eq("category", "Coffee"));
        assert!(MenuQuery::default().filter().is_empty());
        let empty = MenuQuery {
            category: Some(String::new()),
        };
        assert!(empty.filter().is_empty());
    }

    #[test]
    fn test_orders_query_limit() {
        assert_eq!(OrdersQuery::default().store_limit().unwrap(), Some(20));
        assert_eq!(OrdersQuery { limit: Some(5) }.store_limit().unwrap(), Some(5));
        assert_eq!(OrdersQuery { limit: Some(0) }.store_limit().unwrap(), None);
        assert!(OrdersQuery { limit: Some(-1) }.store_limit().is_err());
    }
}
