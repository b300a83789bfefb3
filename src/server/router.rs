//! Router for the storefront API

use crate::server::diagnostics::diagnostics;
use crate::server::handlers::{
    create_catering_request, create_menu_item, create_order, list_menu, list_orders, root,
};
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full router
///
/// - GET  / - Liveness message
/// - GET  /test - Diagnostics
/// - POST /api/menu - Create a menu item
/// - GET  /api/menu - List menu items, optionally by `category`
/// - POST /api/catering - Create a catering request
/// - POST /api/orders - Place a pickup order
/// - GET  /api/orders - List orders, at most `limit` (default 20)
///
/// Cross-origin requests are allowed from any origin, method and header,
/// with credentials.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .route("/api/menu", get(list_menu).post(create_menu_item))
        .route("/api/catering", post(create_catering_request))
        .route("/api/orders", get(list_orders).post(create_order))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
