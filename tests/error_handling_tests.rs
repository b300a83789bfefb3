//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - A broken or missing database degrades every route predictably
//! - Diagnostics never fail, whatever the state of the database

mod api_harness;

use api_harness::*;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use brewhouse::config::ServerConfig;
use brewhouse::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_not_configured_returns_500() {
        let err = ShopError::Storage(StorageError::NotConfigured);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_invalid_parameter_returns_422() {
        let err = ShopError::Validation(ValidationError::InvalidParameter {
            name: "limit".to_string(),
            message: "must be greater than or equal to 0".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_into_response_carries_status() {
        let err = ShopError::Storage(StorageError::WriteFailed {
            collection: "order".to_string(),
            message: "boom".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod response_format_tests {
    use super::*;

    #[test]
    fn test_storage_message_is_truncated() {
        let err = ShopError::Storage(StorageError::QueryFailed {
            collection: "menuitem".to_string(),
            message: "x".repeat(1_000),
        });
        let body = err.to_response();
        assert_eq!(body.code, "STORAGE_ERROR");
        assert_eq!(body.message.chars().count(), 200);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ShopError::Storage(StorageError::NotConfigured);
        let value = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(value["code"], "STORAGE_ERROR");
        assert_eq!(value["message"], "Database not available");
    }
}

// =============================================================================
// Failing database
// =============================================================================

mod failing_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_reports_storage_error() {
        let server = server_with_store(FailingStore);

        let response = server
            .post("/api/menu")
            .json(&menu_item("Latte", 4.5, "Coffee"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "STORAGE_ERROR");
        assert!(body["message"].as_str().unwrap().contains("menuitem"));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_listing_reports_storage_error() {
        let server = server_with_store(FailingStore);

        server
            .get("/api/orders")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        server
            .get("/api/menu")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let server = server_with_store(FailingStore);

        let response = server.post("/api/catering").json(&catering_request(0)).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_diagnostics_degrade_without_failing() {
        let server = server_with_store(FailingStore);

        let response = server.get("/test").await;

        response.assert_status_ok();
        let report = response.json::<Value>();
        assert_eq!(report["backend"], "✅ Running");
        assert_eq!(report["connection_status"], "Connected");
        assert_eq!(report["database_name"], "coffee");
        assert_eq!(report["collections"], json!([]));

        let database = report["database"].as_str().unwrap();
        let detail = database
            .strip_prefix("⚠️  Connected but Error: ")
            .expect("database should report the probe error");
        assert_eq!(detail.chars().count(), 50);
    }
}

// =============================================================================
// No database
// =============================================================================

mod missing_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_routes_report_unavailable() {
        let server = server_without_store(ServerConfig::default());

        let response = server
            .post("/api/orders")
            .json(&order(1))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "STORAGE_ERROR");
        assert_eq!(body["message"], "Database not available");

        server
            .get("/api/menu")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_root_still_answers() {
        let server = server_without_store(ServerConfig::default());
        server.get("/").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_diagnostics_without_configuration() {
        let server = server_without_store(ServerConfig::default());

        let report = server.get("/test").await.json::<DiagnosticReport>();

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_diagnostics_configured_but_not_connected() {
        let server = server_without_store(configured());

        let report = server.get("/test").await.json::<DiagnosticReport>();

        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "✅ Set");
        assert_eq!(report.connection_status, "Not Connected");
    }
}

// =============================================================================
// Healthy diagnostics
// =============================================================================

#[tokio::test]
async fn test_diagnostics_list_collections_once_written() {
    let server = server_with_store(RecordingStore::new());
    server
        .post("/api/menu")
        .json(&menu_item("Latte", 4.5, "Coffee"))
        .await;
    server.post("/api/orders").json(&order(1)).await;

    let report = server.get("/test").await.json::<DiagnosticReport>();

    assert_eq!(report.database, "✅ Connected & Working");
    assert_eq!(report.connection_status, "Connected");
    assert_eq!(report.database_name, "coffee_test");
    assert_eq!(report.collections, vec!["menuitem", "order"]);
}
