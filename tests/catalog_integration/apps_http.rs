use reqwest::StatusCode;
use serde_json::json;

use super::support::{BILLING, LEDGER, drop_apps_table, get_json, get_text, spawn_service};

#[tokio::test]
async fn list_apps_returns_summaries() {
    let server = spawn_service(&[LEDGER]).await;

    let (status, body) = get_text(&server.url("/apps")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"id":1,"name":"Ledger"}]"#);

    server.stop().await;
}

#[tokio::test]
async fn list_apps_is_empty_array_without_rows() {
    let server = spawn_service(&[]).await;

    let (status, body) = get_text(&server.url("/apps")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    server.stop().await;
}

#[tokio::test]
async fn list_apps_has_one_summary_per_row() {
    let server = spawn_service(&[BILLING, LEDGER]).await;

    let (status, payload) = get_json(&server.url("/apps")).await;
    assert_eq!(status, StatusCode::OK);
    let apps = payload.as_array().expect("list should be an array");
    assert_eq!(apps.len(), 2);
    for (id, name, ..) in [LEDGER, BILLING] {
        let matches = apps
            .iter()
            .filter(|app| app["id"] == id && app["name"] == name)
            .count();
        assert_eq!(matches, 1, "app {id} should appear exactly once");
    }

    server.stop().await;
}

#[tokio::test]
async fn get_app_returns_full_detail() {
    let server = spawn_service(&[LEDGER, BILLING]).await;

    let (status, body) = get_text(&server.url("/apps/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"id":1,"name":"Ledger","owner":"finance-team","language":"go","framework":"gin"}"#
    );

    let (_, payload) = get_json(&server.url("/apps/7")).await;
    assert_eq!(
        payload,
        json!({
            "id": 7,
            "name": "Billing",
            "owner": "payments-team",
            "language": "rust",
            "framework": "axum"
        })
    );

    server.stop().await;
}

#[tokio::test]
async fn get_app_missing_or_non_numeric_is_not_found() {
    let server = spawn_service(&[LEDGER]).await;

    for path in ["/apps/2", "/apps/ledger", "/apps/1.5", "/apps/%FF"] {
        let (status, payload) = get_json(&server.url(path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(payload, json!({"error": "App not found"}));
    }

    server.stop().await;
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let server = spawn_service(&[BILLING, LEDGER]).await;

    let (_, first_list) = get_text(&server.url("/apps")).await;
    let (_, second_list) = get_text(&server.url("/apps")).await;
    assert_eq!(first_list, second_list);

    let (_, first_detail) = get_text(&server.url("/apps/7")).await;
    let (_, second_detail) = get_text(&server.url("/apps/7")).await;
    assert_eq!(first_detail, second_detail);

    server.stop().await;
}

#[tokio::test]
async fn query_failures_return_generic_errors() {
    let server = spawn_service(&[LEDGER]).await;
    drop_apps_table(&server.database_url).await;

    let (status, payload) = get_json(&server.url("/apps")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, json!({"error": "Failed to query apps"}));

    let (status, payload) = get_json(&server.url("/apps/1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, json!({"error": "Failed to query app"}));

    server.stop().await;
}
