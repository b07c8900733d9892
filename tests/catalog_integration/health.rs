use reqwest::StatusCode;

use super::support::{BILLING, LEDGER, drop_apps_table, get_json, spawn_service};

#[tokio::test]
async fn healthz_reports_row_count() {
    let server = spawn_service(&[LEDGER, BILLING]).await;

    let (status, payload) = get_json(&server.url("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["apps"], 2);
    assert_eq!(payload["port"], server.addr.port());

    server.stop().await;
}

#[tokio::test]
async fn healthz_is_unavailable_when_store_fails() {
    let server = spawn_service(&[LEDGER]).await;
    drop_apps_table(&server.database_url).await;

    let (status, payload) = get_json(&server.url("/healthz")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload["ok"], false);
    assert_eq!(payload["error"], "Store unavailable");

    server.stop().await;
}
