use app_catalog::{
    application::startup,
    interfaces::tools::{CatalogTools, GET_APP_DETAILS, LIST_APPS},
};
use serde_json::{Map, Value, json};

use super::support::{BILLING, LEDGER, get_text, spawn_service, tools_config};

fn arguments(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn list_apps_relays_upstream_body() {
    let server = spawn_service(&[LEDGER, BILLING]).await;
    let tools = CatalogTools::new(&tools_config(&server)).expect("client should build");

    let result = tools
        .call(LIST_APPS, &Map::new())
        .await
        .expect("tool should be registered");
    let (_, expected) = get_text(&server.url("/apps")).await;

    assert!(!result.is_error);
    assert_eq!(result.text_content(), expected);

    server.stop().await;
}

#[tokio::test]
async fn get_app_details_relays_detail_and_not_found_bodies() {
    let server = spawn_service(&[LEDGER]).await;
    let tools = CatalogTools::new(&tools_config(&server)).expect("client should build");

    let found = tools
        .call(GET_APP_DETAILS, &arguments(json!({"app_id": 1})))
        .await
        .expect("tool should be registered");
    assert!(!found.is_error);
    assert_eq!(
        found.text_content(),
        r#"{"id":1,"name":"Ledger","owner":"finance-team","language":"go","framework":"gin"}"#
    );

    let missing = tools
        .call(GET_APP_DETAILS, &arguments(json!({"app_id": 2})))
        .await
        .expect("tool should be registered");
    assert!(!missing.is_error);
    assert_eq!(missing.text_content(), r#"{"error":"App not found"}"#);

    server.stop().await;
}

#[tokio::test]
async fn upstream_errors_can_be_flagged_as_tool_errors() {
    let server = spawn_service(&[LEDGER]).await;
    let mut config = tools_config(&server);
    config.upstream_errors_as_tool_errors = true;
    let tools = CatalogTools::new(&config).expect("client should build");

    let missing = tools
        .call(GET_APP_DETAILS, &arguments(json!({"app_id": 99})))
        .await
        .expect("tool should be registered");
    assert!(missing.is_error);
    assert_eq!(missing.text_content(), r#"{"error":"App not found"}"#);

    let found = tools
        .call(GET_APP_DETAILS, &arguments(json!({"app_id": "1"})))
        .await
        .expect("tool should be registered");
    assert!(!found.is_error);

    server.stop().await;
}

#[tokio::test]
async fn stdio_session_calls_through_to_catalog() {
    let server = spawn_service(&[LEDGER]).await;

    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2025-03-26"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "list_apps"}}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "get_app_details", "arguments": {"app_id": "abc"}}}),
    ]
    .iter()
    .map(|frame| format!("{frame}\n"))
    .collect::<String>();

    let mut output = Vec::new();
    startup::run_tools_with_io(tools_config(&server), input.as_bytes(), &mut output)
        .await
        .expect("adapter should stop at EOF");

    let responses: Vec<Value> = String::from_utf8(output)
        .expect("output should be utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is json"))
        .collect();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(
        responses[1]["result"],
        json!({
            "content": [{"type": "text", "text": "[{\"id\":1,\"name\":\"Ledger\"}]"}],
            "isError": false
        })
    );
    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["result"]["isError"], true);
    assert_eq!(
        responses[2]["result"]["content"][0]["text"],
        "argument \"app_id\" is not a number"
    );

    server.stop().await;
}
