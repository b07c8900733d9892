mod errors;
mod frames;

pub use errors::{
    ERROR_INTERNAL, ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST, ERROR_METHOD_NOT_FOUND,
    ERROR_PARSE, RpcError,
};
pub use frames::{
    ContentBlock, InitializeParams, InitializeResult, JSONRPC_VERSION, RequestFrame,
    ResponseFrame, ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult,
    ToolDefinition, ToolsCapability, ToolsListResult,
};

use serde_json::Value;

/// Protocol revisions the adapter can speak, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-03-26", "2024-11-05"];
pub const LATEST_PROTOCOL_VERSION: &str = "2025-03-26";

pub fn parse_request_frame(text: &str) -> Result<RequestFrame, ResponseFrame> {
    let raw = serde_json::from_str::<Value>(text).map_err(|error| {
        response_error(
            Value::Null,
            RpcError::new(ERROR_PARSE, format!("parse error: {error}")),
        )
    })?;

    let raw_id = raw.get("id").cloned();
    let id = raw_id.clone().unwrap_or(Value::Null);
    let mut request = serde_json::from_value::<RequestFrame>(raw).map_err(|error| {
        response_error(
            id.clone(),
            RpcError::new(ERROR_INVALID_REQUEST, format!("invalid request: {error}")),
        )
    })?;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(response_error(
            id,
            RpcError::new(ERROR_INVALID_REQUEST, "invalid request: expected jsonrpc=2.0"),
        ));
    }
    if request.method.trim().is_empty() {
        return Err(response_error(
            id,
            RpcError::new(ERROR_INVALID_REQUEST, "invalid request: missing method"),
        ));
    }

    request.id = raw_id;
    Ok(request)
}

#[must_use]
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|version| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .find(|supported| **supported == version)
                .copied()
        })
        .unwrap_or(LATEST_PROTOCOL_VERSION)
}

#[must_use]
pub fn response_ok(id: Value, result: Value) -> ResponseFrame {
    ResponseFrame {
        jsonrpc: JSONRPC_VERSION,
        id,
        result: Some(result),
        error: None,
    }
}

#[must_use]
pub fn response_error(id: Value, error: RpcError) -> ResponseFrame {
    ResponseFrame {
        jsonrpc: JSONRPC_VERSION,
        id,
        result: None,
        error: Some(error),
    }
}
