use serde::Serialize;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    domain::error::DomainError,
    interfaces::tools::CatalogTools,
    protocol::{
        ERROR_INTERNAL, ERROR_INVALID_PARAMS, ERROR_METHOD_NOT_FOUND, InitializeParams,
        InitializeResult, RequestFrame, ResponseFrame, RpcError, ServerCapabilities, ServerInfo,
        ToolCallParams, ToolsCapability, ToolsListResult, negotiate_protocol_version,
        parse_request_frame, response_error, response_ok,
    },
};

pub const SERVER_NAME: &str = "Platform MCP";

/// Line-delimited JSON-RPC tool server. Requests are handled one at a time.
#[derive(Debug, Clone)]
pub struct ToolServer {
    tools: CatalogTools,
}

impl ToolServer {
    #[must_use]
    pub fn new(tools: CatalogTools) -> Self {
        Self { tools }
    }

    /// Handles one inbound line. Notifications yield no response.
    pub async fn handle_line(&self, line: &str) -> Option<ResponseFrame> {
        let request = match parse_request_frame(line) {
            Ok(request) => request,
            Err(response) => {
                warn!("rejected inbound frame: {:?}", response.error);
                return Some(response);
            }
        };

        let Some(id) = request.id.clone() else {
            debug!("notification {} received", request.method);
            return None;
        };

        Some(match self.dispatch(&request).await {
            Ok(result) => response_ok(id, result),
            Err(error) => response_error(id, error),
        })
    }

    async fn dispatch(&self, request: &RequestFrame) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => {
                let params = parse_params::<InitializeParams>(request.params.clone())?
                    .unwrap_or_default();
                to_result(&InitializeResult {
                    protocol_version: negotiate_protocol_version(
                        params.protocol_version.as_deref(),
                    )
                    .to_owned(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_owned(),
                        version: env!("CARGO_PKG_VERSION").to_owned(),
                    },
                })
            }
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ToolsListResult {
                tools: CatalogTools::definitions(),
            }),
            "tools/call" => {
                let Some(params) = parse_params::<ToolCallParams>(request.params.clone())? else {
                    return Err(RpcError::new(
                        ERROR_INVALID_PARAMS,
                        "tools/call requires params.name",
                    ));
                };
                let arguments = params.arguments.unwrap_or_else(Map::new);
                match self.tools.call(&params.name, &arguments).await {
                    Some(result) => to_result(&result),
                    None => Err(RpcError::new(
                        ERROR_INVALID_PARAMS,
                        format!("unknown tool: {}", params.name),
                    )),
                }
            }
            method => Err(RpcError::new(
                ERROR_METHOD_NOT_FOUND,
                format!("method not found: {method}"),
            )),
        }
    }
}

/// Reads requests until EOF, writing one response line per answered request.
pub async fn serve<R, W>(server: &ToolServer, reader: R, mut writer: W) -> Result<(), DomainError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("tool server ready, tools={}", CatalogTools::definitions().len());

    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|error| DomainError::Unavailable(format!("failed to read stdin: {error}")))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = server.handle_line(line).await else {
            continue;
        };

        let mut text = serde_json::to_string(&response).map_err(|error| {
            DomainError::Unavailable(format!("failed to encode response: {error}"))
        })?;
        text.push('\n');
        writer
            .write_all(text.as_bytes())
            .await
            .map_err(|error| DomainError::Unavailable(format!("failed to write stdout: {error}")))?;
        writer
            .flush()
            .await
            .map_err(|error| DomainError::Unavailable(format!("failed to flush stdout: {error}")))?;
    }

    info!("stdin closed, tool server stopping");
    Ok(())
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<Value>,
) -> Result<Option<T>, RpcError> {
    match params {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value::<T>(value).map(Some).map_err(|error| {
            RpcError::new(ERROR_INVALID_PARAMS, format!("invalid params: {error}"))
        }),
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value)
        .map_err(|error| RpcError::new(ERROR_INTERNAL, format!("failed to encode result: {error}")))
}
