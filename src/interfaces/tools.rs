use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::{
    application::config::ToolsConfig,
    domain::error::DomainError,
    protocol::{ToolCallResult, ToolDefinition},
};

pub const LIST_APPS: &str = "list_apps";
pub const GET_APP_DETAILS: &str = "get_app_details";
const APP_ID_ARG: &str = "app_id";

/// Forwards tool invocations to the catalog service and relays the raw body.
#[derive(Debug, Clone)]
pub struct CatalogTools {
    client: reqwest::Client,
    catalog_url: String,
    upstream_errors_as_tool_errors: bool,
}

impl CatalogTools {
    pub fn new(config: &ToolsConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder().build().map_err(|error| {
            DomainError::Unavailable(format!("failed to build http client: {error}"))
        })?;

        Ok(Self {
            client,
            catalog_url: config.catalog_url.clone(),
            upstream_errors_as_tool_errors: config.upstream_errors_as_tool_errors,
        })
    }

    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: LIST_APPS.to_owned(),
                description: "List all apps in the platform".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            ToolDefinition {
                name: GET_APP_DETAILS.to_owned(),
                description: "Get details of a specific app in the platform".to_owned(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "app_id": {
                            "type": "number",
                            "description": "Application ID"
                        }
                    },
                    "required": [APP_ID_ARG]
                }),
            },
        ]
    }

    /// Runs the named tool. `None` means the name is not registered.
    pub async fn call(&self, name: &str, arguments: &Map<String, Value>) -> Option<ToolCallResult> {
        let result = match name {
            LIST_APPS => self.list_apps().await,
            GET_APP_DETAILS => self.get_app_details(arguments).await,
            _ => return None,
        };

        info!("tool {name} finished is_error={}", result.is_error);
        Some(result)
    }

    async fn list_apps(&self) -> ToolCallResult {
        self.relay(format!("{}/apps", self.catalog_url)).await
    }

    async fn get_app_details(&self, arguments: &Map<String, Value>) -> ToolCallResult {
        match require_int(arguments, APP_ID_ARG) {
            Ok(app_id) => {
                self.relay(format!("{}/apps/{app_id}", self.catalog_url))
                    .await
            }
            Err(message) => ToolCallResult::error(message),
        }
    }

    async fn relay(&self, url: String) -> ToolCallResult {
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!("catalog request to {url} failed: {error}");
                return ToolCallResult::error(error.to_string());
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => String::from_utf8_lossy(&body).into_owned(),
            Err(error) => {
                warn!("reading catalog response from {url} failed: {error}");
                return ToolCallResult::error(error.to_string());
            }
        };

        if self.upstream_errors_as_tool_errors && !status.is_success() {
            return ToolCallResult::error(body);
        }
        ToolCallResult::text(body)
    }
}

/// Coerces a numeric argument: integers as is, floats truncated, integer strings parsed.
fn require_int(arguments: &Map<String, Value>, key: &str) -> Result<i64, String> {
    let not_a_number = || format!("argument \"{key}\" is not a number");

    match arguments.get(key) {
        None | Some(Value::Null) => Err(format!("required argument \"{key}\" not found")),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_to_i64))
            .ok_or_else(not_a_number),
        Some(Value::String(text)) => text.trim().parse::<i64>().map_err(|_| not_a_number()),
        Some(_) => Err(not_a_number()),
    }
}

/// `None` when the truncated value falls outside the `i64` range.
fn truncate_to_i64(value: f64) -> Option<i64> {
    // -2^63 is exact as f64; 2^63 is the first value past i64::MAX.
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    const UPPER: f64 = 9_223_372_036_854_775_808.0;

    let truncated = value.trunc();
    (LOWER..UPPER)
        .contains(&truncated)
        .then_some(truncated as i64)
}
