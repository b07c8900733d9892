use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use reqwest::Url;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "catalog-service",
    version,
    about = "Read-only HTTP query service over the apps catalog"
)]
pub struct ServiceArgs {
    #[arg(long, env = "CATALOG_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "CATALOG_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(
        long,
        env = "CATALOG_DATABASE_URL",
        default_value = "sqlite://./.app-catalog/apps.db"
    )]
    pub database_url: String,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "CATALOG_JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "catalog-tools",
    version,
    about = "Stdio tool adapter exposing the apps catalog to agent frameworks"
)]
pub struct ToolsArgs {
    #[arg(long, env = "CATALOG_URL", default_value = "http://localhost:8080")]
    pub catalog_url: String,

    #[arg(long, env = "CATALOG_UPSTREAM_ERRORS_AS_TOOL_ERRORS", default_value_t = false)]
    pub upstream_errors_as_tool_errors: bool,

    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_filter: String,

    #[arg(long, env = "CATALOG_JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub log_filter: String,
    pub json_logs: bool,
}

impl ServiceConfig {
    pub fn from_args(args: ServiceArgs) -> Result<Self, String> {
        if args.port == 0 {
            return Err("port must be greater than 0".to_owned());
        }
        let database_url = normalize_database_url(&args.database_url)?;

        Ok(Self {
            host: args.host,
            port: args.port,
            database_url,
            log_filter: args.log_filter,
            json_logs: args.json_logs,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub fn for_test(host: IpAddr, port: u16, database_url: impl Into<String>) -> Self {
        Self {
            host,
            port,
            database_url: database_url.into(),
            log_filter: "warn".to_owned(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub catalog_url: String,
    pub upstream_errors_as_tool_errors: bool,
    pub log_filter: String,
    pub json_logs: bool,
}

impl ToolsConfig {
    pub fn from_args(args: ToolsArgs) -> Result<Self, String> {
        let catalog_url = normalize_catalog_url(&args.catalog_url)?;

        Ok(Self {
            catalog_url,
            upstream_errors_as_tool_errors: args.upstream_errors_as_tool_errors,
            log_filter: args.log_filter,
            json_logs: args.json_logs,
        })
    }

    #[must_use]
    pub fn for_test(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            upstream_errors_as_tool_errors: false,
            log_filter: "warn".to_owned(),
            json_logs: false,
        }
    }
}

fn normalize_database_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("database_url must not be empty".to_owned());
    }
    if !trimmed.starts_with("sqlite:") {
        return Err(format!(
            "database_url must use the sqlite: scheme, got {trimmed}"
        ));
    }
    Ok(trimmed.to_owned())
}

fn normalize_catalog_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|error| format!("invalid catalog_url: {error}"))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_owned()),
        other => Err(format!("catalog_url must use http or https, got {other}")),
    }
}
