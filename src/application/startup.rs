use std::future::Future;

use tokio::{
    io::{AsyncBufRead, AsyncWrite, BufReader},
    net::TcpListener,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter};

use crate::{
    application::{
        config::{ServiceArgs, ServiceConfig, ToolsArgs, ToolsConfig},
        state::SharedState,
    },
    domain::error::DomainError,
    interfaces::{
        http,
        stdio::{self, ToolServer},
        tools::CatalogTools,
    },
};

pub async fn run_service(args: ServiceArgs) -> Result<(), DomainError> {
    // Installed before validation so configuration errors reach the log.
    init_logging(&args.log_filter, args.json_logs, std::io::stdout)?;
    let config = ServiceConfig::from_args(args)
        .map_err(|error| DomainError::InvalidRequest(format!("configuration error: {error}")))?;

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .map_err(|error| DomainError::Unavailable(format!("failed to bind listener: {error}")))?;

    let signal = shutdown_signal();
    run_service_with_listener(listener, config, signal).await
}

pub async fn run_service_with_listener(
    listener: TcpListener,
    config: ServiceConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DomainError> {
    info!(
        "starting catalog-service host={} port={}",
        config.host, config.port
    );

    let state = SharedState::new(config).await?;
    let serve_result = http::serve(listener, state.clone(), shutdown).await;
    state.close().await;
    info!("catalog-service stopped, database closed");

    serve_result
}

pub async fn run_tools(args: ToolsArgs) -> Result<(), DomainError> {
    // stdout carries the protocol, so logs go to stderr.
    init_logging(&args.log_filter, args.json_logs, std::io::stderr)?;
    let config = ToolsConfig::from_args(args)
        .map_err(|error| DomainError::InvalidRequest(format!("configuration error: {error}")))?;

    run_tools_with_io(config, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

pub async fn run_tools_with_io<R, W>(
    config: ToolsConfig,
    reader: R,
    writer: W,
) -> Result<(), DomainError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("starting catalog-tools upstream={}", config.catalog_url);

    let server = ToolServer::new(CatalogTools::new(&config)?);
    stdio::serve(&server, reader, writer).await
}

fn init_logging<W>(filter: &str, json_logs: bool, writer: W) -> Result<(), DomainError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(writer);

    if json_logs {
        builder.json().try_init().map_err(|error| {
            DomainError::Unavailable(format!("failed to initialize logger: {error}"))
        })?;
    } else {
        builder.compact().try_init().map_err(|error| {
            DomainError::Unavailable(format!("failed to initialize logger: {error}"))
        })?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
