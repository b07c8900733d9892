use app_catalog::application::{config::ToolsArgs, startup};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let args = ToolsArgs::parse();
    if let Err(error) = startup::run_tools(args).await {
        error!("tool adapter failed: {error}");
        std::process::exit(1);
    }
}
