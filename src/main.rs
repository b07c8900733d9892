use app_catalog::application::{config::ServiceArgs, startup};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let args = ServiceArgs::parse();
    if let Err(error) = startup::run_service(args).await {
        error!("server failed: {error}");
        std::process::exit(1);
    }
}
