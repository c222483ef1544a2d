//! # Postboard Backend
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_core::Config;
use lib_web::{init_tracing, start_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    info!("Loading configuration...");
    let config = Config::from_env()?.validated()?;

    start_server(config).await
}
