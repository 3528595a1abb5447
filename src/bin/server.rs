use anyhow::Context;
use quote_summary::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quote_summary::setup_logging();

    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("Config error")
        .inspect_err(|e| error!("{:#}", e))?;

    quote_summary::api::serve(&config).await
}
