use std::sync::Arc;

use anyhow::Context;

use orderdesk_api::app::{build_app, services::AppServices};
use orderdesk_api::config::AppConfig;
use orderdesk_api::seed::SeedData;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    orderdesk_observability::init();

    let config = AppConfig::from_env();

    let seed = match &config.seed_file {
        Some(path) => SeedData::load(path)?,
        None => {
            tracing::warn!("ORDERDESK_SEED_FILE not set; starting with empty repositories");
            SeedData::default()
        }
    };

    let services = Arc::new(AppServices::in_memory(&config.workflow, seed));
    let app = build_app(services.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(compensation = ?services.workflow.compensation(), "listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
