use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use laurio_agents::Pipeline;
use laurio_api::{router, AppState};
use laurio_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("laurio=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr();

    let pipeline_config = config.clone();
    let state = Arc::new(AppState {
        config,
        pipelines: Arc::new(move || Pipeline::from_config(&pipeline_config)),
    });

    let app = router(state);

    info!("Laurio API starting on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
