use settle_core::Settings;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod error;
mod middleware;
mod routes;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env();
    if settings.webhook_url.is_none() {
        warn!("no webhook url configured; submissions will fail until one is set");
    }

    let addr: SocketAddr = settings.api_bind.parse()?;
    info!(
        %addr,
        env = %settings.settle_env,
        enrich = settings.enrich,
        "starting api"
    );

    let state = AppState::new(settings)?;
    let app = routes::app_router(state);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
