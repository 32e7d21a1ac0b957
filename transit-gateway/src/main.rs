use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use transit_gateway::cache::CachedSlClient;
use transit_gateway::config::Config;
use transit_gateway::sl::SlClient;
use transit_gateway::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid config");
            return ExitCode::FAILURE;
        }
    };

    let client = match SlClient::new(config.sl_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create SL client");
            return ExitCode::FAILURE;
        }
    };
    let sl = CachedSlClient::new(client, &config.cache_config());

    let app = create_router(AppState::new(sl));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        %addr,
        upstream = %config.api_url,
        "server started; GET /times/:stationId, GET /stations?q=, GET /health"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
