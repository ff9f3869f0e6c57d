//! eSocial Bridge Server Binary
//!
//! Binds the HTTP surface and serves until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use esocial_relay::{RelayConfig, RelayService};
use esocial_server::{router, AppState, ServerError, Settings};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,esocial_relay=debug,esocial_server=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_logging();

    let settings = Settings::load_or_default()?;

    let relay = RelayService::new(RelayConfig {
        timeout: Duration::from_secs(settings.relay_timeout_secs),
        ..Default::default()
    });

    let app = router(AppState {
        relay: Arc::new(relay),
    });

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Listening on {}", settings.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                return Err(ServerError::Io(e));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
