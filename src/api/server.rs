//! HTTP server loop

use crate::api::{router, AppState};
use crate::config::GatewayConfig;
use crate::core::client::BirdeyeClient;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

pub async fn serve(config: GatewayConfig) -> Result<()> {
    let client = BirdeyeClient::new(&config.upstream)?;
    let state = AppState::new(Arc::new(client));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!("❌ Failed to bind to {}: {}", addr, e);
        GatewayError::IoError(e)
    })?;

    info!("🚀 Starting Birdeye API server on {}...", addr);
    serve_with_listener(listener, state, shutdown_signal()).await
}

/// 在已綁定的 listener 上提供服務，直到 shutdown 完成
pub async fn serve_with_listener<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
