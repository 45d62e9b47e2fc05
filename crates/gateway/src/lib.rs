//! API Gateway Library
//!
//! HTTP delivery for the user service: handlers, routing, health checks, OpenAPI
//! documentation and the server lifecycle.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::pin::pin;

use tokio::sync::watch;
use tracing::{info, warn};

use user_service_lib::config::UserServiceConfig;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the database, then serve HTTP until a shutdown signal.
pub async fn run(
    config: GatewayConfig,
    service_config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = user_service_lib::connect(&service_config).await?;
    let user_service = user_service_lib::user_service(&db);

    let state = AppState::new(user_service, db);
    run_server_with_state(config, state).await
}

/// Run the HTTP server with the given state.
///
/// After Ctrl-C or SIGTERM the listener stops accepting connections and
/// in-flight requests get `shutdown_grace_secs` to finish.
pub async fn run_server_with_state(
    config: GatewayConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, config.request_timeout());

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {}", addr);

    let (signalled_tx, mut signalled_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(true);
    });
    let mut server = pin!(server.into_future());

    tokio::select! {
        result = &mut server => result?,
        _ = signalled_rx.changed() => {
            info!("Shutdown signal received, draining connections");
            match tokio::time::timeout(config.shutdown_grace(), &mut server).await {
                Ok(result) => result?,
                Err(_) => warn!(
                    grace_secs = config.shutdown_grace_secs,
                    "Shutdown grace period elapsed, dropping in-flight requests"
                ),
            }
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
