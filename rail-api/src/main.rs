use anyhow::Context;
use rail_api::{app_config::Config, serve_grpc, serve_http, AppState};
use rail_core::BookingLedger;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rail_api=debug,rail_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    let ledger = Arc::new(BookingLedger::new());
    let state = AppState::new(ledger, config.events.channel_capacity);

    let grpc_addr = config.server.grpc_addr();
    let http_addr = config.server.http_addr();
    let grpc_listener = TcpListener::bind(grpc_addr)
        .await
        .with_context(|| format!("Failed to bind gRPC listener on {}", grpc_addr))?;
    let http_listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", http_addr))?;

    tracing::info!("gRPC TrainService listening on {}", grpc_addr);
    tracing::info!("HTTP gateway listening on {}", http_addr);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                // Park forever: `stop_tx` stays alive so its drop cannot stop the servers.
                std::future::pending::<()>().await;
            }
        }
    });

    tokio::try_join!(
        async {
            serve_grpc(state.clone(), grpc_listener, stopped(stop_rx.clone()))
                .await
                .context("gRPC server failed")
        },
        async {
            serve_http(state.clone(), http_listener, stopped(stop_rx.clone()))
                .await
                .context("HTTP server failed")
        },
    )?;

    tracing::info!("Servers stopped");
    Ok(())
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}
