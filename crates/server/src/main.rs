mod applications;
mod bootstrap;
mod contacts;
mod error;
mod health;
mod notes;
mod shop;
mod students;

use std::time::Duration;

use anyhow::Result;
use satchel_core::config::{AppConfig, LoadOptions};
use tracing::{info, warn};

fn init_logging(config: &AppConfig) {
    use satchel_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let router = app.router();

    info!(
        event_name = "system.server.started",
        bind_address = %address,
        products = app.catalog.len(),
        "satchel-server started"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        let _ = shutdown_rx.await;
    });
    let mut server_task = tokio::spawn(async move { server.await });

    wait_for_shutdown().await?;
    info!(event_name = "system.server.stopping", "shutdown signal received; draining connections");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(joined) => joined??,
        Err(_) => {
            warn!(
                event_name = "system.server.drain_timeout",
                grace_secs = grace.as_secs(),
                "graceful shutdown window elapsed; aborting server task"
            );
            server_task.abort();
        }
    }

    info!(event_name = "system.server.stopped", "satchel-server stopped");
    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
