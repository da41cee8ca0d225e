//! Match Sweeper
//!
//! Loads the match book from `MATCHES_PATH`, runs the recurring start sweep
//! over it and logs every lifecycle event. The book is written back on
//! shutdown so matches started while running stay started.

use anyhow::{Context, Result};
use matchplay_core::kernel::{
    load_matches, save_matches, start_scheduler, EventDispatcher, MatchBook, TracingListener,
};
use matchplay_core::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,matchplay_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting match sweeper");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        cron = %config.sweep_cron,
        matches_path = ?config.matches_path,
        "Configuration loaded"
    );

    let dispatcher = EventDispatcher::new().with_listener(Arc::new(TracingListener));
    let book = MatchBook::new(dispatcher);

    if let Some(path) = &config.matches_path {
        let restored = book.restore(load_matches(path).await?);
        tracing::info!(count = restored, "Match book restored");
    } else {
        tracing::warn!("MATCHES_PATH not set, sweeping an in-memory book only");
    }

    let mut scheduler = start_scheduler(book.clone(), &config)
        .await
        .context("Failed to start scheduler")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    scheduler
        .shutdown()
        .await
        .context("Failed to stop scheduler")?;

    if let Some(path) = &config.matches_path {
        save_matches(path, &book.snapshots()).await?;
    }
    Ok(())
}
