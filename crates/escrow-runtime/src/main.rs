//! # Escrow Runtime
//!
//! Entry point: builds the bus and the engine, starts the projection task,
//! runs the scenario and reports what the projection saw.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Create the event bus and the escrow service
//! 4. Spawn the projection over the event stream
//! 5. Run the scenario, then shut the projection down

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use escrow_runtime::{run_projection, run_scenario, OfferProjection, Parties};
use escrow_swap::{EscrowConfig, EscrowService, HashLockCommitment, InMemoryCustody};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = EscrowConfig::from_env();
    info!(
        retain_consumed = config.retain_consumed,
        capacity = config.event_channel_capacity,
        "Escrow runtime v{}",
        escrow_swap::VERSION
    );

    let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_channel_capacity));
    let custody = Arc::new(InMemoryCustody::new());
    let service = EscrowService::new(
        HashLockCommitment::new(),
        Arc::clone(&bus),
        Arc::clone(&custody),
        config,
    );

    let projection = Arc::new(RwLock::new(OfferProjection::new()));
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let projector = tokio::spawn(run_projection(
        bus.event_stream(EventFilter::all()),
        Arc::clone(&projection),
        shutdown_rx,
    ));

    let report = run_scenario(&service, Parties::default()).await?;
    info!(
        "{}",
        serde_json::to_string(&report).context("failed to encode scenario report")?
    );

    // Let the projection drain what was published.
    let published = bus.events_published();
    tokio::time::timeout(Duration::from_secs(5), async {
        while projection
            .read()
            .cursor()
            .map_or(true, |c| c.sequence + 1 < published)
        {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .context("projection did not catch up")?;

    shutdown_tx
        .send(true)
        .context("projection task already gone")?;
    let applied = projector.await.context("projection task panicked")?;

    let snapshot = projection.read().clone();
    info!(
        applied,
        open = snapshot.open_count(),
        swapped = snapshot.swapped(),
        cancelled = snapshot.cancelled(),
        stats = ?service.stats(),
        "Runtime finished"
    );

    Ok(())
}
