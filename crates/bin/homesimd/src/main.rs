//! # homesimd: homesim daemon
//!
//! Composition root that wires the host adapter and the platform together
//! and keeps the simulated accessories alive.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Construct the in-memory host (adapter)
//! - Construct the platform, injecting the host via the port trait
//! - Log every characteristic change the accessories push
//! - Handle graceful shutdown (Ctrl-C), cancelling pending sensor resets
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use homesim_adapter_memory::MemoryHost;
use homesim_app::platform::Platform;
use homesim_domain::device::SensorKind;
use homesim_domain::event::CharacteristicChanged;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Host
    let host = Arc::new(MemoryHost::new(config.host.event_capacity));
    let changes = tokio::spawn(log_changes(host.subscribe()));

    // Accessories
    let mut platform = Platform::new(Arc::clone(&host));
    platform.configure(&config.devices)?;
    for controller in platform.controllers() {
        let device = controller.config();
        tracing::info!(
            accessory = %controller.id(),
            name = %device.name,
            kind = %device.kind,
            sensor = device.sensor.map(SensorKind::as_str),
            "accessory ready"
        );
    }
    if platform.is_empty() {
        tracing::warn!("no devices configured");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    platform.shutdown();
    changes.abort();

    Ok(())
}

async fn log_changes(mut rx: broadcast::Receiver<CharacteristicChanged>) {
    loop {
        match rx.recv().await {
            Ok(change) => tracing::info!(
                accessory = %change.accessory,
                service = %change.service,
                characteristic = %change.characteristic,
                value = %change.value,
                "characteristic changed"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "characteristic change log lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
