//! # homesim-app
//!
//! Application layer: accessory controllers and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **host port** that adapters must implement:
//!   - `AccessoryHost`: register accessories, attach/remove services, push
//!     characteristic changes
//! - Provide the **accessory controller**: the per-device state machine that
//!   answers host reads/writes and pulses the auxiliary sensor
//! - Provide the **platform**: one controller per configured device, cache
//!   reconciliation, and routing of host calls by accessory id
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only (plus `tokio` for the sensor reset timer).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod controller;
pub mod platform;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;
