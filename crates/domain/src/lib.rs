//! # homesim-domain
//!
//! Pure domain model for the homesim accessory simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **device configuration** (`switch` / `dimmer` / `blind`, optional sensor)
//! - Define the **service catalog** (service types, characteristic types, values)
//! - Define **accessory state** (the plain value record a controller owns)
//! - Define **events** (characteristic-change notifications pushed to the host)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod accessory;
pub mod catalog;
pub mod device;
pub mod event;
