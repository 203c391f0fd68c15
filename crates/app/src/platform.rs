//! Platform: one accessory controller per configured device.
//!
//! The platform registers every configured device with the host (restoring
//! accessories the host has cached), builds their controllers, unregisters
//! cached accessories that are no longer configured, and routes host reads
//! and writes to the right controller.

use std::collections::BTreeMap;

use homesim_domain::catalog::{CharacteristicType, CharacteristicValue, ServiceType};
use homesim_domain::device::{DeviceConfig, validate_devices};
use homesim_domain::error::{HomesimError, NotFoundError};
use homesim_domain::id::AccessoryId;

use crate::controller::AccessoryController;
use crate::ports::{AccessoryHost, Registration};

/// Owns the controllers of every configured accessory.
pub struct Platform<H: AccessoryHost> {
    host: H,
    controllers: BTreeMap<AccessoryId, AccessoryController<H>>,
}

impl<H: AccessoryHost + Clone + 'static> Platform<H> {
    /// Create an empty platform on top of `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            controllers: BTreeMap::new(),
        }
    }

    /// Bring the host in line with `devices`.
    ///
    /// Can be called again with a new device list; controllers of devices
    /// that stay configured are rebuilt, and their sensor pulses end with
    /// the idle value pushed to the host. The new controllers replace the
    /// old ones only once every device is configured, so a failure leaves
    /// the previous controllers in place.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] if a name is empty or used twice,
    /// or any error the host reports while registering accessories or editing
    /// services.
    pub fn configure(&mut self, devices: &[DeviceConfig]) -> Result<(), HomesimError> {
        validate_devices(devices)?;

        let mut controllers = BTreeMap::new();
        for device in devices {
            let id = device.accessory_id();
            match self.host.register_accessory(id, &device.name)? {
                Registration::Created => {
                    tracing::info!(accessory = %id, name = %device.name, "registered new accessory");
                }
                Registration::Restored => {
                    tracing::info!(accessory = %id, name = %device.name, "restored cached accessory");
                }
            }
            // the old controller's pulse must end before its services change
            if let Some(previous) = self.controllers.get(&id) {
                previous.cancel_sensor();
            }
            let controller = AccessoryController::configure(self.host.clone(), id, device.clone())?;
            controllers.insert(id, controller);
        }

        // dropping a removed device's controller pushes its idle sensor value
        // while the accessory is still registered
        self.controllers = controllers;

        for id in self.host.accessories() {
            if !self.controllers.contains_key(&id) {
                tracing::info!(accessory = %id, "removing accessory no longer configured");
                self.host.unregister_accessory(id)?;
            }
        }

        tracing::info!(count = self.controllers.len(), "platform configured");
        Ok(())
    }

    /// Route a host write to the accessory's controller.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] for an unknown accessory, or the
    /// controller's dispatch error.
    pub fn handle_set(
        &self,
        id: AccessoryId,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: &CharacteristicValue,
    ) -> Result<(), HomesimError> {
        self.require(id)?.set(service, characteristic, value)
    }
}

impl<H: AccessoryHost> Platform<H> {
    /// Route a host read to the accessory's controller.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] for an unknown accessory, or
    /// [`HomesimError::Unsupported`] if it does not expose the pair.
    pub fn handle_get(
        &self,
        id: AccessoryId,
        service: ServiceType,
        characteristic: CharacteristicType,
    ) -> Result<CharacteristicValue, HomesimError> {
        self.require(id)?.get(service, characteristic)
    }

    #[must_use]
    pub fn controller(&self, id: AccessoryId) -> Option<&AccessoryController<H>> {
        self.controllers.get(&id)
    }

    /// Look a controller up by its configured device name.
    #[must_use]
    pub fn controller_by_name(&self, name: &str) -> Option<&AccessoryController<H>> {
        self.controller(AccessoryId::from_name(name))
    }

    pub fn controllers(&self) -> impl Iterator<Item = &AccessoryController<H>> {
        self.controllers.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Drop every controller, cancelling pending sensor resets.
    ///
    /// Accessories stay registered with the host.
    pub fn shutdown(&mut self) {
        let count = self.controllers.len();
        self.controllers.clear();
        tracing::info!(count, "platform stopped");
    }

    fn require(&self, id: AccessoryId) -> Result<&AccessoryController<H>, HomesimError> {
        self.controllers.get(&id).ok_or_else(|| {
            NotFoundError {
                entity: "Accessory",
                id: id.to_string(),
            }
            .into()
        })
    }
}
