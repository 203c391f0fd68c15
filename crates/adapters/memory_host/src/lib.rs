//! # homesim-adapter-memory
//!
//! In-process implementation of the [`AccessoryHost`] port.
//!
//! [`MemoryHost`] keeps every registered accessory, its services and their
//! current characteristic values in memory. Characteristic changes pushed by
//! controllers are stored and broadcast on a tokio [`broadcast`] channel, so a
//! daemon can log them and tests can observe them.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `homesim-app` and `homesim-domain`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use homesim_app::ports::{AccessoryHost, Registration};
use homesim_domain::catalog::{
    CharacteristicType, CharacteristicValue, ServiceDescriptor, ServiceKey,
};
use homesim_domain::error::{HomesimError, NotFoundError};
use homesim_domain::event::CharacteristicChanged;
use homesim_domain::id::AccessoryId;

/// A service as the host holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedService {
    pub key: ServiceKey,
    pub display_name: String,
    pub values: BTreeMap<CharacteristicType, CharacteristicValue>,
}

impl From<ServiceDescriptor> for HostedService {
    fn from(descriptor: ServiceDescriptor) -> Self {
        Self {
            key: descriptor.key,
            display_name: descriptor.display_name,
            values: descriptor.values,
        }
    }
}

/// An accessory as the host holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedAccessory {
    pub name: String,
    pub services: Vec<HostedService>,
}

impl HostedAccessory {
    fn service_mut(&mut self, key: &ServiceKey) -> Option<&mut HostedService> {
        self.services.iter_mut().find(|service| &service.key == key)
    }
}

/// In-memory accessory host.
///
/// Publishing a change succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct MemoryHost {
    accessories: Mutex<HashMap<AccessoryId, HostedAccessory>>,
    sender: broadcast::Sender<CharacteristicChanged>,
}

impl MemoryHost {
    /// Create an empty host whose change channel buffers `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            accessories: Mutex::new(HashMap::new()),
            sender,
        }
    }

    /// Subscribe to characteristic changes.
    ///
    /// Returns a receiver that will get all changes published *after* the
    /// subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CharacteristicChanged> {
        self.sender.subscribe()
    }

    /// Snapshot of one accessory.
    #[must_use]
    pub fn accessory(&self, id: AccessoryId) -> Option<HostedAccessory> {
        self.lock().get(&id).cloned()
    }

    /// Stored value of a characteristic.
    #[must_use]
    pub fn value(
        &self,
        id: AccessoryId,
        service: &ServiceKey,
        characteristic: CharacteristicType,
    ) -> Option<CharacteristicValue> {
        self.lock()
            .get(&id)?
            .services
            .iter()
            .find(|s| &s.key == service)?
            .values
            .get(&characteristic)
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<AccessoryId, HostedAccessory>> {
        self.accessories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn accessory_not_found(id: AccessoryId) -> HomesimError {
    NotFoundError {
        entity: "Accessory",
        id: id.to_string(),
    }
    .into()
}

fn service_not_found(service: &ServiceKey) -> HomesimError {
    NotFoundError {
        entity: "Service",
        id: service.to_string(),
    }
    .into()
}

impl AccessoryHost for MemoryHost {
    fn accessories(&self) -> Vec<AccessoryId> {
        self.lock().keys().copied().collect()
    }

    fn register_accessory(
        &self,
        id: AccessoryId,
        name: &str,
    ) -> Result<Registration, HomesimError> {
        let mut accessories = self.lock();
        if let Some(existing) = accessories.get_mut(&id) {
            existing.name = name.to_string();
            return Ok(Registration::Restored);
        }
        accessories.insert(
            id,
            HostedAccessory {
                name: name.to_string(),
                services: Vec::new(),
            },
        );
        tracing::debug!(accessory = %id, name, "accessory registered");
        Ok(Registration::Created)
    }

    fn unregister_accessory(&self, id: AccessoryId) -> Result<(), HomesimError> {
        if self.lock().remove(&id).is_none() {
            return Err(accessory_not_found(id));
        }
        tracing::debug!(accessory = %id, "accessory unregistered");
        Ok(())
    }

    fn services(&self, id: AccessoryId) -> Result<Vec<ServiceKey>, HomesimError> {
        self.lock()
            .get(&id)
            .map(|accessory| accessory.services.iter().map(|s| s.key.clone()).collect())
            .ok_or_else(|| accessory_not_found(id))
    }

    fn add_service(&self, id: AccessoryId, service: ServiceDescriptor) -> Result<(), HomesimError> {
        let mut accessories = self.lock();
        let accessory = accessories
            .get_mut(&id)
            .ok_or_else(|| accessory_not_found(id))?;
        tracing::debug!(accessory = %id, service = %service.key, "service added");
        match accessory.service_mut(&service.key) {
            Some(existing) => *existing = service.into(),
            None => accessory.services.push(service.into()),
        }
        Ok(())
    }

    fn remove_service(&self, id: AccessoryId, service: &ServiceKey) -> Result<(), HomesimError> {
        let mut accessories = self.lock();
        let accessory = accessories
            .get_mut(&id)
            .ok_or_else(|| accessory_not_found(id))?;
        let before = accessory.services.len();
        accessory.services.retain(|s| &s.key != service);
        if accessory.services.len() == before {
            return Err(service_not_found(service));
        }
        tracing::debug!(accessory = %id, %service, "service removed");
        Ok(())
    }

    fn notify_characteristic(
        &self,
        id: AccessoryId,
        service: &ServiceKey,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), HomesimError> {
        {
            let mut accessories = self.lock();
            let hosted = accessories
                .get_mut(&id)
                .ok_or_else(|| accessory_not_found(id))?
                .service_mut(service)
                .ok_or_else(|| service_not_found(service))?;
            hosted.values.insert(characteristic, value.clone());
        }
        // send fails only without receivers; the change is then dropped
        let _ = self.sender.send(CharacteristicChanged::new(
            id,
            service.clone(),
            characteristic,
            value,
        ));
        Ok(())
    }
}
