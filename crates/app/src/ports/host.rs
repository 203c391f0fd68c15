//! Host port: the capabilities a home-automation host offers to accessories.
//!
//! The host owns the accessory/service graph the hub sees. Controllers never
//! look services up globally; they receive an [`AccessoryHost`] at
//! construction and go through it for every structural change and for every
//! unsolicited characteristic update.

use std::sync::Arc;

use homesim_domain::catalog::{
    CharacteristicType, CharacteristicValue, ServiceDescriptor, ServiceKey,
};
use homesim_domain::error::HomesimError;
use homesim_domain::id::AccessoryId;

/// Outcome of [`AccessoryHost::register_accessory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The host had no accessory with this id; it was created empty.
    Created,
    /// The host already knew the accessory (e.g. from its cache) and kept
    /// its services.
    Restored,
}

/// Host capabilities used by the platform and its controllers.
///
/// Implementations must not block: every method is called from host
/// read/write handlers or from the sensor reset timer.
pub trait AccessoryHost: Send + Sync {
    /// Ids of every accessory the host currently knows, cached ones included.
    fn accessories(&self) -> Vec<AccessoryId>;

    /// Make sure an accessory with this id exists.
    ///
    /// # Errors
    ///
    /// Returns a host error if the accessory cannot be registered.
    fn register_accessory(
        &self,
        id: AccessoryId,
        name: &str,
    ) -> Result<Registration, HomesimError>;

    /// Remove an accessory and all of its services.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the accessory is unknown.
    fn unregister_accessory(&self, id: AccessoryId) -> Result<(), HomesimError>;

    /// Keys of the services currently attached to an accessory.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the accessory is unknown.
    fn services(&self, id: AccessoryId) -> Result<Vec<ServiceKey>, HomesimError>;

    /// Attach a service with its initial characteristic values.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the accessory is unknown.
    fn add_service(&self, id: AccessoryId, service: ServiceDescriptor) -> Result<(), HomesimError>;

    /// Detach a service.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the accessory or service is unknown.
    fn remove_service(&self, id: AccessoryId, service: &ServiceKey) -> Result<(), HomesimError>;

    /// Push a characteristic value to the host without being asked.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the accessory or service is unknown.
    fn notify_characteristic(
        &self,
        id: AccessoryId,
        service: &ServiceKey,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), HomesimError>;
}

impl<T: AccessoryHost + ?Sized> AccessoryHost for Arc<T> {
    fn accessories(&self) -> Vec<AccessoryId> {
        (**self).accessories()
    }

    fn register_accessory(
        &self,
        id: AccessoryId,
        name: &str,
    ) -> Result<Registration, HomesimError> {
        (**self).register_accessory(id, name)
    }

    fn unregister_accessory(&self, id: AccessoryId) -> Result<(), HomesimError> {
        (**self).unregister_accessory(id)
    }

    fn services(&self, id: AccessoryId) -> Result<Vec<ServiceKey>, HomesimError> {
        (**self).services(id)
    }

    fn add_service(&self, id: AccessoryId, service: ServiceDescriptor) -> Result<(), HomesimError> {
        (**self).add_service(id, service)
    }

    fn remove_service(&self, id: AccessoryId, service: &ServiceKey) -> Result<(), HomesimError> {
        (**self).remove_service(id, service)
    }

    fn notify_characteristic(
        &self,
        id: AccessoryId,
        service: &ServiceKey,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), HomesimError> {
        (**self).notify_characteristic(id, service, characteristic, value)
    }
}
