//! In-crate fake [`AccessoryHost`] for controller and platform tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use homesim_domain::catalog::{
    CharacteristicType, CharacteristicValue, ServiceDescriptor, ServiceKey,
};
use homesim_domain::error::{HomesimError, NotFoundError};
use homesim_domain::id::AccessoryId;

use crate::ports::{AccessoryHost, Registration};

pub(crate) type Notification = (AccessoryId, ServiceKey, CharacteristicType, CharacteristicValue);

#[derive(Default)]
pub(crate) struct FakeHost {
    accessories: Mutex<BTreeMap<AccessoryId, Vec<ServiceDescriptor>>>,
    notifications: Mutex<Vec<Notification>>,
    rejected: Mutex<BTreeSet<AccessoryId>>,
}

impl FakeHost {
    pub(crate) fn service_keys(&self, id: AccessoryId) -> Vec<ServiceKey> {
        self.accessories.lock().unwrap()[&id]
            .iter()
            .map(|s| s.key.clone())
            .collect()
    }

    pub(crate) fn sensor_keys(&self, id: AccessoryId) -> Vec<ServiceKey> {
        self.service_keys(id)
            .into_iter()
            .filter(|key| key.service_type.is_sensor())
            .collect()
    }

    pub(crate) fn notified_values(&self) -> Vec<CharacteristicValue> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, _, value)| value.clone())
            .collect()
    }

    /// Values pushed to one service, in order.
    pub(crate) fn values_on(&self, service: &ServiceKey) -> Vec<CharacteristicValue> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, key, _, _)| key == service)
            .map(|(_, _, _, value)| value.clone())
            .collect()
    }

    /// Make `add_service` fail for this accessory.
    pub(crate) fn reject_services_for(&self, id: AccessoryId) {
        self.rejected.lock().unwrap().insert(id);
    }

    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

fn not_found(entity: &'static str, id: impl ToString) -> HomesimError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

impl AccessoryHost for FakeHost {
    fn accessories(&self) -> Vec<AccessoryId> {
        self.accessories.lock().unwrap().keys().copied().collect()
    }

    fn register_accessory(
        &self,
        id: AccessoryId,
        _name: &str,
    ) -> Result<Registration, HomesimError> {
        let mut accessories = self.accessories.lock().unwrap();
        if accessories.contains_key(&id) {
            return Ok(Registration::Restored);
        }
        accessories.insert(id, Vec::new());
        Ok(Registration::Created)
    }

    fn unregister_accessory(&self, id: AccessoryId) -> Result<(), HomesimError> {
        self.accessories
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Accessory", id))
    }

    fn services(&self, id: AccessoryId) -> Result<Vec<ServiceKey>, HomesimError> {
        self.accessories
            .lock()
            .unwrap()
            .get(&id)
            .map(|services| services.iter().map(|s| s.key.clone()).collect())
            .ok_or_else(|| not_found("Accessory", id))
    }

    fn add_service(&self, id: AccessoryId, service: ServiceDescriptor) -> Result<(), HomesimError> {
        if self.rejected.lock().unwrap().contains(&id) {
            return Err(not_found("Service", &service.key));
        }
        self.accessories
            .lock()
            .unwrap()
            .get_mut(&id)
            .ok_or_else(|| not_found("Accessory", id))?
            .push(service);
        Ok(())
    }

    fn remove_service(&self, id: AccessoryId, service: &ServiceKey) -> Result<(), HomesimError> {
        let mut accessories = self.accessories.lock().unwrap();
        let services = accessories
            .get_mut(&id)
            .ok_or_else(|| not_found("Accessory", id))?;
        let before = services.len();
        services.retain(|s| &s.key != service);
        if services.len() == before {
            return Err(not_found("Service", service));
        }
        Ok(())
    }

    fn notify_characteristic(
        &self,
        id: AccessoryId,
        service: &ServiceKey,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), HomesimError> {
        self.notifications
            .lock()
            .unwrap()
            .push((id, service.clone(), characteristic, value));
        Ok(())
    }
}
