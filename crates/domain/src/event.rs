//! Event: a characteristic change pushed to the host without being asked.

use serde::{Deserialize, Serialize};

use crate::catalog::{CharacteristicType, CharacteristicValue, ServiceKey};
use crate::id::AccessoryId;
use crate::time::{Timestamp, now};

/// A characteristic on one of an accessory's services took a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicChanged {
    pub accessory: AccessoryId,
    pub service: ServiceKey,
    pub characteristic: CharacteristicType,
    pub value: CharacteristicValue,
    pub timestamp: Timestamp,
}

impl CharacteristicChanged {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        accessory: AccessoryId,
        service: ServiceKey,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Self {
        Self {
            accessory,
            service,
            characteristic,
            value,
            timestamp: now(),
        }
    }
}
