//! Typed accessory identifier backed by a UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Namespace for name-derived accessory identifiers.
const ACCESSORY_NAMESPACE: uuid::Uuid = uuid::Uuid::from_u128(0x6b1f_4c2e_9a43_4d7e_8f0a_3c5d_2e71_b9a4);

/// Unique identifier for a simulated accessory.
///
/// Identifiers derived with [`from_name`](Self::from_name) are stable: the
/// same configured device name always yields the same id, which is how a
/// restarted process finds the accessory the host cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessoryId(uuid::Uuid);

impl Default for AccessoryId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AccessoryId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the identifier for a configured device name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(uuid::Uuid::new_v5(&ACCESSORY_NAMESPACE, name.as_bytes()))
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AccessoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}
