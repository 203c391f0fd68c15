//! Service catalog: the HomeKit service and characteristic types a
//! simulated accessory can expose, and the values they carry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A bundle of characteristics representing one accessory capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceType {
    AccessoryInformation,
    Switch,
    Lightbulb,
    WindowCovering,
    MotionSensor,
    ContactSensor,
    OccupancySensor,
    LeakSensor,
}

impl ServiceType {
    /// Characteristics bound on this service.
    #[must_use]
    pub fn characteristics(self) -> &'static [CharacteristicType] {
        use CharacteristicType as C;
        match self {
            Self::AccessoryInformation => &[C::Manufacturer, C::Model, C::SerialNumber, C::Name],
            Self::Switch => &[C::On],
            Self::Lightbulb => &[C::On, C::Brightness],
            Self::WindowCovering => &[
                C::On,
                C::CurrentPosition,
                C::TargetPosition,
                C::PositionState,
            ],
            Self::MotionSensor => &[C::MotionDetected],
            Self::ContactSensor => &[C::ContactSensorState],
            Self::OccupancySensor => &[C::OccupancyDetected],
            Self::LeakSensor => &[C::LeakDetected],
        }
    }

    /// Whether `characteristic` is bound on this service.
    #[must_use]
    pub fn has_characteristic(self, characteristic: CharacteristicType) -> bool {
        self.characteristics().contains(&characteristic)
    }

    /// Whether this is one of the primary device services.
    #[must_use]
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Switch | Self::Lightbulb | Self::WindowCovering)
    }

    /// Whether this is an auxiliary sensor service.
    #[must_use]
    pub fn is_sensor(self) -> bool {
        matches!(
            self,
            Self::MotionSensor | Self::ContactSensor | Self::OccupancySensor | Self::LeakSensor
        )
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single named, typed property of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacteristicType {
    Manufacturer,
    Model,
    SerialNumber,
    Name,
    On,
    Brightness,
    CurrentPosition,
    TargetPosition,
    PositionState,
    MotionDetected,
    ContactSensorState,
    OccupancyDetected,
    LeakDetected,
}

impl fmt::Display for CharacteristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// `PositionState` value reported by a blind that is not moving.
pub const POSITION_STATE_STOPPED: i64 = 2;

/// A characteristic value as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl CharacteristicValue {
    /// Interpret as a boolean. Integers are accepted, non-zero meaning `true`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Int(value) => Some(*value != 0),
            Self::String(_) => None,
        }
    }

    /// Interpret as an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(_) | Self::String(_) => None,
        }
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CharacteristicValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for CharacteristicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::String(value) => f.write_str(value),
        }
    }
}

/// Identifies one service on an accessory.
///
/// Sensor sub-services carry a subtype so that several services of the same
/// type could coexist; primary and information services have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceKey {
    pub service_type: ServiceType,
    pub subtype: Option<String>,
}

impl ServiceKey {
    /// Key for a service without subtype.
    #[must_use]
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            service_type,
            subtype: None,
        }
    }

    /// Key for a service with a subtype.
    #[must_use]
    pub fn with_subtype(service_type: ServiceType, subtype: impl Into<String>) -> Self {
        Self {
            service_type,
            subtype: Some(subtype.into()),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtype {
            Some(subtype) => write!(f, "{}:{subtype}", self.service_type),
            None => fmt::Display::fmt(&self.service_type, f),
        }
    }
}

/// A service to be attached to an accessory, with its initial values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub key: ServiceKey,
    pub display_name: String,
    pub values: BTreeMap<CharacteristicType, CharacteristicValue>,
}

impl ServiceDescriptor {
    /// Create a builder for constructing a [`ServiceDescriptor`].
    #[must_use]
    pub fn builder(service_type: ServiceType) -> ServiceDescriptorBuilder {
        ServiceDescriptorBuilder {
            key: ServiceKey::new(service_type),
            display_name: None,
            values: BTreeMap::new(),
        }
    }
}

/// Step-by-step builder for [`ServiceDescriptor`].
#[derive(Debug)]
pub struct ServiceDescriptorBuilder {
    key: ServiceKey,
    display_name: Option<String>,
    values: BTreeMap<CharacteristicType, CharacteristicValue>,
}

impl ServiceDescriptorBuilder {
    #[must_use]
    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.key.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the initial value of a characteristic.
    ///
    /// Characteristics not bound on the service type are ignored.
    #[must_use]
    pub fn value(
        mut self,
        characteristic: CharacteristicType,
        value: impl Into<CharacteristicValue>,
    ) -> Self {
        if self.key.service_type.has_characteristic(characteristic) {
            self.values.insert(characteristic, value.into());
        }
        self
    }

    /// Consume the builder and return the descriptor.
    ///
    /// The display name defaults to the service type name.
    #[must_use]
    pub fn build(self) -> ServiceDescriptor {
        let display_name = self
            .display_name
            .unwrap_or_else(|| self.key.service_type.to_string());
        ServiceDescriptor {
            key: self.key,
            display_name,
            values: self.values,
        }
    }
}
