//! Device configuration: which kind of accessory to simulate and which
//! auxiliary sensor, if any, it carries.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{CharacteristicType, CharacteristicValue, ServiceType};
use crate::error::{HomesimError, ValidationError};
use crate::id::AccessoryId;

/// The primary behaviour of a simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Switch,
    Dimmer,
    Blind,
}

impl DeviceKind {
    /// The primary service exposed for this kind.
    #[must_use]
    pub fn primary_service(self) -> ServiceType {
        match self {
            Self::Switch => ServiceType::Switch,
            Self::Dimmer => ServiceType::Lightbulb,
            Self::Blind => ServiceType::WindowCovering,
        }
    }

    /// The characteristic a level write is bound to, if the kind has one.
    #[must_use]
    pub fn level_characteristic(self) -> Option<CharacteristicType> {
        match self {
            Self::Switch => None,
            Self::Dimmer => Some(CharacteristicType::Brightness),
            Self::Blind => Some(CharacteristicType::TargetPosition),
        }
    }

    /// Model string reported in the accessory information service.
    #[must_use]
    pub fn model(self) -> &'static str {
        match self {
            Self::Switch => "Virtual Switch",
            Self::Dimmer => "Virtual Dimmer",
            Self::Blind => "Virtual Blind",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Dimmer => "dimmer",
            Self::Blind => "blind",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The auxiliary sensor pulsed when a device is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Motion,
    Contact,
    Occupancy,
    Leak,
}

impl SensorKind {
    /// The sensor service type.
    #[must_use]
    pub fn service_type(self) -> ServiceType {
        match self {
            Self::Motion => ServiceType::MotionSensor,
            Self::Contact => ServiceType::ContactSensor,
            Self::Occupancy => ServiceType::OccupancySensor,
            Self::Leak => ServiceType::LeakSensor,
        }
    }

    /// The characteristic carrying the detected state.
    #[must_use]
    pub fn detected_characteristic(self) -> CharacteristicType {
        match self {
            Self::Motion => CharacteristicType::MotionDetected,
            Self::Contact => CharacteristicType::ContactSensorState,
            Self::Occupancy => CharacteristicType::OccupancyDetected,
            Self::Leak => CharacteristicType::LeakDetected,
        }
    }

    /// Encode the detected state the way the characteristic expects it.
    ///
    /// Motion is a plain boolean. The other three are HAP integer enums where
    /// `1` is the event state: contact not detected (open), occupancy
    /// detected, leak detected.
    #[must_use]
    pub fn detected_value(self, detected: bool) -> CharacteristicValue {
        match self {
            Self::Motion => CharacteristicValue::Bool(detected),
            Self::Contact | Self::Occupancy | Self::Leak => {
                CharacteristicValue::Int(i64::from(detected))
            }
        }
    }

    /// Subtype used for the sensor sub-service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Contact => "contact",
            Self::Occupancy => "occupancy",
            Self::Leak => "leak",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of one simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Unique name; the accessory identity is derived from it.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<SensorKind>,
}

impl DeviceConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sensor: None,
        }
    }

    #[must_use]
    pub fn with_sensor(mut self, sensor: SensorKind) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Identity of the accessory simulating this device.
    #[must_use]
    pub fn accessory_id(&self) -> AccessoryId {
        AccessoryId::from_name(&self.name)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Validation`] when `name` is empty or blank.
    pub fn validate(&self) -> Result<(), HomesimError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Check every device and that no name is used twice.
///
/// # Errors
///
/// Returns [`HomesimError::Validation`] for the first blank or repeated name.
pub fn validate_devices(devices: &[DeviceConfig]) -> Result<(), HomesimError> {
    let mut names = HashSet::with_capacity(devices.len());
    for device in devices {
        device.validate()?;
        if !names.insert(device.name.as_str()) {
            return Err(ValidationError::DuplicateName(device.name.clone()).into());
        }
    }
    Ok(())
}
