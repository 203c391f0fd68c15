//! Accessory state: the value record a controller owns for one device.

use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;

/// Current state of a simulated device.
///
/// All fields are always present. Which of them the host sees is decided by
/// the [`DeviceKind`]: `brightness` for dimmers, the two positions for blinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryState {
    pub on: bool,
    pub brightness: i64,
    pub current_position: i64,
    pub target_position: i64,
}

impl AccessoryState {
    /// Apply a level write for the given kind.
    ///
    /// Dimmers store the brightness. Blinds jump straight to the target, so
    /// current and target position move together. Switches have no level.
    /// Values are stored as given, without clamping.
    pub fn apply_level(&mut self, kind: DeviceKind, value: i64) {
        match kind {
            DeviceKind::Switch => {}
            DeviceKind::Dimmer => self.brightness = value,
            DeviceKind::Blind => {
                self.current_position = value;
                self.target_position = value;
            }
        }
    }

    /// The level reported for the given kind.
    #[must_use]
    pub fn level(&self, kind: DeviceKind) -> i64 {
        match kind {
            DeviceKind::Switch => 0,
            DeviceKind::Dimmer => self.brightness,
            DeviceKind::Blind => self.current_position,
        }
    }
}
