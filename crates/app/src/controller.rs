//! Accessory controller: the state machine behind one simulated device.
//!
//! A controller owns the device's [`AccessoryState`] and, when a sensor is
//! configured, the sensor trigger. It answers the host's reads and writes
//! and pulses the sensor whenever the device is switched off.
//!
//! | Device | Primary service | Level bound to |
//! |--------|-----------------|----------------|
//! | `switch` | `Switch` (`On`) | none |
//! | `dimmer` | `Lightbulb` (`On`, `Brightness`) | `Brightness` |
//! | `blind` | `WindowCovering` (`On`, positions) | `TargetPosition` |

mod sensor;

pub use sensor::SENSOR_RESET_DELAY;

use std::sync::{Mutex, MutexGuard, PoisonError};

use homesim_domain::accessory::AccessoryState;
use homesim_domain::catalog::{
    CharacteristicType, CharacteristicValue, POSITION_STATE_STOPPED, ServiceDescriptor,
    ServiceKey, ServiceType,
};
use homesim_domain::device::{DeviceConfig, DeviceKind, SensorKind};
use homesim_domain::error::{HomesimError, UnsupportedCharacteristicError, ValidationError};
use homesim_domain::id::AccessoryId;

use crate::ports::AccessoryHost;
use sensor::SensorTrigger;

/// Manufacturer reported by every simulated accessory.
pub const MANUFACTURER: &str = "homesim";

/// Controller of one simulated accessory.
pub struct AccessoryController<H: AccessoryHost> {
    id: AccessoryId,
    host: H,
    config: DeviceConfig,
    state: Mutex<AccessoryState>,
    sensor: Option<SensorTrigger<H>>,
}

impl<H: AccessoryHost + Clone + 'static> AccessoryController<H> {
    /// Build the controller and bring the accessory's services in line with
    /// `config`.
    ///
    /// Services left over from an earlier configuration are removed first: a
    /// sensor sub-service whose kind differs from the configured one (or any
    /// sensor when none is configured) and a primary service of another
    /// device type. Missing services are then added, so the accessory ends up
    /// with one information service, one primary service and at most one
    /// sensor sub-service.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::NotFound`] if the host does not know the
    /// accessory, or any error the host reports while editing services.
    pub fn configure(host: H, id: AccessoryId, config: DeviceConfig) -> Result<Self, HomesimError> {
        let primary = ServiceKey::new(config.kind.primary_service());
        let sensor_key = config.sensor.map(sensor::service_key);

        let mut kept = Vec::new();
        for key in host.services(id)? {
            let stale = (key.service_type.is_sensor() && Some(&key) != sensor_key.as_ref())
                || (key.service_type.is_primary() && key != primary);
            if stale {
                tracing::info!(accessory = %id, service = %key, "removing stale service");
                host.remove_service(id, &key)?;
            } else {
                kept.push(key);
            }
        }

        for descriptor in service_descriptors(&config) {
            if kept.contains(&descriptor.key) {
                continue;
            }
            tracing::debug!(accessory = %id, service = %descriptor.key, "adding service");
            host.add_service(id, descriptor)?;
        }

        tracing::info!(
            accessory = %id,
            name = %config.name,
            kind = %config.kind,
            sensor = config.sensor.map(SensorKind::as_str),
            "accessory configured"
        );

        let sensor = config
            .sensor
            .map(|kind| SensorTrigger::new(host.clone(), id, kind));
        Ok(Self {
            id,
            host,
            config,
            state: Mutex::new(AccessoryState::default()),
            sensor,
        })
    }

    /// Set the on/off state. Switching off pulses the sensor.
    ///
    /// The pulse's reset runs in the background; this call returns as soon
    /// as the state is stored and the pulse has started.
    pub fn write_on_off(&self, value: bool) {
        lock(&self.state).on = value;
        tracing::info!(accessory = %self.id, on = value, "set on/off");
        if !value {
            self.trigger_sensor();
        }
    }

    /// Pulse the sensor: detected now, reset after [`SENSOR_RESET_DELAY`].
    ///
    /// Without a configured sensor this does nothing.
    pub fn trigger_sensor(&self) {
        match &self.sensor {
            Some(sensor) => sensor.trigger(),
            None => tracing::debug!(accessory = %self.id, "no sensor configured"),
        }
    }

    /// End a sensor pulse in progress, pushing the idle value right away.
    pub fn cancel_sensor(&self) {
        if let Some(sensor) = &self.sensor {
            sensor.cancel();
        }
    }

    /// Dispatch a host write to the operation bound to the characteristic.
    ///
    /// `On` accepts booleans and integers (non-zero is on). The level
    /// characteristic (`Brightness` or `TargetPosition`) accepts integers.
    /// Once stored, the written characteristics are pushed back to the host
    /// so its values follow the state; a blind pushes both positions.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Unsupported`] if the pair is not writable on
    /// this accessory, [`HomesimError::Validation`] if the value has the
    /// wrong type, or the host's error if pushing the new values fails.
    pub fn set(
        &self,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: &CharacteristicValue,
    ) -> Result<(), HomesimError> {
        if service != self.config.kind.primary_service() {
            return Err(unsupported(service, characteristic));
        }
        if characteristic == CharacteristicType::On {
            let on = value.as_bool().ok_or(ValidationError::ValueType {
                characteristic,
                expected: "a boolean",
            })?;
            self.write_on_off(on);
            return self.push_primary(&[CharacteristicType::On]);
        }
        if self.config.kind.level_characteristic() == Some(characteristic) {
            let level = value.as_int().ok_or(ValidationError::ValueType {
                characteristic,
                expected: "an integer",
            })?;
            self.write_level(level);
            return match self.config.kind {
                DeviceKind::Blind => self.push_primary(&[
                    CharacteristicType::CurrentPosition,
                    CharacteristicType::TargetPosition,
                ]),
                _ => self.push_primary(&[characteristic]),
            };
        }
        Err(unsupported(service, characteristic))
    }
}

impl<H: AccessoryHost> AccessoryController<H> {
    #[must_use]
    pub fn id(&self) -> AccessoryId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AccessoryState {
        *lock(&self.state)
    }

    /// Current on/off state.
    #[must_use]
    pub fn read_on_off(&self) -> bool {
        let on = lock(&self.state).on;
        tracing::debug!(accessory = %self.id, on, "read on/off");
        on
    }

    /// Store a level: brightness for a dimmer, position for a blind.
    ///
    /// A blind reports the movement as already finished, so current and
    /// target position both take the value. Values are not clamped. Switches
    /// have no level and ignore the write.
    pub fn write_level(&self, value: i64) {
        let kind = self.config.kind;
        if kind == DeviceKind::Switch {
            tracing::debug!(accessory = %self.id, level = value, "switch has no level, ignored");
            return;
        }
        lock(&self.state).apply_level(kind, value);
        tracing::info!(accessory = %self.id, level = value, "set level");
    }

    /// Current level: brightness for a dimmer, position for a blind, `0` for a switch.
    #[must_use]
    pub fn read_level(&self) -> i64 {
        let level = lock(&self.state).level(self.config.kind);
        tracing::debug!(accessory = %self.id, level, "read level");
        level
    }

    /// Whether the sensor is mid-pulse, or `None` without a sensor.
    #[must_use]
    pub fn sensor_detected(&self) -> Option<bool> {
        self.sensor.as_ref().map(SensorTrigger::is_detected)
    }

    /// Answer a host read of a characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`HomesimError::Unsupported`] if the accessory does not expose
    /// the pair.
    pub fn get(
        &self,
        service: ServiceType,
        characteristic: CharacteristicType,
    ) -> Result<CharacteristicValue, HomesimError> {
        if !service.has_characteristic(characteristic) {
            return Err(unsupported(service, characteristic));
        }

        if service == ServiceType::AccessoryInformation {
            return Ok(match characteristic {
                CharacteristicType::Manufacturer => MANUFACTURER.into(),
                CharacteristicType::Model => self.config.kind.model().into(),
                _ => self.config.name.as_str().into(),
            });
        }

        if service == self.config.kind.primary_service() {
            let state = self.state();
            return Ok(match characteristic {
                CharacteristicType::On => self.read_on_off().into(),
                CharacteristicType::Brightness => state.brightness.into(),
                CharacteristicType::CurrentPosition => state.current_position.into(),
                CharacteristicType::TargetPosition => state.target_position.into(),
                CharacteristicType::PositionState => POSITION_STATE_STOPPED.into(),
                _ => return Err(unsupported(service, characteristic)),
            });
        }

        match &self.sensor {
            Some(sensor) if sensor.kind().service_type() == service => {
                Ok(sensor.kind().detected_value(sensor.is_detected()))
            }
            _ => Err(unsupported(service, characteristic)),
        }
    }

    fn push_primary(&self, characteristics: &[CharacteristicType]) -> Result<(), HomesimError> {
        let service_type = self.config.kind.primary_service();
        let service = ServiceKey::new(service_type);
        for &characteristic in characteristics {
            let value = self.get(service_type, characteristic)?;
            self.host
                .notify_characteristic(self.id, &service, characteristic, value)?;
        }
        Ok(())
    }
}

/// Services an accessory carries for `config`, with their initial values.
fn service_descriptors(config: &DeviceConfig) -> Vec<ServiceDescriptor> {
    let name = config.name.as_str();
    let mut services = vec![
        ServiceDescriptor::builder(ServiceType::AccessoryInformation)
            .display_name(name)
            .value(CharacteristicType::Manufacturer, MANUFACTURER)
            .value(CharacteristicType::Model, config.kind.model())
            .value(CharacteristicType::SerialNumber, name)
            .value(CharacteristicType::Name, name)
            .build(),
    ];

    let defaults = AccessoryState::default();
    services.push(
        ServiceDescriptor::builder(config.kind.primary_service())
            .display_name(name)
            .value(CharacteristicType::On, defaults.on)
            .value(CharacteristicType::Brightness, defaults.brightness)
            .value(CharacteristicType::CurrentPosition, defaults.current_position)
            .value(CharacteristicType::TargetPosition, defaults.target_position)
            .value(CharacteristicType::PositionState, POSITION_STATE_STOPPED)
            .build(),
    );

    if let Some(kind) = config.sensor {
        services.push(
            ServiceDescriptor::builder(kind.service_type())
                .subtype(kind.as_str())
                .display_name(format!("{name} {kind}"))
                .value(kind.detected_characteristic(), kind.detected_value(false))
                .build(),
        );
    }

    services
}

fn unsupported(service: ServiceType, characteristic: CharacteristicType) -> HomesimError {
    UnsupportedCharacteristicError {
        service,
        characteristic,
    }
    .into()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::testing::FakeHost;

    fn configured(config: DeviceConfig) -> (Arc<FakeHost>, AccessoryController<Arc<FakeHost>>) {
        let host = Arc::new(FakeHost::default());
        let id = config.accessory_id();
        host.register_accessory(id, &config.name).unwrap();
        let controller = AccessoryController::configure(Arc::clone(&host), id, config).unwrap();
        (host, controller)
    }

    /// Advance the paused clock and let woken tasks run.
    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn should_start_with_default_state_for_every_kind() {
        for kind in [DeviceKind::Switch, DeviceKind::Dimmer, DeviceKind::Blind] {
            let (_, controller) = configured(DeviceConfig::new("Device", kind));
            assert_eq!(controller.state(), AccessoryState::default());
            assert!(!controller.read_on_off());
        }
    }

    #[test]
    fn should_read_back_written_on_off() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        controller.write_on_off(true);
        assert!(controller.read_on_off());
        controller.write_on_off(false);
        assert!(!controller.read_on_off());
    }

    #[test]
    fn should_set_brightness_and_leave_positions_for_dimmer() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Dimmer));
        controller.write_level(42);
        let state = controller.state();
        assert_eq!(state.brightness, 42);
        assert_eq!(state.current_position, 0);
        assert_eq!(state.target_position, 0);
        assert_eq!(controller.read_level(), 42);
    }

    #[test]
    fn should_move_blind_immediately_to_target() {
        let (_, controller) = configured(DeviceConfig::new("Blind", DeviceKind::Blind));
        controller.write_level(77);
        let state = controller.state();
        assert_eq!(state.current_position, 77);
        assert_eq!(state.target_position, 77);
        assert_eq!(state.brightness, 0);
    }

    #[test]
    fn should_ignore_level_for_switch() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        controller.write_level(30);
        assert_eq!(controller.state(), AccessoryState::default());
    }

    #[test]
    fn should_add_information_primary_and_sensor_services() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Dimmer).with_sensor(SensorKind::Motion),
        );
        assert_eq!(
            host.service_keys(controller.id()),
            vec![
                ServiceKey::new(ServiceType::AccessoryInformation),
                ServiceKey::new(ServiceType::Lightbulb),
                ServiceKey::with_subtype(ServiceType::MotionSensor, "motion"),
            ]
        );
    }

    #[test]
    fn should_not_add_sensor_service_without_sensor() {
        let (host, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        assert!(host.sensor_keys(controller.id()).is_empty());
        assert_eq!(controller.sensor_detected(), None);
    }

    #[test]
    fn should_replace_sensor_when_kind_changes() {
        let (host, first) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Motion),
        );
        let id = first.id();
        drop(first);

        let config = DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Contact);
        let _second = AccessoryController::configure(Arc::clone(&host), id, config).unwrap();

        assert_eq!(
            host.sensor_keys(id),
            vec![ServiceKey::with_subtype(ServiceType::ContactSensor, "contact")]
        );
    }

    #[test]
    fn should_remove_sensor_when_no_longer_configured() {
        let (host, first) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Leak),
        );
        let id = first.id();
        drop(first);

        let _second = AccessoryController::configure(
            Arc::clone(&host),
            id,
            DeviceConfig::new("Hall", DeviceKind::Switch),
        )
        .unwrap();

        assert!(host.sensor_keys(id).is_empty());
    }

    #[test]
    fn should_keep_existing_services_on_identical_reconfigure() {
        let config = DeviceConfig::new("Hall", DeviceKind::Blind).with_sensor(SensorKind::Occupancy);
        let (host, first) = configured(config.clone());
        let id = first.id();
        let before = host.service_keys(id);
        drop(first);

        let _second = AccessoryController::configure(Arc::clone(&host), id, config).unwrap();

        assert_eq!(host.service_keys(id), before);
    }

    #[test]
    fn should_swap_primary_service_when_kind_changes() {
        let (host, first) = configured(DeviceConfig::new("Hall", DeviceKind::Switch));
        let id = first.id();
        drop(first);

        let _second = AccessoryController::configure(
            Arc::clone(&host),
            id,
            DeviceConfig::new("Hall", DeviceKind::Blind),
        )
        .unwrap();

        let keys = host.service_keys(id);
        assert!(keys.contains(&ServiceKey::new(ServiceType::WindowCovering)));
        assert!(!keys.contains(&ServiceKey::new(ServiceType::Switch)));
    }

    #[test]
    fn should_fail_when_host_does_not_know_accessory() {
        let host = Arc::new(FakeHost::default());
        let result = AccessoryController::configure(
            host,
            AccessoryId::new(),
            DeviceConfig::new("Ghost", DeviceKind::Switch),
        );
        assert!(matches!(result, Err(HomesimError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn should_pulse_motion_sensor_when_switched_off() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Motion),
        );

        controller.write_on_off(false);
        assert_eq!(host.notified_values(), vec![CharacteristicValue::Bool(true)]);
        assert_eq!(controller.sensor_detected(), Some(true));

        advance(SENSOR_RESET_DELAY - Duration::from_millis(1)).await;
        assert_eq!(host.notified_values(), vec![CharacteristicValue::Bool(true)]);
        assert_eq!(controller.sensor_detected(), Some(true));

        advance(Duration::from_millis(1)).await;
        assert_eq!(
            host.notified_values(),
            vec![CharacteristicValue::Bool(true), CharacteristicValue::Bool(false)]
        );
        assert_eq!(controller.sensor_detected(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn should_notify_on_sensor_sub_service() {
        let (host, controller) = configured(
            DeviceConfig::new("Cellar", DeviceKind::Switch).with_sensor(SensorKind::Leak),
        );

        controller.write_on_off(false);

        let (id, service, characteristic, value) = host.notifications().remove(0);
        assert_eq!(id, controller.id());
        assert_eq!(service, ServiceKey::with_subtype(ServiceType::LeakSensor, "leak"));
        assert_eq!(characteristic, CharacteristicType::LeakDetected);
        assert_eq!(value, CharacteristicValue::Int(1));
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_pulse_sensor_when_switched_on() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Dimmer).with_sensor(SensorKind::Motion),
        );

        controller.write_on_off(true);
        advance(SENSOR_RESET_DELAY).await;

        assert!(host.notified_values().is_empty());
        assert_eq!(controller.sensor_detected(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn should_reschedule_reset_when_retriggered() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Contact),
        );

        controller.trigger_sensor();
        advance(Duration::from_millis(1000)).await;
        controller.trigger_sensor();

        // the first reset would have fired here
        advance(Duration::from_millis(2000)).await;
        assert_eq!(controller.sensor_detected(), Some(true));
        assert_eq!(
            host.notified_values(),
            vec![CharacteristicValue::Int(1), CharacteristicValue::Int(1)]
        );

        advance(Duration::from_millis(1000)).await;
        assert_eq!(controller.sensor_detected(), Some(false));
        assert_eq!(
            host.notified_values(),
            vec![
                CharacteristicValue::Int(1),
                CharacteristicValue::Int(1),
                CharacteristicValue::Int(0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_push_idle_value_when_dropped_mid_pulse() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Motion),
        );

        controller.trigger_sensor();
        drop(controller);
        advance(SENSOR_RESET_DELAY * 2).await;

        assert_eq!(
            host.notified_values(),
            vec![CharacteristicValue::Bool(true), CharacteristicValue::Bool(false)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_push_anything_when_dropped_idle() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Motion),
        );

        controller.trigger_sensor();
        advance(SENSOR_RESET_DELAY).await;
        drop(controller);

        assert_eq!(
            host.notified_values(),
            vec![CharacteristicValue::Bool(true), CharacteristicValue::Bool(false)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_end_pulse_early_when_cancelled() {
        let (host, controller) = configured(
            DeviceConfig::new("Cellar", DeviceKind::Switch).with_sensor(SensorKind::Leak),
        );

        controller.trigger_sensor();
        controller.cancel_sensor();
        assert_eq!(controller.sensor_detected(), Some(false));

        advance(SENSOR_RESET_DELAY * 2).await;
        assert_eq!(
            host.notified_values(),
            vec![CharacteristicValue::Int(1), CharacteristicValue::Int(0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_trigger_without_sensor() {
        let (host, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        controller.trigger_sensor();
        controller.write_on_off(false);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn should_set_sensor_without_runtime() {
        let (host, controller) = configured(
            DeviceConfig::new("Hall", DeviceKind::Switch).with_sensor(SensorKind::Motion),
        );
        controller.write_on_off(false);
        assert_eq!(controller.sensor_detected(), Some(true));
        assert_eq!(host.notified_values(), vec![CharacteristicValue::Bool(true)]);
    }

    #[test]
    fn should_dispatch_on_write_to_on_off() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        controller
            .set(ServiceType::Switch, CharacteristicType::On, &CharacteristicValue::Int(1))
            .unwrap();
        assert!(controller.read_on_off());
        assert_eq!(
            controller.get(ServiceType::Switch, CharacteristicType::On).unwrap(),
            CharacteristicValue::Bool(true)
        );
    }

    #[test]
    fn should_dispatch_target_position_write_to_level() {
        let (_, controller) = configured(DeviceConfig::new("Blind", DeviceKind::Blind));
        controller
            .set(
                ServiceType::WindowCovering,
                CharacteristicType::TargetPosition,
                &CharacteristicValue::Int(55),
            )
            .unwrap();
        assert_eq!(
            controller
                .get(ServiceType::WindowCovering, CharacteristicType::CurrentPosition)
                .unwrap(),
            CharacteristicValue::Int(55)
        );
        assert_eq!(
            controller
                .get(ServiceType::WindowCovering, CharacteristicType::PositionState)
                .unwrap(),
            CharacteristicValue::Int(POSITION_STATE_STOPPED)
        );
    }

    #[test]
    fn should_push_written_brightness_to_host() {
        let (host, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Dimmer));
        controller
            .set(
                ServiceType::Lightbulb,
                CharacteristicType::Brightness,
                &CharacteristicValue::Int(42),
            )
            .unwrap();
        assert_eq!(
            host.notifications(),
            vec![(
                controller.id(),
                ServiceKey::new(ServiceType::Lightbulb),
                CharacteristicType::Brightness,
                CharacteristicValue::Int(42),
            )]
        );
    }

    #[test]
    fn should_push_both_positions_when_blind_is_written() {
        let (host, controller) = configured(DeviceConfig::new("Blind", DeviceKind::Blind));
        controller
            .set(
                ServiceType::WindowCovering,
                CharacteristicType::TargetPosition,
                &CharacteristicValue::Int(20),
            )
            .unwrap();
        let pushed: Vec<_> = host
            .notifications()
            .into_iter()
            .map(|(_, _, characteristic, value)| (characteristic, value))
            .collect();
        assert_eq!(
            pushed,
            vec![
                (CharacteristicType::CurrentPosition, CharacteristicValue::Int(20)),
                (CharacteristicType::TargetPosition, CharacteristicValue::Int(20)),
            ]
        );
    }

    #[test]
    fn should_not_push_rejected_write() {
        let (host, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        let result = controller.set(
            ServiceType::Switch,
            CharacteristicType::On,
            &CharacteristicValue::from("yes"),
        );
        assert!(result.is_err());
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn should_reject_write_to_read_only_characteristic() {
        let (_, controller) = configured(DeviceConfig::new("Blind", DeviceKind::Blind));
        let result = controller.set(
            ServiceType::WindowCovering,
            CharacteristicType::CurrentPosition,
            &CharacteristicValue::Int(10),
        );
        assert!(matches!(result, Err(HomesimError::Unsupported(_))));
    }

    #[test]
    fn should_reject_characteristic_of_other_kind() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Switch));
        let result = controller.get(ServiceType::Lightbulb, CharacteristicType::Brightness);
        assert!(matches!(result, Err(HomesimError::Unsupported(_))));
    }

    #[test]
    fn should_reject_wrong_value_type() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Dimmer));
        let result = controller.set(
            ServiceType::Lightbulb,
            CharacteristicType::Brightness,
            &CharacteristicValue::Bool(true),
        );
        assert!(matches!(
            result,
            Err(HomesimError::Validation(ValidationError::ValueType { .. }))
        ));
    }

    #[test]
    fn should_answer_information_reads() {
        let (_, controller) = configured(DeviceConfig::new("Lamp", DeviceKind::Dimmer));
        assert_eq!(
            controller
                .get(ServiceType::AccessoryInformation, CharacteristicType::Manufacturer)
                .unwrap(),
            CharacteristicValue::from(MANUFACTURER)
        );
        assert_eq!(
            controller
                .get(ServiceType::AccessoryInformation, CharacteristicType::SerialNumber)
                .unwrap(),
            CharacteristicValue::from("Lamp")
        );
    }

    #[test]
    fn should_answer_sensor_read_from_pulse_state() {
        let (_, controller) = configured(
            DeviceConfig::new("Room", DeviceKind::Switch).with_sensor(SensorKind::Occupancy),
        );
        assert_eq!(
            controller
                .get(ServiceType::OccupancySensor, CharacteristicType::OccupancyDetected)
                .unwrap(),
            CharacteristicValue::Int(0)
        );
    }
}
