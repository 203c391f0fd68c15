//! Sensor trigger: pulses the auxiliary sensor's detected characteristic.
//!
//! A pulse sets the characteristic to its event value immediately and resets
//! it after [`SENSOR_RESET_DELAY`]. The pending reset is a tokio task owned by
//! the `Pulsed` state: re-triggering aborts it and schedules a
//! fresh one. Cancelling a pulse (explicitly or by dropping the trigger)
//! aborts the reset and pushes the idle value at once, so the host never
//! keeps a detected state nobody will clear.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use homesim_domain::catalog::ServiceKey;
use homesim_domain::device::SensorKind;
use homesim_domain::id::AccessoryId;

use super::lock;
use crate::ports::AccessoryHost;

/// How long a sensor stays in its event state after a trigger.
pub const SENSOR_RESET_DELAY: Duration = Duration::from_millis(3000);

enum SensorPulse {
    Idle,
    Pulsed {
        generation: u64,
        /// `None` when no runtime was available to schedule the reset.
        reset: Option<JoinHandle<()>>,
    },
}

struct PulseState {
    generation: u64,
    pulse: SensorPulse,
}

pub(crate) struct SensorTrigger<H: AccessoryHost> {
    kind: SensorKind,
    accessory: AccessoryId,
    service: ServiceKey,
    host: H,
    state: Arc<Mutex<PulseState>>,
}

impl<H: AccessoryHost> SensorTrigger<H> {
    pub(crate) fn new(host: H, accessory: AccessoryId, kind: SensorKind) -> Self {
        Self {
            kind,
            accessory,
            service: service_key(kind),
            host,
            state: Arc::new(Mutex::new(PulseState {
                generation: 0,
                pulse: SensorPulse::Idle,
            })),
        }
    }

    pub(crate) fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Whether a pulse is in progress.
    pub(crate) fn is_detected(&self) -> bool {
        matches!(lock(&self.state).pulse, SensorPulse::Pulsed { .. })
    }

    /// End a pulse in progress now instead of after the delay.
    ///
    /// Does nothing when the sensor is idle.
    pub(crate) fn cancel(&self) {
        let mut state = lock(&self.state);
        if let SensorPulse::Pulsed { reset, .. } =
            std::mem::replace(&mut state.pulse, SensorPulse::Idle)
        {
            if let Some(reset) = reset {
                reset.abort();
            }
            tracing::debug!(accessory = %self.accessory, sensor = %self.kind, "sensor pulse cancelled");
            publish(&self.host, self.accessory, &self.service, self.kind, false);
        }
    }
}

impl<H: AccessoryHost + Clone + 'static> SensorTrigger<H> {
    /// Start a pulse, replacing any pulse already in progress.
    pub(crate) fn trigger(&self) {
        let mut state = lock(&self.state);
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;

        if let SensorPulse::Pulsed {
            reset: Some(reset), ..
        } = &state.pulse
        {
            reset.abort();
            tracing::debug!(accessory = %self.accessory, sensor = %self.kind, "pending sensor reset cancelled");
        }

        publish(&self.host, self.accessory, &self.service, self.kind, true);

        let deadline = Instant::now() + SENSOR_RESET_DELAY;
        let reset = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(reset_after(
                self.host.clone(),
                self.accessory,
                self.service.clone(),
                self.kind,
                Arc::clone(&self.state),
                generation,
                deadline,
            ))),
            Err(_) => {
                tracing::warn!(
                    accessory = %self.accessory,
                    sensor = %self.kind,
                    "no async runtime, sensor reset not scheduled"
                );
                None
            }
        };

        state.pulse = SensorPulse::Pulsed { generation, reset };
    }
}

impl<H: AccessoryHost> Drop for SensorTrigger<H> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Sub-service key for a sensor kind; the kind name is the subtype.
pub(crate) fn service_key(kind: SensorKind) -> ServiceKey {
    ServiceKey::with_subtype(kind.service_type(), kind.as_str())
}

async fn reset_after<H: AccessoryHost>(
    host: H,
    accessory: AccessoryId,
    service: ServiceKey,
    kind: SensorKind,
    pulse_state: Arc<Mutex<PulseState>>,
    generation: u64,
    deadline: Instant,
) {
    tokio::time::sleep_until(deadline).await;

    let mut state = lock(&pulse_state);
    // a newer pulse owns the sensor now
    if !matches!(state.pulse, SensorPulse::Pulsed { generation: current, .. } if current == generation)
    {
        return;
    }
    state.pulse = SensorPulse::Idle;
    publish(&host, accessory, &service, kind, false);
}

fn publish<H: AccessoryHost>(
    host: &H,
    accessory: AccessoryId,
    service: &ServiceKey,
    kind: SensorKind,
    detected: bool,
) {
    tracing::debug!(%accessory, sensor = %kind, detected, "sensor pulse");
    if let Err(err) = host.notify_characteristic(
        accessory,
        service,
        kind.detected_characteristic(),
        kind.detected_value(detected),
    ) {
        tracing::warn!(%accessory, sensor = %kind, error = %err, "failed to push sensor state");
    }
}
