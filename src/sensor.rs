//! Periodic temperature forwarding

use core::fmt::Write;

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::{
    error::TransportError,
    transport::{ControlSurface, Register},
};

/// Identifier of one probe on the sensor bus (e.g. a 1-Wire ROM code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(pub u64);

pub trait TemperatureSensor {
    fn probes(&self) -> &[ProbeId];

    /// Begin a conversion on `probe`; the result is ready after the conversion delay
    fn start_conversion(&mut self, probe: ProbeId) -> Result<(), TransportError>;

    fn read_celsius(&mut self, probe: ProbeId) -> Result<f32, TransportError>;
}

/// Sensor bus with no probes attached
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl TemperatureSensor for NoSensor {
    fn probes(&self) -> &[ProbeId] {
        &[]
    }

    fn start_conversion(&mut self, probe: ProbeId) -> Result<(), TransportError> {
        Err(TransportError::Sensor(probe))
    }

    fn read_celsius(&mut self, probe: ProbeId) -> Result<f32, TransportError> {
        Err(TransportError::Sensor(probe))
    }
}

#[derive(Debug, Clone, Copy)]
enum SensorState {
    Idle { next_cycle: Instant },
    Converting { probe: usize, ready_at: Instant },
}

/// Walks the probes one at a time: start a conversion, wait, read, notify.
/// A new cycle starts one period after the previous one finished.
pub struct SensorPoller<S: TemperatureSensor> {
    sensor: S,
    period: Duration,
    conversion_delay: Duration,
    state: SensorState,
}

impl<S: TemperatureSensor> SensorPoller<S> {
    pub fn new(sensor: S, period: Duration, conversion_delay: Duration) -> Self {
        Self {
            sensor,
            period,
            conversion_delay,
            state: SensorState::Idle {
                next_cycle: Instant::from_ticks(0),
            },
        }
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Advance the cycle, returning when it next needs attention
    pub fn poll<C: ControlSurface>(&mut self, now: Instant, controls: &mut C) -> Instant {
        match self.state {
            SensorState::Idle { next_cycle } => {
                if now < next_cycle {
                    return next_cycle;
                }
                if !controls.is_connected() {
                    return self.idle_until(now + self.period);
                }
                self.start_from(0, now)
            }
            SensorState::Converting { probe, ready_at } => {
                if now < ready_at {
                    return ready_at;
                }
                self.forward(probe, controls);
                self.start_from(probe + 1, now)
            }
        }
    }

    fn idle_until(&mut self, next_cycle: Instant) -> Instant {
        self.state = SensorState::Idle { next_cycle };
        next_cycle
    }

    fn start_from(&mut self, mut index: usize, now: Instant) -> Instant {
        loop {
            let Some(probe) = self.sensor.probes().get(index).copied() else {
                return self.idle_until(now + self.period);
            };
            match self.sensor.start_conversion(probe) {
                Ok(()) => {
                    let ready_at = now + self.conversion_delay;
                    self.state = SensorState::Converting {
                        probe: index,
                        ready_at,
                    };
                    return ready_at;
                }
                Err(err) => {
                    log::warn!("temperature conversion failed: {}", err);
                    index += 1;
                }
            }
        }
    }

    fn forward<C: ControlSurface>(&mut self, index: usize, controls: &mut C) {
        let Some(probe) = self.sensor.probes().get(index).copied() else {
            return;
        };
        let celsius = match self.sensor.read_celsius(probe) {
            Ok(celsius) => celsius,
            Err(err) => {
                log::warn!("temperature read failed: {}", err);
                return;
            }
        };

        let Some(text) = format_celsius(celsius) else {
            log::warn!("temperature {} does not fit the notification", celsius);
            return;
        };
        if let Err(err) = controls.notify(Register::Temperature, text.as_bytes()) {
            log::warn!("temperature notify failed: {}", err);
        }
    }
}

/// Text form of a reading, as notified to the host
pub fn format_celsius(celsius: f32) -> Option<String<16>> {
    let mut text = String::new();
    write!(text, "{:.2}", celsius).ok()?;
    Some(text)
}
