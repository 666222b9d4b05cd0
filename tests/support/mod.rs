#![allow(dead_code)]

use std::collections::HashMap;

use sonatable_lights::{
    ControlPin, ControlPins, ControlSurface, LedDriver, ProbeId, Register, Rgbw,
    TemperatureSensor, TransportError,
};

/// Keeps every committed frame
#[derive(Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgbw>>,
}

impl RecordingDriver {
    pub fn last(&self) -> Option<&[Rgbw]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl LedDriver for RecordingDriver {
    fn write(&mut self, pixels: &[Rgbw]) {
        self.frames.push(pixels.to_vec());
    }
}

/// In-memory register map
#[derive(Default)]
pub struct FakeControls {
    pub connected: bool,
    pub registers: HashMap<Register, Vec<u8>>,
    pub writes: Vec<(Register, Vec<u8>)>,
    pub notifications: Vec<(Register, Vec<u8>)>,
    pub failing_reads: bool,
}

impl FakeControls {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn set(&mut self, register: Register, value: &[u8]) {
        self.registers.insert(register, value.to_vec());
    }

    pub fn value(&self, register: Register) -> Option<&[u8]> {
        self.registers.get(&register).map(Vec::as_slice)
    }

    pub fn notified(&self, register: Register) -> Vec<String> {
        self.notifications
            .iter()
            .filter(|(target, _)| *target == register)
            .map(|(_, value)| String::from_utf8_lossy(value).into_owned())
            .collect()
    }
}

impl ControlSurface for FakeControls {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read(&mut self, register: Register, buf: &mut [u8]) -> Result<usize, TransportError> {
        if self.failing_reads {
            return Err(TransportError::Read(register));
        }
        let value = self.registers.get(&register).map_or(&[][..], Vec::as_slice);
        if value.len() > buf.len() {
            return Err(TransportError::BufferTooSmall);
        }
        buf[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn write(&mut self, register: Register, value: &[u8]) -> Result<(), TransportError> {
        self.registers.insert(register, value.to_vec());
        self.writes.push((register, value.to_vec()));
        Ok(())
    }

    fn notify(&mut self, register: Register, value: &[u8]) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.notifications.push((register, value.to_vec()));
        Ok(())
    }
}

/// Logs every level change
#[derive(Default)]
pub struct PinLog {
    pub changes: Vec<(ControlPin, bool)>,
}

impl PinLog {
    /// Number of rising edges on `pin`
    pub fn pulses(&self, pin: ControlPin) -> usize {
        self.changes
            .iter()
            .filter(|(target, high)| *target == pin && *high)
            .count()
    }
}

impl ControlPins for PinLog {
    fn set_level(&mut self, pin: ControlPin, high: bool) {
        self.changes.push((pin, high));
    }
}

#[derive(Default)]
pub struct FakeSensor {
    pub probes: Vec<ProbeId>,
    pub readings: HashMap<ProbeId, f32>,
    pub conversions: Vec<ProbeId>,
    pub reads: Vec<ProbeId>,
}

impl TemperatureSensor for FakeSensor {
    fn probes(&self) -> &[ProbeId] {
        &self.probes
    }

    fn start_conversion(&mut self, probe: ProbeId) -> Result<(), TransportError> {
        self.conversions.push(probe);
        Ok(())
    }

    fn read_celsius(&mut self, probe: ProbeId) -> Result<f32, TransportError> {
        self.reads.push(probe);
        self.readings
            .get(&probe)
            .copied()
            .ok_or(TransportError::Sensor(probe))
    }
}
