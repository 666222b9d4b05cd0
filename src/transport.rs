//! Host-facing control surface (a set of named registers, e.g. BLE characteristics)

use crate::error::TransportError;

/// Largest register value the orchestrator reads. Matches the host MTU, which
/// covers a descriptor with four full palettes.
pub const REGISTER_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// JSON pattern descriptor written by the host
    PatternDescriptor,
    /// Little-endian u32 operating mode
    OperatingMode,
    /// `[1]` requests a power toggle
    PowerButton,
    /// `+1`, `-1`, `max` or `min`
    BrightnessCommand,
    /// Notified with a button index in soundboard mode
    Buttons,
    /// Notified with temperature readings
    Temperature,
}

pub trait ControlSurface {
    fn is_connected(&self) -> bool;

    /// Copy the register value into `buf`, returning its length.
    ///
    /// Fails with [`TransportError::BufferTooSmall`] when the value does not fit.
    fn read(&mut self, register: Register, buf: &mut [u8]) -> Result<usize, TransportError>;

    fn write(&mut self, register: Register, value: &[u8]) -> Result<(), TransportError>;

    /// Push a value to the subscribed host
    fn notify(&mut self, register: Register, value: &[u8]) -> Result<(), TransportError>;
}
