//! Error types

use thiserror::Error;

use crate::{debounce::InputId, sensor::ProbeId, transport::Register};

/// Returned when two colors with different channel counts are interpolated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot interpolate a {left}-channel color with a {right}-channel color")]
pub struct ArityError {
    pub left: usize,
    pub right: usize,
}

/// A pattern descriptor could not be turned into a pattern
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("malformed pattern descriptor: {0}")]
    Malformed(serde_json_core::de::Error),
    #[error("pattern descriptor is missing `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must have 3 or 4 channels, got {len}")]
    ColorArity { field: &'static str, len: usize },
    #[error("palette {0} has no entries")]
    EmptyPalette(usize),
}

/// Failures reported by the control surface or the temperature sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("control surface is not connected")]
    NotConnected,
    #[error("failed to read register {0:?}")]
    Read(Register),
    #[error("failed to write register {0:?}")]
    Write(Register),
    #[error("failed to notify register {0:?}")]
    Notify(Register),
    #[error("register value does not fit the read buffer")]
    BufferTooSmall,
    #[error("temperature probe {0:?} did not respond")]
    Sensor(ProbeId),
}

/// The debouncer has no room for another input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free debounce slot for input {0:?}")]
pub struct RegistrationError(pub InputId);
