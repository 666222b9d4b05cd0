#![no_std]

pub mod color;
pub mod config;
pub mod controls;
pub mod debounce;
pub mod descriptor;
pub mod error;
pub mod lifecycle;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod math8;
pub mod orchestrator;
pub mod pattern;
pub mod sensor;
pub mod surface;
pub mod transport;
pub mod wave;

pub use embassy_time::{Duration, Instant};

pub use color::{Color, Rgb, Rgbw};
pub use config::{ControlTimings, OrchestratorConfig};
pub use controls::{ButtonAction, ButtonBinding, ControlPin, ControlPins, OperatingMode};
pub use debounce::{Debouncer, EventQueue, InputEvent, InputId};
pub use descriptor::PatternConfig;
pub use error::{ArityError, ConfigurationError, TransportError};
pub use lifecycle::{PatternTask, Phase};
pub use orchestrator::Orchestrator;
pub use pattern::{PatternKind, PatternSlot};
pub use sensor::{NoSensor, ProbeId, TemperatureSensor};
pub use surface::{ChannelOrder, PixelSurface, SurfaceConfig};
pub use transport::{ControlSurface, Register};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Receives the committed frame, already masked and in hardware channel order.
pub trait LedDriver {
    /// Write colors to the LED strip
    fn write(&mut self, pixels: &[Rgbw]);
}
