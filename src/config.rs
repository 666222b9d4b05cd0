//! Orchestrator configuration

use embassy_time::Duration;
use heapless::Vec;

use crate::{
    controls::{ButtonAction, ButtonBinding},
    debounce::InputId,
    descriptor::PatternConfig,
    pattern::Landmarks,
};

pub const MAX_PRESETS: usize = 8;
pub const MAX_BUTTONS: usize = 8;

/// Periods and delays of the cooperative units of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTimings {
    /// Register polling while connected
    pub control_poll: Duration,
    /// Register polling back-off while disconnected
    pub disconnected_poll: Duration,
    pub sensor_period: Duration,
    pub sensor_conversion: Duration,
    pub pulse_width: Duration,
    pub pulse_gap: Duration,
    /// Minimum time between two accepted power toggles
    pub power_cooldown: Duration,
}

pub const DEFAULT_CONTROL_TIMINGS: ControlTimings = ControlTimings {
    control_poll: Duration::from_millis(20),
    disconnected_poll: Duration::from_millis(1000),
    sensor_period: Duration::from_millis(1000),
    sensor_conversion: Duration::from_millis(750),
    pulse_width: Duration::from_millis(100),
    pulse_gap: Duration::from_millis(100),
    power_cooldown: Duration::from_secs(5),
};

impl Default for ControlTimings {
    fn default() -> Self {
        DEFAULT_CONTROL_TIMINGS
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub timings: ControlTimings,
    /// Pulses that take the brightness from one end to the other
    pub brightness_levels: u8,
    /// Pattern shown at boot
    pub initial_pattern: PatternConfig,
    /// Patterns reachable with [`ButtonAction::SelectPreset`]
    pub presets: Vec<PatternConfig, MAX_PRESETS>,
    /// Light-mode button actions
    pub buttons: Vec<ButtonBinding, MAX_BUTTONS>,
}

impl OrchestratorConfig {
    pub fn button_action(&self, input: InputId) -> Option<ButtonAction> {
        self.buttons
            .iter()
            .find(|binding| binding.input == input)
            .map(|binding| binding.action)
    }

    pub fn preset(&self, index: u8) -> Option<&PatternConfig> {
        self.presets.get(usize::from(index))
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            timings: DEFAULT_CONTROL_TIMINGS,
            brightness_levels: 15,
            initial_pattern: PatternConfig::PowerOn(Landmarks::DEFAULT),
            presets: Vec::new(),
            buttons: Vec::new(),
        }
    }
}
