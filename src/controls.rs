//! Auxiliary hardware controls driven through GPIO pulses

use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::debounce::InputId;

const MODE_SOUNDBOARD: u32 = 0;
const MODE_LIGHT: u32 = 1;

/// Output pins the orchestrator drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPin {
    /// Screen power button
    Power,
    BrightnessUp,
    BrightnessDown,
    StatusLed,
}

pub trait ControlPins {
    fn set_level(&mut self, pin: ControlPin, high: bool);
}

/// What the physical buttons do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Buttons are forwarded to the host
    Soundboard,
    /// Buttons act locally through the button map
    Light,
    Other(u32),
}

impl OperatingMode {
    pub const fn from_raw(value: u32) -> Self {
        match value {
            MODE_SOUNDBOARD => Self::Soundboard,
            MODE_LIGHT => Self::Light,
            other => Self::Other(other),
        }
    }

    pub const fn to_raw(self) -> u32 {
        match self {
            Self::Soundboard => MODE_SOUNDBOARD,
            Self::Light => MODE_LIGHT,
            Self::Other(value) => value,
        }
    }

    /// Decode a little-endian register value of one to four bytes
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        let mut raw = [0u8; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        Some(Self::from_raw(u32::from_le_bytes(raw)))
    }

    pub const fn encode(self) -> [u8; 4] {
        self.to_raw().to_le_bytes()
    }
}

/// Brightness register command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessCommand {
    Up,
    Down,
    Max,
    Min,
}

impl BrightnessCommand {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let end = bytes
            .iter()
            .rposition(|byte| !matches!(byte, 0 | b'\n' | b'\r' | b' '))
            .map_or(0, |idx| idx + 1);
        match &bytes[..end] {
            b"+1" => Some(Self::Up),
            b"-1" => Some(Self::Down),
            b"max" => Some(Self::Max),
            b"min" => Some(Self::Min),
            _ => None,
        }
    }

    /// Pulses needed, given how many steps the brightness control has
    pub const fn pulses(self, levels: u8) -> PulseRequest {
        match self {
            Self::Up => PulseRequest::new(ControlPin::BrightnessUp, 1),
            Self::Down => PulseRequest::new(ControlPin::BrightnessDown, 1),
            Self::Max => PulseRequest::new(ControlPin::BrightnessUp, levels),
            Self::Min => PulseRequest::new(ControlPin::BrightnessDown, levels),
        }
    }
}

/// Local action bound to a button in light mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    PowerToggle,
    BrightnessUp,
    BrightnessDown,
    ToggleStatusLed,
    /// Switch to the preset pattern at this index
    SelectPreset(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBinding {
    pub input: InputId,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRequest {
    pub pin: ControlPin,
    pub count: u8,
}

impl PulseRequest {
    pub const fn new(pin: ControlPin, count: u8) -> Self {
        Self { pin, count }
    }
}

#[derive(Debug, Clone, Copy)]
enum PulseState {
    Idle,
    High {
        pin: ControlPin,
        remaining: u8,
        until: Instant,
    },
    Low {
        pin: ControlPin,
        remaining: u8,
        until: Instant,
    },
}

/// Queue of pulse requests emitted one pulse at a time without blocking
///
/// Every pulse is held high for the pulse width and followed by a low gap
/// before the next one starts.
pub struct PulseTrain<const SIZE: usize> {
    queue: Deque<PulseRequest, SIZE>,
    state: PulseState,
    width: Duration,
    gap: Duration,
}

impl<const SIZE: usize> PulseTrain<SIZE> {
    pub const fn new(width: Duration, gap: Duration) -> Self {
        Self {
            queue: Deque::new(),
            state: PulseState::Idle,
            width,
            gap,
        }
    }

    /// Queue a request. Hands it back when the queue is full.
    pub fn push(&mut self, request: PulseRequest) -> Result<(), PulseRequest> {
        if request.count == 0 {
            return Ok(());
        }
        self.queue.push_back(request)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PulseState::Idle) && self.queue.is_empty()
    }

    /// Drive the pins, returning when the train next needs attention
    pub fn poll<P: ControlPins>(&mut self, now: Instant, pins: &mut P) -> Option<Instant> {
        loop {
            match self.state {
                PulseState::Idle => {
                    let request = self.queue.pop_front()?;
                    return Some(self.raise(pins, request.pin, request.count - 1, now));
                }
                PulseState::High {
                    pin,
                    remaining,
                    until,
                } => {
                    if now < until {
                        return Some(until);
                    }
                    pins.set_level(pin, false);
                    let until = now + self.gap;
                    self.state = PulseState::Low {
                        pin,
                        remaining,
                        until,
                    };
                    return Some(until);
                }
                PulseState::Low {
                    pin,
                    remaining,
                    until,
                } => {
                    if now < until {
                        return Some(until);
                    }
                    if remaining > 0 {
                        return Some(self.raise(pins, pin, remaining - 1, now));
                    }
                    self.state = PulseState::Idle;
                }
            }
        }
    }

    fn raise<P: ControlPins>(
        &mut self,
        pins: &mut P,
        pin: ControlPin,
        remaining: u8,
        now: Instant,
    ) -> Instant {
        pins.set_level(pin, true);
        let until = now + self.width;
        self.state = PulseState::High {
            pin,
            remaining,
            until,
        };
        until
    }
}

/// Power toggles with a cooldown, tracking the presumed screen state
#[derive(Debug, Clone)]
pub struct PowerToggle {
    cooldown: Duration,
    last_accepted: Option<Instant>,
    powered_on: bool,
}

impl PowerToggle {
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
            powered_on: false,
        }
    }

    pub const fn powered_on(&self) -> bool {
        self.powered_on
    }

    /// Accept the toggle unless the previous one was less than the cooldown ago
    pub fn try_toggle(&mut self, now: Instant) -> bool {
        let cooled = self
            .last_accepted
            .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown);
        if cooled {
            self.last_accepted = Some(now);
            self.powered_on = !self.powered_on;
        }
        cooled
    }
}
