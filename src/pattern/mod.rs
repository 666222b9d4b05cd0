//! Pattern system with compile-time known pattern variants
//!
//! A pattern has three phases: an entry transition, a steady-state loop and
//! an exit transition. Each phase is driven one frame at a time: a call
//! renders and commits at most one frame and tells the caller how long to
//! wait before the next call, or that the phase has finished.

mod gradient_pulse;
mod pacifica;
mod power_on;
mod rainbow;
mod solid;

use embassy_time::{Duration, Instant};
pub use gradient_pulse::GradientPulse;
pub use pacifica::{HuePalette, PALETTE_CAPACITY, Pacifica, default_palettes};
pub use power_on::{Landmarks, PowerOn};
pub use rainbow::Rainbow;
pub use solid::Solid;

use crate::{LedDriver, color::Rgbw, descriptor::PatternConfig, surface::PixelSurface};

const PATTERN_NAME_SOLID: &str = "solid";
const PATTERN_NAME_GRADIENT_PULSE: &str = "gradient";
const PATTERN_NAME_RAINBOW: &str = "rainbow";
const PATTERN_NAME_PACIFICA: &str = "pacifica";
const PATTERN_NAME_POWER_ON: &str = "power_on";

/// Delay after a single-frame transition before the phase reports completion
const SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Outcome of driving one frame of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Call the same phase again after this delay
    Sleep(Duration),
    /// The phase is over
    Done,
}

pub trait Pattern {
    /// Next frame of the entry transition
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step;

    /// Next frame of the steady-state loop
    ///
    /// Most patterns never return [`Step::Done`] here.
    fn run<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step;

    /// Next frame of the exit transition
    fn exit<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step;
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    Solid(Solid),
    GradientPulse(GradientPulse),
    Rainbow(Rainbow),
    Pacifica(Pacifica),
    PowerOn(PowerOn),
}

/// Known pattern kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Solid,
    GradientPulse,
    Rainbow,
    Pacifica,
    PowerOn,
}

impl PatternKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => PATTERN_NAME_SOLID,
            Self::GradientPulse => PATTERN_NAME_GRADIENT_PULSE,
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::Pacifica => PATTERN_NAME_PACIFICA,
            Self::PowerOn => PATTERN_NAME_POWER_ON,
        }
    }

    /// Resolve a descriptor `mode`. Unknown names select the gradient pulse.
    pub fn from_mode(mode: &str) -> Self {
        match mode {
            PATTERN_NAME_SOLID => Self::Solid,
            PATTERN_NAME_RAINBOW => Self::Rainbow,
            PATTERN_NAME_PACIFICA => Self::Pacifica,
            PATTERN_NAME_POWER_ON => Self::PowerOn,
            _ => Self::GradientPulse,
        }
    }
}

impl PatternSlot {
    pub fn from_config(config: &PatternConfig) -> Self {
        match config {
            PatternConfig::Solid { color } => Self::Solid(Solid::new(*color)),
            PatternConfig::GradientPulse {
                from,
                to,
                steps,
                wait,
            } => Self::GradientPulse(GradientPulse::new(*from, *to, *steps, *wait)),
            PatternConfig::Rainbow { wait } => Self::Rainbow(Rainbow::new(*wait)),
            PatternConfig::Pacifica {
                wait,
                palettes,
                whitecaps,
            } => Self::Pacifica(Pacifica::new(*wait, palettes.clone(), *whitecaps)),
            PatternConfig::PowerOn(landmarks) => Self::PowerOn(PowerOn::new(*landmarks)),
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Solid(_) => PatternKind::Solid,
            Self::GradientPulse(_) => PatternKind::GradientPulse,
            Self::Rainbow(_) => PatternKind::Rainbow,
            Self::Pacifica(_) => PatternKind::Pacifica,
            Self::PowerOn(_) => PatternKind::PowerOn,
        }
    }

    pub fn enter<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        match self {
            Self::Solid(pattern) => pattern.enter(now, surface),
            Self::GradientPulse(pattern) => pattern.enter(now, surface),
            Self::Rainbow(pattern) => pattern.enter(now, surface),
            Self::Pacifica(pattern) => pattern.enter(now, surface),
            Self::PowerOn(pattern) => pattern.enter(now, surface),
        }
    }

    pub fn run<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        match self {
            Self::Solid(pattern) => pattern.run(now, surface),
            Self::GradientPulse(pattern) => pattern.run(now, surface),
            Self::Rainbow(pattern) => pattern.run(now, surface),
            Self::Pacifica(pattern) => pattern.run(now, surface),
            Self::PowerOn(pattern) => pattern.run(now, surface),
        }
    }

    pub fn exit<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        match self {
            Self::Solid(pattern) => pattern.exit(now, surface),
            Self::GradientPulse(pattern) => pattern.exit(now, surface),
            Self::Rainbow(pattern) => pattern.exit(now, surface),
            Self::Pacifica(pattern) => pattern.exit(now, surface),
            Self::PowerOn(pattern) => pattern.exit(now, surface),
        }
    }
}

/// Single-frame transition: fill, commit, then report completion on the next call
#[derive(Debug, Clone, Default)]
pub(crate) struct Snap {
    shown: bool,
}

impl Snap {
    pub(crate) fn step<D: LedDriver, const N: usize>(
        &mut self,
        surface: &mut PixelSurface<D, N>,
        color: Rgbw,
    ) -> Step {
        if self.shown {
            return Step::Done;
        }
        surface.fill(color);
        surface.show();
        self.shown = true;
        Step::Sleep(SETTLE_DELAY)
    }
}

/// Whole-surface fade in a fixed number of frames, ending exactly on `to`
#[derive(Debug, Clone)]
pub(crate) struct Fade {
    frame: u16,
    frames: u16,
    interval: Duration,
}

impl Fade {
    pub(crate) const fn new(frames: u16, interval: Duration) -> Self {
        Self {
            frame: 0,
            frames,
            interval,
        }
    }

    pub(crate) fn step<D: LedDriver, const N: usize>(
        &mut self,
        surface: &mut PixelSurface<D, N>,
        from: Rgbw,
        to: Rgbw,
    ) -> Step {
        if self.frame >= self.frames {
            return Step::Done;
        }
        self.frame += 1;
        let t = f32::from(self.frame) / f32::from(self.frames);
        surface.fill(from.lerp(to, t));
        surface.show();
        Step::Sleep(self.interval)
    }
}
