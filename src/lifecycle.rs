//! Drives one pattern instance through enter, run and exit

use embassy_time::Instant;

use crate::{
    LedDriver,
    descriptor::PatternConfig,
    pattern::{PatternKind, PatternSlot, Step},
    surface::PixelSurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Running,
    Exiting,
    Finished,
}

/// Cancellation request for a running pattern. Requesting twice is harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelToken {
    requested: bool,
}

impl CancelToken {
    pub fn cancel(&mut self) {
        self.requested = true;
    }

    pub const fn is_cancelled(&self) -> bool {
        self.requested
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still entering, running or exiting
    Active,
    /// Exit transition completed
    Exited,
}

/// A pattern with its phase, cancellation state and next wake-up
///
/// Cancellation only takes effect in the running phase. A cancelled entry
/// transition finishes first, and the exit transition always runs to the end.
#[derive(Debug, Clone)]
pub struct PatternTask {
    slot: PatternSlot,
    phase: Phase,
    cancel: CancelToken,
    wake_at: Option<Instant>,
}

impl PatternTask {
    /// Build the pattern, due immediately
    pub fn new(config: &PatternConfig, now: Instant) -> Self {
        Self {
            slot: PatternSlot::from_config(config),
            phase: Phase::Entering,
            cancel: CancelToken::default(),
            wake_at: Some(now),
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> PatternKind {
        self.slot.kind()
    }

    pub fn slot_mut(&mut self) -> &mut PatternSlot {
        &mut self.slot
    }

    /// `None` while idle: the steady state finished and nothing is pending
    pub const fn wake_at(&self) -> Option<Instant> {
        self.wake_at
    }

    pub const fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.wake_at.is_some_and(|wake_at| wake_at <= now)
    }

    /// Request the exit transition. A sleeping steady state is woken at once.
    pub fn cancel(&mut self, now: Instant) {
        self.cancel.cancel();
        if self.phase == Phase::Running {
            self.wake_at = Some(now);
        }
    }

    /// Drive the current phase by one frame
    pub fn poll<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> TaskStatus {
        loop {
            let step = match self.phase {
                Phase::Entering => self.slot.enter(now, surface),
                Phase::Running => {
                    if self.cancel.is_cancelled() {
                        self.phase = Phase::Exiting;
                        continue;
                    }
                    self.slot.run(now, surface)
                }
                Phase::Exiting => self.slot.exit(now, surface),
                Phase::Finished => return TaskStatus::Exited,
            };

            match step {
                Step::Sleep(delay) => {
                    self.wake_at = Some(now + delay);
                    return TaskStatus::Active;
                }
                Step::Done => match self.phase {
                    Phase::Entering => self.phase = Phase::Running,
                    Phase::Running => {
                        self.wake_at = None;
                        return TaskStatus::Active;
                    }
                    Phase::Exiting | Phase::Finished => {
                        self.phase = Phase::Finished;
                        self.wake_at = None;
                        return TaskStatus::Exited;
                    }
                },
            }
        }
    }
}
