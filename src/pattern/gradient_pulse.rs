use embassy_time::{Duration, Instant};

use super::{Pattern, Snap, Step};
use crate::{LedDriver, color::Rgbw, surface::PixelSurface};

/// Whole-surface color that sweeps `from -> to -> from` in `2 * steps` frames
#[derive(Debug, Clone)]
pub struct GradientPulse {
    from: Rgbw,
    to: Rgbw,
    steps: u16,
    wait: Duration,
    frame: u32,
    snap_in: Snap,
    snap_out: Snap,
}

impl GradientPulse {
    /// `steps` below one is raised to one
    pub fn new(from: Rgbw, to: Rgbw, steps: u16, wait: Duration) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
            wait,
            frame: 0,
            snap_in: Snap::default(),
            snap_out: Snap::default(),
        }
    }
}

impl Pattern for GradientPulse {
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.snap_in.step(surface, self.from)
    }

    #[allow(clippy::cast_precision_loss)]
    fn run<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        let steps = u32::from(self.steps);
        let (start, end, offset) = if self.frame < steps {
            (self.from, self.to, self.frame)
        } else {
            (self.to, self.from, self.frame - steps)
        };

        surface.fill(start.lerp(end, offset as f32 / steps as f32));
        surface.show();

        self.frame = (self.frame + 1) % (steps * 2);
        Step::Sleep(self.wait)
    }

    fn exit<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.snap_out.step(surface, Rgbw::BLACK)
    }
}
