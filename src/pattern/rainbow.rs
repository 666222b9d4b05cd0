use embassy_time::{Duration, Instant};

use super::{Pattern, Snap, Step};
use crate::{
    LedDriver,
    color::{Rgbw, wheel},
    surface::PixelSurface,
};

/// Color wheel spread once around the ring, rotating one step per frame
#[derive(Debug, Clone)]
pub struct Rainbow {
    wait: Duration,
    offset: u8,
    snap_in: Snap,
    snap_out: Snap,
}

impl Rainbow {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            offset: 0,
            snap_in: Snap::default(),
            snap_out: Snap::default(),
        }
    }
}

impl Pattern for Rainbow {
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.snap_in.step(surface, Rgbw::BLACK)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn run<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        for i in 0..N {
            let position = ((i * 255) / N + usize::from(self.offset)) & 0xFF;
            surface.set_pixel(i32::try_from(i).unwrap_or(i32::MAX), wheel(position as u8));
        }
        surface.show();

        self.offset = self.offset.wrapping_add(1);
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
