use embassy_time::{Duration, Instant};

use super::{Fade, Pattern, Step};
use crate::{LedDriver, color::Rgbw, surface::PixelSurface};

const FADE_FRAMES: u16 = 100;
const FADE_INTERVAL: Duration = Duration::from_millis(10);
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Single color with fade-in and fade-out through black
#[derive(Debug, Clone)]
pub struct Solid {
    color: Rgbw,
    fade_in: Fade,
    fade_out: Fade,
}

impl Solid {
    pub const fn new(color: Rgbw) -> Self {
        Self {
            color,
            fade_in: Fade::new(FADE_FRAMES, FADE_INTERVAL),
            fade_out: Fade::new(FADE_FRAMES, FADE_INTERVAL),
        }
    }

    pub const fn color(&self) -> Rgbw {
        self.color
    }

    /// Nudge one channel (`0..=3` for r, g, b, w), wrapping modulo 256.
    /// Out-of-range channels are ignored.
    pub fn increase_channel(&mut self, channel: usize, amount: u8) {
        let mut channels = self.color.channels();
        if let Some(value) = channels.get_mut(channel) {
            *value = value.wrapping_add(amount);
            self.color = Rgbw::from_channels(channels);
        }
    }
}

impl Pattern for Solid {
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.fade_in.step(surface, Rgbw::BLACK, self.color)
    }

    fn run<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        surface.fill(self.color);
        surface.show();
        Step::Sleep(REFRESH_INTERVAL)
    }

    fn exit<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.fade_out.step(surface, self.color, Rgbw::BLACK)
    }
}
