//! Layered ocean waves
//!
//! Four sine-driven layers, each sampling its own hue palette, are added on
//! top of a dim background. Layer phases advance by elapsed time scaled with
//! slow oscillators so the motion never repeats exactly. An optional pass
//! lifts bright crests towards white.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::{Pattern, Snap, Step};
use crate::{
    LedDriver,
    color::{Rgbw, hsi_to_rgbw},
    math8::{offset16, qadd8, scale8, scale16},
    surface::PixelSurface,
    wave::{beat8, beat16, beatsin8, beatsin16, beatsin88, sin8, sin16},
};

pub const PALETTE_CAPACITY: usize = 16;

/// Hues in degrees, sampled with linear blending between neighbours
pub type HuePalette = Vec<u16, PALETTE_CAPACITY>;

const BACKGROUND: Rgbw = Rgbw::new(0, 0, 1, 1);

// Deep blues fading into sea green at the top end
const DEFAULT_HUES: [[u16; PALETTE_CAPACITY]; 4] = [
    [
        197, 204, 210, 215, 220, 225, 230, 234, 240, 240, 240, 240, 240, 240, 173, 134,
    ],
    [
        197, 204, 210, 215, 220, 225, 230, 234, 240, 240, 240, 240, 240, 240, 171, 146,
    ],
    [
        195, 193, 195, 194, 194, 195, 195, 195, 195, 195, 195, 195, 195, 195, 220, 220,
    ],
    [
        200, 205, 210, 212, 215, 218, 220, 222, 225, 228, 230, 232, 235, 238, 180, 160,
    ],
];

/// Built-in palettes, one per layer
pub fn default_palettes() -> [HuePalette; 4] {
    DEFAULT_HUES.map(|hues| Vec::from_slice(&hues).unwrap_or_default())
}

/// Sample the palette at position t (0-255)
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn sample_hue(palette: &[u16], t: u8) -> f32 {
    let segments = palette.len().saturating_sub(1);
    if segments == 0 {
        return palette.first().map_or(0.0, |hue| f32::from(*hue));
    }

    let scaled = u32::from(t) * segments as u32;
    let segment = ((scaled >> 8) as usize).min(segments - 1);
    let local_t = (scaled & 0xFF) as f32 / 255.0;

    let from = f32::from(palette[segment]);
    let to = f32::from(palette[segment + 1]);
    from + (to - from) * local_t
}

#[derive(Debug, Clone)]
pub struct Pacifica {
    wait: Duration,
    palettes: [HuePalette; 4],
    whitecaps: bool,
    phase_starts: [u16; 4],
    last_frame_ms: Option<u64>,
    snap_in: Snap,
    snap_out: Snap,
}

impl Pacifica {
    pub fn new(wait: Duration, palettes: [HuePalette; 4], whitecaps: bool) -> Self {
        Self {
            wait,
            palettes,
            whitecaps,
            phase_starts: [0; 4],
            last_frame_ms: None,
            snap_in: Snap::default(),
            snap_out: Snap::default(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn advance_phases(&mut self, now: Instant) {
        let ms = now.as_millis();
        let delta = self
            .last_frame_ms
            .map_or(0, |last| ms.saturating_sub(last));
        self.last_frame_ms = Some(ms);

        let speed1 = u64::from(beatsin16(3, 179, 269, now));
        let speed2 = u64::from(beatsin16(4, 179, 269, now));
        let delta1 = delta * speed1 / 256;
        let delta2 = delta * speed2 / 256;
        let delta21 = (delta1 + delta2) / 2;

        let [start1, start2, start3, start4] = &mut self.phase_starts;
        *start1 = start1
            .wrapping_add((delta1 * u64::from(beatsin88(1011, 10, 13, now))) as u16);
        *start2 =
            start2.wrapping_sub((delta21 * u64::from(beatsin88(777, 8, 11, now))) as u16);
        *start3 =
            start3.wrapping_sub((delta1 * u64::from(beatsin88(501, 5, 7, now))) as u16);
        *start4 =
            start4.wrapping_sub((delta2 * u64::from(beatsin88(257, 4, 6, now))) as u16);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_layer<D: LedDriver, const N: usize>(
        surface: &mut PixelSurface<D, N>,
        palette: &[u16],
        phase_start: u16,
        wave_scale: u16,
        brightness: u8,
        angle_offset: u16,
    ) {
        let half_scale = wave_scale / 2 + 20;
        let intensity = f32::from(brightness) / 255.0;
        let mut phase = phase_start;
        let mut angle = angle_offset;

        for i in 0..N {
            angle = angle.wrapping_add(250);
            let swing = scale16(offset16(sin16(angle)), half_scale).wrapping_add(half_scale);
            phase = phase.wrapping_add(swing);
            let index = scale16(offset16(sin16(phase)), 240) as u8;

            let color = hsi_to_rgbw(sample_hue(palette, index), 1.0, intensity);
            surface.add_pixel(slot_index(i), color);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_whitecaps<D: LedDriver, const N: usize>(
        surface: &mut PixelSurface<D, N>,
        now: Instant,
    ) {
        let base_threshold = beatsin8(9, 55, 65, now);
        let mut wave = beat8(7, now);

        for i in 0..N {
            let threshold = scale8(sin8(wave), 20).saturating_add(base_threshold);
            wave = wave.wrapping_add(7);

            let pixel = surface.pixel(slot_index(i));
            let light =
                ((u16::from(pixel.r) + u16::from(pixel.g) + u16::from(pixel.b)) / 3) as u8;
            if light > threshold {
                let overage = light - threshold;
                let overage2 = qadd8(overage, overage);
                surface.add_pixel(
                    slot_index(i),
                    Rgbw::new(overage, overage2, qadd8(overage2, overage2), 0),
                );
            }
        }
    }

    fn render<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) {
        self.advance_phases(now);
        let [start1, start2, start3, start4] = self.phase_starts;

        surface.fill(BACKGROUND);
        Self::add_layer(
            surface,
            &self.palettes[0],
            start1,
            beatsin16(3, 11 * 256, 14 * 256, now),
            beatsin8(10, 70, 130, now),
            0u16.wrapping_sub(beat16(301, now)),
        );
        Self::add_layer(
            surface,
            &self.palettes[1],
            start2,
            beatsin16(4, 6 * 256, 9 * 256, now),
            beatsin8(17, 40, 80, now),
            beat16(401, now),
        );
        Self::add_layer(
            surface,
            &self.palettes[2],
            start3,
            6 * 256,
            beatsin8(9, 10, 38, now),
            0u16.wrapping_sub(beat16(503, now)),
        );
        Self::add_layer(
            surface,
            &self.palettes[3],
            start4,
            5 * 256,
            beatsin8(8, 10, 28, now),
            beat16(601, now),
        );

        if self.whitecaps {
            Self::add_whitecaps(surface, now);
        }
    }
}

impl Pattern for Pacifica {
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.snap_in.step(surface, Rgbw::BLACK)
    }

    fn run<D: LedDriver, const N: usize>(
        &mut self,
        now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.render(now, surface);
        surface.show();
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

fn slot_index(slot: usize) -> i32 {
    i32::try_from(slot).unwrap_or(i32::MAX)
}
