use super::{Rgb, clamp_unit, to_channel};

/// White point of the white emitter, as seen through the RGB channels
pub const DEFAULT_WHITE_POINT: Rgb = Rgb::new(255, 255, 255);

/// Share of the blue output that leaks into the white emitter
pub const BLUE_BLEED_FRACTION: f32 = 0.2;

/// Four-channel pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const BLACK: Self = Self::new(0, 0, 0, 0);
    /// White sub-pixel only
    pub const WHITE: Self = Self::new(0, 0, 0, 255);
    /// Every sub-pixel at full intensity
    pub const FULL: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }

    pub const fn from_channels(channels: [u8; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }

    /// Per-channel linear blend, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = clamp_unit(t);
        let a = self.channels();
        let b = other.channels();
        let mut out = [0u8; 4];
        for (idx, channel) in out.iter_mut().enumerate() {
            let from = f32::from(a[idx]);
            let to = f32::from(b[idx]);
            *channel = to_channel(from + (to - from) * t);
        }
        Self::from_channels(out)
    }

    /// Channel-wise saturating sum
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.w.saturating_add(other.w),
        )
    }
}

/// Split an RGB color into RGB + white using the default white point.
pub fn rgb_to_rgbw(rgb: Rgb, correct_blue_bleed: bool) -> Rgbw {
    rgb_to_rgbw_with(rgb, DEFAULT_WHITE_POINT, correct_blue_bleed)
}

/// Split an RGB color into RGB + white.
///
/// The white channel takes the channel with the smallest white-point-corrected
/// value, and that amount is removed from every colored channel. With
/// `correct_blue_bleed` the white output is reduced by a fraction of the blue
/// output to compensate for the white emitter's blue tint.
pub fn rgb_to_rgbw_with(rgb: Rgb, white_point: Rgb, correct_blue_bleed: bool) -> Rgbw {
    let channels = [rgb.r, rgb.g, rgb.b];
    let points = [
        white_point.r.max(1),
        white_point.g.max(1),
        white_point.b.max(1),
    ];
    let corrected =
        |idx: usize| f32::from(channels[idx]) * 255.0 / f32::from(points[idx]);

    let mut min_idx = 0;
    for idx in 1..channels.len() {
        if corrected(idx) < corrected(min_idx) {
            min_idx = idx;
        }
    }

    let white = f32::from(channels[min_idx]);
    let remove = |idx: usize| {
        to_channel(f32::from(channels[idx]) - white * f32::from(points[idx]) / 255.0)
    };
    let (r, g, b) = (remove(0), remove(1), remove(2));

    let mut w = white;
    if correct_blue_bleed {
        w -= f32::from(b) * BLUE_BLEED_FRACTION;
    }

    Rgbw::new(r, g, b, to_channel(w))
}
