//! Color model: RGB/RGBW values, HSI conversion and interpolation

mod hsi;
mod rgbw;
mod utils;

pub use hsi::{Hsi, hsi_to_rgbw, rgb_to_hsi};
pub use rgbw::{
    BLUE_BLEED_FRACTION, DEFAULT_WHITE_POINT, Rgbw, rgb_to_rgbw, rgb_to_rgbw_with,
};
use smart_leds::RGB8;
pub use utils::{linear_interpolate, wheel};

pub type Rgb = RGB8;

/// A color value with either three or four channels
///
/// Colors are only interpolated with colors of the same arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Rgb(Rgb),
    Rgbw(Rgbw),
}

impl Color {
    /// Number of channels
    pub const fn arity(&self) -> usize {
        match self {
            Self::Rgb(_) => 3,
            Self::Rgbw(_) => 4,
        }
    }

    /// Widen to the four-channel form the output surface stores.
    ///
    /// Three-channel values go through [`rgb_to_rgbw`] without blue-bleed correction.
    pub fn to_rgbw(self) -> Rgbw {
        match self {
            Self::Rgb(rgb) => rgb_to_rgbw(rgb, false),
            Self::Rgbw(rgbw) => rgbw,
        }
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Self::Rgb(value)
    }
}

impl From<Rgbw> for Color {
    fn from(value: Rgbw) -> Self {
        Self::Rgbw(value)
    }
}

/// Convert a normalized float channel (0-255 domain) into a byte.
///
/// Rounds half away from zero and clamps; NaN maps to zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    libm::roundf(value.clamp(0.0, 255.0)) as u8
}

#[inline]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
