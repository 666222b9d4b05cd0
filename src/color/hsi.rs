use core::f32::consts::{FRAC_PI_3, PI};

use libm::{acosf, cosf, fmodf, sqrtf};

use super::{Rgb, Rgbw, clamp_unit, to_channel};

/// One third of the hue circle, in radians
const SECTOR: f32 = 2.0 * FRAC_PI_3;

/// Hue (degrees), saturation and intensity (both `0.0..=1.0`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsi {
    pub hue: f32,
    pub saturation: f32,
    pub intensity: f32,
}

/// Fold any hue into `[0, 360)`
fn normalize_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let mut folded = fmodf(hue, 360.0);
    if folded < 0.0 {
        folded += 360.0;
    }
    if folded >= 360.0 { 0.0 } else { folded }
}

/// Convert HSI to RGBW.
///
/// Hue is in degrees and wraps; saturation and intensity are clamped.
/// The unsaturated part of the color goes to the white channel, the
/// saturated part is split between the two primaries of the hue's sector.
pub fn hsi_to_rgbw(hue: f32, saturation: f32, intensity: f32) -> Rgbw {
    let h = normalize_hue(hue) * PI / 180.0;
    let s = clamp_unit(saturation);
    let i = clamp_unit(intensity);

    let (sector, theta) = if h < SECTOR {
        (0, h)
    } else if h < 2.0 * SECTOR {
        (1, h - SECTOR)
    } else {
        (2, h - 2.0 * SECTOR)
    };

    let ratio = cosf(theta) / cosf(FRAC_PI_3 - theta);
    let scale = 255.0 * s * i / 3.0;
    let primary = to_channel(scale * (1.0 + ratio));
    let secondary = to_channel(scale * (2.0 - ratio));
    let w = to_channel(255.0 * (1.0 - s) * i);

    match sector {
        0 => Rgbw::new(primary, secondary, 0, w),
        1 => Rgbw::new(0, primary, secondary, w),
        _ => Rgbw::new(secondary, 0, primary, w),
    }
}

/// Convert RGB to HSI (hue in degrees).
///
/// Grey values (including black) report hue 0 and saturation 0.
pub fn rgb_to_hsi(rgb: Rgb) -> Hsi {
    let r = f32::from(rgb.r) / 255.0;
    let g = f32::from(rgb.g) / 255.0;
    let b = f32::from(rgb.b) / 255.0;

    let sum = r + g + b;
    if sum <= 0.0 {
        return Hsi {
            hue: 0.0,
            saturation: 0.0,
            intensity: 0.0,
        };
    }

    let intensity = sum / 3.0;
    let min = r.min(g).min(b);
    let saturation = clamp_unit(1.0 - 3.0 * min / sum);

    let numerator = 0.5 * ((r - g) + (r - b));
    let denominator = sqrtf((r - g) * (r - g) + (r - b) * (g - b));
    let hue = if denominator <= f32::EPSILON {
        0.0
    } else {
        let theta = acosf((numerator / denominator).clamp(-1.0, 1.0)) * 180.0 / PI;
        if b > g { 360.0 - theta } else { theta }
    };

    Hsi {
        hue: normalize_hue(hue),
        saturation,
        intensity,
    }
}
