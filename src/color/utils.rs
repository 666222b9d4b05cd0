use super::{Color, Rgb, clamp_unit, to_channel};
use crate::error::ArityError;

/// Blend two colors of the same arity.
///
/// `t` is clamped to `[0, 1]`; each channel is rounded half away from zero.
pub fn linear_interpolate(a: Color, b: Color, t: f32) -> Result<Color, ArityError> {
    let t = clamp_unit(t);
    let blend = |from: u8, to: u8| {
        let from = f32::from(from);
        to_channel(from + (f32::from(to) - from) * t)
    };

    match (a, b) {
        (Color::Rgb(a), Color::Rgb(b)) => Ok(Color::Rgb(Rgb::new(
            blend(a.r, b.r),
            blend(a.g, b.g),
            blend(a.b, b.b),
        ))),
        (Color::Rgbw(a), Color::Rgbw(b)) => Ok(Color::Rgbw(a.lerp(b, t))),
        (a, b) => Err(ArityError {
            left: a.arity(),
            right: b.arity(),
        }),
    }
}

/// Classic 256-step color wheel: red -> green -> blue -> red
pub const fn wheel(position: u8) -> Rgb {
    if position < 85 {
        Rgb::new(position * 3, 255 - position * 3, 0)
    } else if position < 170 {
        let position = position - 85;
        Rgb::new(255 - position * 3, 0, position * 3)
    } else {
        let position = position - 170;
        Rgb::new(0, position * 3, 255 - position * 3)
    }
}
