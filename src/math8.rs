//! Fixed-point helpers shared by the wave library and the patterns

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale a 16-bit value by a 16-bit factor (0-65535 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale16(value: u16, scale: u16) -> u16 {
    ((value as u32 * (1 + scale as u32)) >> 16) as u16
}

/// Saturating 8-bit add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Map a signed 16-bit sample onto `0..=65535`
#[inline]
#[allow(clippy::cast_sign_loss)]
pub const fn offset16(value: i16) -> u16 {
    (value as i32 + 32768) as u16
}
