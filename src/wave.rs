//! Integer sine approximations and time-driven beat oscillators.
//!
//! All beat functions take the caller's `now` so frames are reproducible in
//! tests. Beat rates below 256 are whole beats per minute; larger values are
//! read as Q8.8 fixed point.

use embassy_time::Instant;

use crate::math8::{offset16, scale8, scale16};

const SIN16_BASE: [u16; 8] = [0, 6393, 12539, 18204, 23170, 27245, 30273, 32137];
const SIN16_SLOPE: [u8; 8] = [49, 48, 44, 38, 31, 23, 14, 4];
const SIN8_INTERLEAVE: [u8; 8] = [0, 49, 49, 41, 90, 27, 117, 10];

/// Fast 16-bit sine: `0..=65535` maps to one full turn, output in `-32767..=32767`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless
)]
pub const fn sin16(theta: u16) -> i16 {
    let mut offset = (theta & 0x3FFF) >> 3;
    if theta & 0x4000 != 0 {
        offset = 2047 - offset;
    }

    let section = (offset / 256) as usize;
    let base = SIN16_BASE[section];
    let slope = SIN16_SLOPE[section] as u16;
    let section_offset = (offset as u8) / 2;

    let y = (slope * section_offset as u16 + base) as i16;
    if theta & 0x8000 != 0 { -y } else { y }
}

/// Fast 8-bit sine: `0..=255` maps to one full turn, output centered on 128
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub const fn sin8(theta: u8) -> u8 {
    let mut offset = theta;
    if theta & 0x40 != 0 {
        offset = 255 - offset;
    }
    offset &= 0x3F;

    let mut section_offset = offset & 0x0F;
    if theta & 0x40 != 0 {
        section_offset += 1;
    }

    let section = (offset >> 4) as usize * 2;
    let base = SIN8_INTERLEAVE[section];
    let slope = SIN8_INTERLEAVE[section + 1];
    let mx = ((slope as u16 * section_offset as u16) >> 4) as u8;

    let mut y = mx.wrapping_add(base) as i8;
    if theta & 0x80 != 0 {
        y = y.wrapping_neg();
    }
    (y as i16 + 128) as u8
}

/// Sawtooth that wraps `bpm88` (Q8.8 beats per minute) times a minute
#[allow(clippy::cast_possible_truncation)]
pub fn beat88(bpm88: u16, now: Instant) -> u16 {
    let ms = u64::from(now.as_millis() as u32);
    ((ms * u64::from(bpm88) * 280) >> 16) as u16
}

/// 16-bit sawtooth at `bpm` beats per minute
pub fn beat16(bpm: u16, now: Instant) -> u16 {
    let bpm88 = if bpm < 256 { bpm << 8 } else { bpm };
    beat88(bpm88, now)
}

/// 8-bit sawtooth at `bpm` beats per minute
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(bpm: u16, now: Instant) -> u8 {
    (beat16(bpm, now) >> 8) as u8
}

/// Sine oscillating between `low` and `high` at a Q8.8 rate
pub fn beatsin88(bpm88: u16, low: u16, high: u16, now: Instant) -> u16 {
    let sample = offset16(sin16(beat88(bpm88, now)));
    low.wrapping_add(scale16(sample, high.wrapping_sub(low)))
}

/// Sine oscillating between `low` and `high` at `bpm` beats per minute
pub fn beatsin16(bpm: u16, low: u16, high: u16, now: Instant) -> u16 {
    let sample = offset16(sin16(beat16(bpm, now)));
    low.wrapping_add(scale16(sample, high.wrapping_sub(low)))
}

/// 8-bit variant of [`beatsin16`]
pub fn beatsin8(bpm: u16, low: u8, high: u8, now: Instant) -> u8 {
    let sample = sin8(beat8(bpm, now));
    low.wrapping_add(scale8(sample, high.wrapping_sub(low)))
}
