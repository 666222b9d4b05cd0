//! Circular pixel surface with a staging buffer and explicit commit
//!
//! Drawing calls only touch the staging buffer. [`PixelSurface::show`] applies
//! the per-pixel brightness mask and the hardware channel order, then hands
//! the frame to the [`LedDriver`] in one write.

use crate::{
    LedDriver,
    color::{Color, Rgbw},
    math8::scale8,
};

/// Channel order expected by the physical strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgbw,
    /// Red and green swapped, common on SK6812 RGBW strips
    Grbw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceConfig {
    pub channel_order: ChannelOrder,
}

/// Iterator over board-relative pixel indices walking around the ring
#[derive(Debug, Clone)]
pub struct BoardRange {
    next: usize,
    remaining: usize,
    len: usize,
    clockwise: bool,
}

impl BoardRange {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn new(start: i32, end: i32, clockwise: bool, len: usize) -> Self {
        let ring = len as i64;
        let start_slot = i64::from(start).rem_euclid(ring);
        let mut distance = if clockwise {
            i64::from(end) - i64::from(start)
        } else {
            i64::from(start) - i64::from(end)
        };
        if distance < 0 {
            distance = distance.rem_euclid(ring);
        }

        Self {
            next: start_slot as usize,
            remaining: distance.min(ring) as usize,
            len,
            clockwise,
        }
    }
}

impl Iterator for BoardRange {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        self.next = if self.clockwise {
            (current + 1) % self.len
        } else {
            (current + self.len - 1) % self.len
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BoardRange {}

/// Fixed-length ring of RGBW pixels bound to an output driver
pub struct PixelSurface<D: LedDriver, const N: usize> {
    driver: D,
    pixels: [Rgbw; N],
    brightness_mask: [u8; N],
    output: [Rgbw; N],
    channel_order: ChannelOrder,
}

impl<D: LedDriver, const N: usize> PixelSurface<D, N> {
    /// All pixels start black with a full brightness mask
    pub fn new(driver: D, config: SurfaceConfig) -> Self {
        const { assert!(N > 0, "a pixel surface needs at least one pixel") };
        Self {
            driver,
            pixels: [Rgbw::BLACK; N],
            brightness_mask: [u8::MAX; N],
            output: [Rgbw::BLACK; N],
            channel_order: config.channel_order,
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Map any board-relative index onto the ring
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn board_pixel(&self, index: i32) -> usize {
        i64::from(index).rem_euclid(N as i64) as usize
    }

    /// Pixels from `start` towards `end` (exclusive) in the given direction,
    /// wrapping across the seam. Never longer than the ring.
    pub fn board_pixel_range(&self, start: i32, end: i32, clockwise: bool) -> BoardRange {
        BoardRange::new(start, end, clockwise, N)
    }

    /// Staged (uncommitted) value of a pixel
    pub fn pixel(&self, index: i32) -> Rgbw {
        self.pixels[self.board_pixel(index)]
    }

    /// The whole staged frame, in logical channel order
    pub fn pixels(&self) -> &[Rgbw; N] {
        &self.pixels
    }

    /// Stage `color` on every pixel
    pub fn fill(&mut self, color: impl Into<Color>) {
        self.pixels.fill(color.into().to_rgbw());
    }

    /// Stage one pixel; `index` wraps around the ring
    pub fn set_pixel(&mut self, index: i32, color: impl Into<Color>) {
        let slot = self.board_pixel(index);
        self.pixels[slot] = color.into().to_rgbw();
    }

    /// Add onto the staged value, saturating per channel
    pub fn add_pixel(&mut self, index: i32, color: impl Into<Color>) {
        let slot = self.board_pixel(index);
        self.pixels[slot] = self.pixels[slot].saturating_add(color.into().to_rgbw());
    }

    /// Stage `color` on every pixel of [`board_pixel_range`](Self::board_pixel_range)
    pub fn set_range(&mut self, start: i32, end: i32, color: impl Into<Color>, clockwise: bool) {
        let color = color.into().to_rgbw();
        for slot in BoardRange::new(start, end, clockwise, N) {
            self.pixels[slot] = color;
        }
    }

    /// Draw `start..end` clockwise with soft edges.
    ///
    /// Pixels at least `feather` steps from both ends get `color`; the
    /// outermost `feather` pixels on each side blend from the existing value
    /// towards `color`. When the range is too short for a solid core the whole
    /// range is feathered.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_feathered_range(
        &mut self,
        start: i32,
        end: i32,
        color: impl Into<Color>,
        feather: u16,
    ) {
        let color = color.into().to_rgbw();
        let range = BoardRange::new(start, end, true, N);
        let len = range.len();
        let feather = usize::from(feather);

        for (position, slot) in range.enumerate() {
            let edge_distance = position.min(len - 1 - position);
            self.pixels[slot] = if edge_distance >= feather {
                color
            } else {
                let t = (edge_distance + 1) as f32 / (feather + 1) as f32;
                self.pixels[slot].lerp(color, t)
            };
        }
    }

    /// Per-pixel output scale applied at commit, 255 = unchanged
    pub fn set_brightness_mask(&mut self, index: i32, value: u8) {
        let slot = self.board_pixel(index);
        self.brightness_mask[slot] = value;
    }

    /// Current mask value of a pixel
    pub fn brightness_mask(&self, index: i32) -> u8 {
        self.brightness_mask[self.board_pixel(index)]
    }

    /// Commit the staged frame to the driver
    pub fn show(&mut self) {
        for ((out, pixel), mask) in self
            .output
            .iter_mut()
            .zip(self.pixels.iter())
            .zip(self.brightness_mask.iter())
        {
            let [r, g, b, w] = pixel.channels().map(|channel| scale8(channel, *mask));
            *out = match self.channel_order {
                ChannelOrder::Rgbw => Rgbw::new(r, g, b, w),
                ChannelOrder::Grbw => Rgbw::new(g, r, b, w),
            };
        }
        self.driver.write(&self.output);
    }

    /// Underlying LED driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
