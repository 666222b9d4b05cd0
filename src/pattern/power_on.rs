use embassy_time::{Duration, Instant};

use super::{Pattern, Snap, Step};
use crate::{
    LedDriver,
    color::Rgbw,
    surface::{BoardRange, PixelSurface},
};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const BLANK_SETTLE: Duration = Duration::from_millis(1);

/// Physical reference points on the fixture, as board-relative pixel indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmarks {
    /// Where the start-up flash begins
    pub flash_origin: i32,
    /// Where the flash stops (exclusive, walking clockwise)
    pub flash_target: i32,
    /// First position of the growing line
    pub line_origin: i32,
    /// Last position of the growing line (exclusive)
    pub line_end: i32,
    /// Length of each drawn line segment
    pub line_length: i32,
    pub feather: u16,
}

impl Landmarks {
    pub const DEFAULT: Self = Self {
        flash_origin: 70,
        flash_target: 0,
        line_origin: 0,
        line_end: 60,
        line_length: 10,
        feather: 4,
    };
}

impl Default for Landmarks {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Blank,
    Flash(BoardRange),
    Line(BoardRange),
    Complete,
}

/// Start-up sequence: a full-intensity flash runs around the ring, then a feathered
/// line grows from the line origin. The steady state draws nothing.
#[derive(Debug, Clone)]
pub struct PowerOn {
    landmarks: Landmarks,
    stage: Stage,
    snap_out: Snap,
}

impl PowerOn {
    pub const fn new(landmarks: Landmarks) -> Self {
        Self {
            landmarks,
            stage: Stage::Blank,
            snap_out: Snap { shown: false },
        }
    }
}

impl Pattern for PowerOn {
    fn enter<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        let marks = self.landmarks;
        loop {
            match &mut self.stage {
                Stage::Blank => {
                    surface.fill(Rgbw::BLACK);
                    surface.show();
                    self.stage = Stage::Flash(surface.board_pixel_range(
                        marks.flash_origin,
                        marks.flash_target,
                        true,
                    ));
                    return Step::Sleep(BLANK_SETTLE);
                }
                Stage::Flash(range) => match range.next() {
                    Some(slot) => {
                        surface.fill(Rgbw::BLACK);
                        surface.set_pixel(to_index(slot), Rgbw::FULL);
                        surface.show();
                        return Step::Sleep(FRAME_INTERVAL);
                    }
                    None => {
                        self.stage = Stage::Line(surface.board_pixel_range(
                            marks.line_origin,
                            marks.line_end,
                            true,
                        ));
                    }
                },
                Stage::Line(range) => match range.next() {
                    Some(slot) => {
                        let start = to_index(slot);
                        surface.set_feathered_range(
                            start,
                            start.saturating_add(marks.line_length),
                            Rgbw::FULL,
                            marks.feather,
                        );
                        surface.show();
                        return Step::Sleep(FRAME_INTERVAL);
                    }
                    None => self.stage = Stage::Complete,
                },
                Stage::Complete => return Step::Done,
            }
        }
    }

    fn run<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        _surface: &mut PixelSurface<D, N>,
    ) -> Step {
        Step::Done
    }

    fn exit<D: LedDriver, const N: usize>(
        &mut self,
        _now: Instant,
        surface: &mut PixelSurface<D, N>,
    ) -> Step {
        self.snap_out.step(surface, Rgbw::BLACK)
    }
}

fn to_index(slot: usize) -> i32 {
    i32::try_from(slot).unwrap_or(i32::MAX)
}
