//! Pattern descriptors written by the host.
//!
//! A descriptor is a JSON object selecting a pattern by `mode`:
//! `{"mode":"solid","color":[255,0,0]}`,
//! `{"mode":"gradient","c1":[255,0,0],"c2":[0,0,255],"steps":50,"wait_ms":50}`.
//! Unknown modes select the gradient pulse. Unknown fields are ignored.

use embassy_time::Duration;
use heapless::{String as HString, Vec};
use serde::Deserialize;

use crate::{
    color::{Rgb, Rgbw, rgb_to_rgbw},
    error::ConfigurationError,
    pattern::{HuePalette, Landmarks, PatternKind, default_palettes},
};

const DEFAULT_WAIT_MS: u16 = 50;
const DEFAULT_GRADIENT_STEPS: u16 = 50;

type ChannelList = Vec<u8, 8>;

#[derive(Deserialize)]
struct RawDescriptor {
    mode: HString<32>,
    #[serde(default)]
    color: Option<ChannelList>,
    #[serde(default)]
    c1: Option<ChannelList>,
    #[serde(default)]
    c2: Option<ChannelList>,
    #[serde(default)]
    steps: Option<u16>,
    #[serde(default)]
    wait_ms: Option<u16>,
    #[serde(default)]
    palettes: Option<Vec<HuePalette, 4>>,
    #[serde(default)]
    whitecaps: Option<bool>,
}

/// Validated parameters for one pattern instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternConfig {
    Solid {
        color: Rgbw,
    },
    GradientPulse {
        from: Rgbw,
        to: Rgbw,
        steps: u16,
        wait: Duration,
    },
    Rainbow {
        wait: Duration,
    },
    Pacifica {
        wait: Duration,
        palettes: [HuePalette; 4],
        whitecaps: bool,
    },
    PowerOn(Landmarks),
}

impl PatternConfig {
    /// Rainbow with the default frame delay
    pub fn rainbow() -> Self {
        Self::Rainbow {
            wait: Duration::from_millis(u64::from(DEFAULT_WAIT_MS)),
        }
    }

    /// Pacifica with the built-in palettes and no whitecaps
    pub fn pacifica() -> Self {
        Self::Pacifica {
            wait: Duration::from_millis(u64::from(DEFAULT_WAIT_MS)),
            palettes: default_palettes(),
            whitecaps: false,
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Solid { .. } => PatternKind::Solid,
            Self::GradientPulse { .. } => PatternKind::GradientPulse,
            Self::Rainbow { .. } => PatternKind::Rainbow,
            Self::Pacifica { .. } => PatternKind::Pacifica,
            Self::PowerOn(_) => PatternKind::PowerOn,
        }
    }

    /// Decode a descriptor. Trailing newlines and NUL padding are ignored.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigurationError> {
        let (raw, _) = serde_json_core::from_slice::<RawDescriptor>(trim_padding(data))
            .map_err(ConfigurationError::Malformed)?;
        let wait = Duration::from_millis(u64::from(raw.wait_ms.unwrap_or(DEFAULT_WAIT_MS)));

        Ok(match PatternKind::from_mode(&raw.mode) {
            PatternKind::Solid => Self::Solid {
                color: required_color("color", raw.color.as_deref())?,
            },
            PatternKind::Rainbow => Self::Rainbow { wait },
            PatternKind::Pacifica => {
                let mut palettes = default_palettes();
                for (idx, (slot, hues)) in palettes
                    .iter_mut()
                    .zip(raw.palettes.unwrap_or_default())
                    .enumerate()
                {
                    if hues.is_empty() {
                        return Err(ConfigurationError::EmptyPalette(idx));
                    }
                    *slot = hues;
                }
                Self::Pacifica {
                    wait,
                    palettes,
                    whitecaps: raw.whitecaps.unwrap_or(false),
                }
            }
            PatternKind::PowerOn => Self::PowerOn(Landmarks::DEFAULT),
            PatternKind::GradientPulse => Self::GradientPulse {
                from: required_color("c1", raw.c1.as_deref())?,
                to: required_color("c2", raw.c2.as_deref())?,
                steps: raw.steps.unwrap_or(DEFAULT_GRADIENT_STEPS).max(1),
                wait,
            },
        })
    }
}

fn trim_padding(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|byte| !matches!(byte, 0 | b'\n' | b'\r' | b' '))
        .map_or(0, |idx| idx + 1);
    &data[..end]
}

fn required_color(
    field: &'static str,
    channels: Option<&[u8]>,
) -> Result<Rgbw, ConfigurationError> {
    match channels.ok_or(ConfigurationError::MissingField(field))? {
        [r, g, b] => Ok(rgb_to_rgbw(Rgb::new(*r, *g, *b), false)),
        [r, g, b, w] => Ok(Rgbw::new(*r, *g, *b, *w)),
        other => Err(ConfigurationError::ColorArity {
            field,
            len: other.len(),
        }),
    }
}
