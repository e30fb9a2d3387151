//! Accent colour generation for reply embeds
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add `ColourMode::Random` for fully random accents
//! - 1.0.0: Pastel HSV generator

use anyhow::{bail, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Accent used for failure replies
pub const ERROR_RED: u32 = 0xE74C3C;

/// Largest valid 24-bit RGB value
pub const MAX_RGB: u32 = 0xFF_FFFF;

/// Fixed HSV value for pastel accents
pub const PASTEL_VALUE: f64 = 0.95;
pub const PASTEL_SATURATION_MIN: f64 = 0.6;
pub const PASTEL_SATURATION_MAX: f64 = 0.8;

/// How accents are picked when a caller does not supply one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMode {
    /// Bright pastel tones (random hue, saturation 60-80%, value 95%)
    #[default]
    Pastel,
    /// Uniform pick over the whole 24-bit RGB space
    Random,
}

impl FromStr for ColourMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pastel" => Ok(ColourMode::Pastel),
            "random" => Ok(ColourMode::Random),
            other => bail!("Unknown colour mode '{other}' (expected 'pastel' or 'random')"),
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourMode::Pastel => write!(f, "pastel"),
            ColourMode::Random => write!(f, "random"),
        }
    }
}

/// Clamp `value` into the inclusive range `[lo, hi]`
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(value.min(hi))
}

/// Pick an accent colour using the thread-local RNG
pub fn random_colour(mode: ColourMode) -> u32 {
    random_colour_with(&mut rand::rng(), mode)
}

/// Pick an accent colour from the given RNG
pub fn random_colour_with<R: Rng>(rng: &mut R, mode: ColourMode) -> u32 {
    match mode {
        ColourMode::Pastel => {
            let hue = rng.random_range(0.0..360.0);
            let saturation = rng.random_range(PASTEL_SATURATION_MIN..=PASTEL_SATURATION_MAX);
            hsv_to_rgb(hue, saturation, PASTEL_VALUE)
        }
        ColourMode::Random => rng.random_range(0..=MAX_RGB),
    }
}

/// Convert HSV to a packed `0xRRGGBB` integer
///
/// `hue` is in degrees (wrapped into [0, 360)), `saturation` and `value` are
/// clamped into [0, 1].
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> u32 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = clamp(saturation, 0.0, 1.0);
    let v = clamp(value, 0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    (to_channel(r + m) << 16) | (to_channel(g + m) << 8) | to_channel(b + m)
}

/// Decompose a packed `0xRRGGBB` integer into (hue degrees, saturation, value)
pub fn rgb_to_hsv(rgb: u32) -> (f64, f64, f64) {
    let r = f64::from((rgb >> 16) & 0xFF) / 255.0;
    let g = f64::from((rgb >> 8) & 0xFF) / 255.0;
    let b = f64::from(rgb & 0xFF) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

fn to_channel(component: f64) -> u32 {
    (clamp(component, 0.0, 1.0) * 255.0).round() as u32
}
