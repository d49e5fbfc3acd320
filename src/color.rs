//! Tile color derivation.
//!
//! A tile starts from its soil's base color. Vegetation pulls saturation toward
//! the maximum and human presence pulls brightness toward a dim floor; hue is
//! never touched.

use serde::{Deserialize, Serialize};

use crate::soil::{SoilType, MAX_LEVEL};

/// Saturation reached at the densest vegetation level.
pub const MAX_SATURATION: f32 = 1.0;
/// Brightness reached at the highest human-presence level.
pub const MIN_HUMAN_VALUE: f32 = 0.3;

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsv(self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == self.r {
            let h = 60.0 * (((self.g - self.b) / delta) % 6.0);
            if h < 0.0 {
                h + 360.0
            } else {
                h
            }
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };
        let s = if max > 0.0 { delta / max } else { 0.0 };

        Hsv { h, s, v: max }
    }

    /// 8-bit channels, e.g. for image export.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(r + m, g + m, b + m)
    }
}

/// Exact at both ends: `t == 0` yields `a`, `t == 1` yields `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn level_fraction(level: u8) -> f32 {
    f32::from(level.min(MAX_LEVEL)) / f32::from(MAX_LEVEL)
}

/// Interpolated HSV for a tile, before conversion back to RGB.
pub fn derive_hsv(soil: SoilType, vegetation: u8, human_presence: u8) -> Hsv {
    let base = soil.base_color().to_hsv();
    Hsv {
        h: base.h,
        s: lerp(base.s, MAX_SATURATION, level_fraction(vegetation)),
        v: lerp(base.v, MIN_HUMAN_VALUE, level_fraction(human_presence)),
    }
}

pub fn derive_color(soil: SoilType, vegetation: u8, human_presence: u8) -> Rgb {
    // The f32 HSV round trip is not lossless, so untouched tiles keep the
    // palette color verbatim.
    if vegetation == 0 && human_presence == 0 {
        return soil.base_color();
    }
    derive_hsv(soil, vegetation, human_presence).to_rgb()
}
