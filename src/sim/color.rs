//! Normalized RGB colors and contact blending
//!
//! Blending happens in HSV space so two touching balls drift toward a vivid
//! in-between hue instead of a grey average.

use palette::{FromColor, Hsv, RgbHue, Srgb};
use serde::{Deserialize, Serialize};

/// Saturation below this (with value above `WASHOUT_VALUE`) counts as near-white
const WASHOUT_SATURATION: f32 = 0.15;
const WASHOUT_VALUE: f32 = 0.85;

/// An RGB color with every channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from hue (turns, wraps), saturation and value
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hsv: Hsv = Hsv::new(
            RgbHue::from_degrees(hue.rem_euclid(1.0) * 360.0),
            saturation,
            value,
        );
        let rgb: Srgb = Srgb::from_color(hsv);
        Self::new(rgb.red, rgb.green, rgb.blue).clamped()
    }

    /// Hue in turns [0, 1), saturation, value
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let hsv: Hsv = Hsv::from_color(Srgb::new(self.r, self.g, self.b));
        let hue = (hsv.hue.into_positive_degrees() / 360.0).rem_euclid(1.0);
        (hue, hsv.saturation, hsv.value)
    }

    /// Clamp every channel into [0, 1]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// True when every channel is a finite value in [0, 1]
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// 8-bit channels for drawing (clamped, truncated)
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
        ]
    }

    /// Max per-channel difference
    pub fn distance(&self, other: &Color) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

/// Blend two colors the way touching balls mix
///
/// Hue moves halfway along the shorter arc, saturation and value lean toward
/// the stronger input, and near-white results get pulled back into color.
pub fn blend(a: Color, b: Color) -> Color {
    let (h1, s1, v1) = a.to_hsv();
    let (h2, s2, v2) = b.to_hsv();

    // Hue difference wrapped into [-0.5, 0.5)
    let hue_diff = (h2 - h1 + 0.5).rem_euclid(1.0) - 0.5;
    let hue = (h1 + hue_diff * 0.5).rem_euclid(1.0);

    let mut saturation = ((s1 + s2) / 2.0 + 0.2 * (s1 - s2).abs()).min(1.0);
    let mut value = (v1.max(v2) * 0.9 + (v1 + v2) / 2.0 * 0.1).min(1.0);

    if saturation < WASHOUT_SATURATION && value > WASHOUT_VALUE {
        saturation = 0.25;
        value = (value - 0.1).max(0.7);
    }

    Color::from_hsv(hue, saturation, value)
}
