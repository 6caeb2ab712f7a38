//! # Block Color Module
//!
//! Voxel faces are painted with a (hue, brightness) pair. The hue runs around a
//! six-sector color wheel where each sector has width 1.0, so hues live in `[0, 6)`
//! and wrap outside that range. Brightness 1.0 is the pure wheel color; lower values
//! darken toward black and higher values (up to 2.0) wash out toward white.

use serde::{Deserialize, Serialize};

/// Number of sectors on the hue wheel.
pub const HUE_SECTORS: f32 = 6.0;

/// An RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

/// A face color expressed on the hue wheel.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HueBrightness {
    /// Position on the wheel; `0` red, `2` green, `4` blue.
    pub hue: f32,
    /// `0` is black, `1` the pure hue, `2` white.
    pub brightness: f32,
}

impl Default for HueBrightness {
    fn default() -> Self {
        HueBrightness {
            hue: 0.0,
            brightness: 1.0,
        }
    }
}

impl HueBrightness {
    /// Creates a new hue/brightness pair.
    pub const fn new(hue: f32, brightness: f32) -> Self {
        HueBrightness { hue, brightness }
    }

    /// A random fully saturated hue at normal brightness.
    pub fn random() -> Self {
        HueBrightness::new(fastrand::f32() * HUE_SECTORS, 1.0)
    }

    /// Converts to an opaque RGBA color.
    ///
    /// # Returns
    /// The wheel color for `hue`, scaled toward black when `brightness < 1` and
    /// interpolated toward white when `brightness > 1`.
    pub fn to_rgba(&self) -> Rgba {
        let hue = self.hue.rem_euclid(HUE_SECTORS);
        // rem_euclid of a tiny negative hue rounds up to exactly HUE_SECTORS
        let hue = if hue >= HUE_SECTORS { 0.0 } else { hue };
        let sector = hue.floor();
        let f = hue - sector;

        let (r, g, b) = match sector as u32 {
            0 => (1.0, f, 0.0),
            1 => (1.0 - f, 1.0, 0.0),
            2 => (0.0, 1.0, f),
            3 => (0.0, 1.0 - f, 1.0),
            4 => (f, 0.0, 1.0),
            _ => (1.0, 0.0, 1.0 - f),
        };

        let brightness = self.brightness.clamp(0.0, 2.0);
        let shade = |c: f32| {
            if brightness < 1.0 {
                c * brightness
            } else {
                c + (1.0 - c) * (brightness - 1.0)
            }
        };

        Rgba([shade(r), shade(g), shade(b), 1.0])
    }
}
