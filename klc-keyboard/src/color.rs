//! Normalized RGBA colors and the firmware's fixed-point color deltas
//!
//! The controller animates between two colors by adding a per-tick delta to
//! an accumulator. Channel arithmetic in firmware is modulo-1 fixed point, so
//! a negative step is transmitted as `1.0 + step` and wraps back around.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Smallest decay window the firmware can represent, in ticks
pub const MIN_DELTA_DURATION: u16 = 0x21;

/// Ticks are spread over 16 sub-steps of a 255-step channel
const TICK_SUBSTEPS: f32 = 16.0;
const CHANNEL_STEPS: f32 = 255.0;

/// RGBA color with every channel clamped to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

/// Clamp a channel into `[0, 1]`, mapping NaN to 0 and `-0.0` to `0.0`
fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped == 0.0 {
        0.0
    } else {
        clamped
    }
}

fn to_byte(value: f32) -> u8 {
    (value * CHANNEL_STEPS).round() as u8
}

impl Color {
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
    pub const RED: Self = Self::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::opaque(0.0, 0.0, 1.0);

    const fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Create a color, clamping every channel
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
            alpha: clamp_channel(alpha),
        }
    }

    /// Opaque color from normalized channels
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            r as f32 / CHANNEL_STEPS,
            g as f32 / CHANNEL_STEPS,
            b as f32 / CHANNEL_STEPS,
        )
    }

    /// Re-clamp an existing color
    pub fn clamp(self) -> Self {
        Self::new(self.red, self.green, self.blue, self.alpha)
    }

    /// Parse `#RRGGBB`, `RRGGBB` or a basic color name
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::from_rgb8(r, g, b));
        }
        match s.to_ascii_lowercase().as_str() {
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "white" => Some(Self::WHITE),
            "black" | "off" => Some(Self::BLACK),
            "yellow" => Some(Self::rgb(1.0, 1.0, 0.0)),
            "cyan" => Some(Self::rgb(0.0, 1.0, 1.0)),
            "magenta" | "pink" => Some(Self::rgb(1.0, 0.0, 1.0)),
            "orange" => Some(Self::from_rgb8(255, 165, 0)),
            "purple" => Some(Self::from_rgb8(128, 0, 255)),
            _ => None,
        }
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// 8-bit red channel, rounded to nearest
    pub fn r8(&self) -> u8 {
        to_byte(self.red)
    }

    /// 8-bit green channel, rounded to nearest
    pub fn g8(&self) -> u8 {
        to_byte(self.green)
    }

    /// 8-bit blue channel, rounded to nearest
    pub fn b8(&self) -> u8 {
        to_byte(self.blue)
    }

    /// `[r, g, b]` as transmitted in key records
    pub fn rgb8(&self) -> [u8; 3] {
        [self.r8(), self.g8(), self.b8()]
    }

    /// Feed the channel bit patterns into a hasher
    ///
    /// Channels are never NaN and `-0.0` is normalized at construction, so
    /// bit equality agrees with `==`.
    pub(crate) fn hash_channels<H: Hasher>(&self, state: &mut H) {
        for channel in [self.red, self.green, self.blue, self.alpha] {
            channel.to_bits().hash(state);
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r8(), self.g8(), self.b8())
    }
}

fn divisible(duration: u16) -> f32 {
    duration.max(MIN_DELTA_DURATION) as f32 * TICK_SUBSTEPS / CHANNEL_STEPS
}

/// Per-tick delta that walks `source` to `target` over `duration` ticks
///
/// Durations below [`MIN_DELTA_DURATION`] (including 0) are raised to it.
/// The alpha channel is carried from `target`.
pub fn delta(source: Color, target: Color, duration: u16) -> Color {
    let div = divisible(duration);
    let step = |from: f32, to: f32| {
        let d = (to - from) / div;
        if d < 0.0 {
            d + 1.0
        } else {
            d
        }
    };
    Color::new(
        step(source.red, target.red),
        step(source.green, target.green),
        step(source.blue, target.blue),
        target.alpha,
    )
}

/// Reconstruct the target color from a stored delta
///
/// `divisible` is always above 2 for legal durations, so a reconstructed
/// channel outside `[0, 1]` can only mean the delta had wrapped.
pub fn undo_delta(source: Color, delta: Color, duration: u16) -> Color {
    let div = divisible(duration);
    let unstep = |from: f32, d: f32| {
        let direct = from + d * div;
        if direct > 1.0 + 1e-4 {
            from + (d - 1.0) * div
        } else {
            direct
        }
    };
    Color::new(
        unstep(source.red, delta.red),
        unstep(source.green, delta.green),
        unstep(source.blue, delta.blue),
        delta.alpha,
    )
}
