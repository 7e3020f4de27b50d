use std::{fmt, str::FromStr};

use crate::foundation::{
    error::{LuminaError, LuminaResult},
    math::channel_u8,
};

/// Straight 8-bit-per-channel RGB.
///
/// Serialized as a `#rrggbb` string so project files stay readable and match
/// what the editor writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Display color for an LED no cue is driving (`#333333`).
    pub const IDLE: Rgb = Rgb::new(0x33, 0x33, 0x33);

    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`; bits above 24 are ignored.
    pub const fn from_packed(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Pack as `0xRRGGBB`.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// True when every channel is zero.
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> LuminaResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LuminaError::validation(format!(
                "color '{s}' must be a #rrggbb hex string"
            )));
        }
        let v = u32::from_str_radix(hex, 16)
            .map_err(|e| LuminaError::validation(format!("color '{s}': {e}")))?;
        Ok(Self::from_packed(v))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation from `self` (`t = 0`) to `other` (`t = 1`).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        fn mix(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            channel_u8(a + (f64::from(b) - a) * t)
        }
        Rgb::new(
            mix(self.r, other.r, t),
            mix(self.g, other.g, t),
            mix(self.b, other.b, t),
        )
    }

    /// Scale every channel by `factor`.
    pub fn dim(self, factor: f64) -> Rgb {
        Rgb::new(
            channel_u8(f64::from(self.r) * factor),
            channel_u8(f64::from(self.g) * factor),
            channel_u8(f64::from(self.b) * factor),
        )
    }

    /// HSL to RGB, all inputs in `[0, 1]`.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Rgb {
        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };
        Rgb::new(
            channel_u8(r * 255.0),
            channel_u8(g * 255.0),
            channel_u8(b * 255.0),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = LuminaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Rgb::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Resolved state of one LED at one instant.
///
/// `Idle` means no active cue contributed any light. It is kept apart from
/// `Lit(Rgb::BLACK)` and from a cue that happens to produce `#333333`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedState {
    /// No active cue contributed.
    Idle,
    /// Clamped sum of the contributions.
    Lit(Rgb),
}

impl LedState {
    /// True for [`LedState::Idle`].
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Color a preview renderer should draw.
    pub fn display_rgb(self) -> Rgb {
        match self {
            Self::Idle => Rgb::IDLE,
            Self::Lit(c) => c,
        }
    }

    /// Color the physical LED should show (idle LEDs are off).
    pub fn output_rgb(self) -> Rgb {
        match self {
            Self::Idle => Rgb::BLACK,
            Self::Lit(c) => c,
        }
    }
}

/// Unclamped additive accumulator for one LED.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChannelSum {
    r: u32,
    g: u32,
    b: u32,
}

impl ChannelSum {
    pub(crate) fn add(&mut self, c: Rgb) {
        self.r += u32::from(c.r);
        self.g += u32::from(c.g);
        self.b += u32::from(c.b);
    }

    /// Clamp once at the end; an all-zero total is idle.
    pub(crate) fn finish(self) -> LedState {
        let clamp = |v: u32| v.min(255) as u8;
        let rgb = Rgb::new(clamp(self.r), clamp(self.g), clamp(self.b));
        if rgb.is_black() {
            LedState::Idle
        } else {
            LedState::Lit(rgb)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
