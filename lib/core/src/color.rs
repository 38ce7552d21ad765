//! Color value types
//!
//! Hex is the canonical representation of a paint color. RGB and HSL are
//! always derived from it; [`ColorSpec`] refuses explicit values that
//! disagree with the hex code.

use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex pattern"));

/// Round to 4 decimal places, ties to even
#[inline]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RgbColor {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbColor {
    /// Build a color from integer channels, each of which must be in 0..=255
    pub fn new(r: i32, g: i32, b: i32) -> Result<Self> {
        Ok(Self {
            r: channel("r", r)?,
            g: channel("g", g)?,
            b: channel("b", b)?,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Upper-case `#RRGGBB` form of this color
    pub fn to_hex(&self) -> HexColor {
        HexColor(format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b))
    }

    /// HSL in degrees and percent
    pub fn to_hsl(&self) -> HslColor {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // achromatic
            return HslColor { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        HslColor {
            h: h / 6.0 * 360.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

fn channel(name: &str, value: i32) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| Error::format(name, format!("must be between 0 and 255, got {value}")))
}

/// Hue in degrees, saturation and lightness in percent.
///
/// Equality compares components rounded to 4 decimal places so that values
/// read back from storage compare equal to freshly derived ones.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HslColor {
    h: f64,
    s: f64,
    l: f64,
}

impl HslColor {
    pub fn new(h: f64, s: f64, l: f64) -> Result<Self> {
        if !(0.0..=360.0).contains(&h) {
            return Err(Error::format("h", format!("must be between 0 and 360, got {h}")));
        }
        if !(0.0..=100.0).contains(&s) {
            return Err(Error::format("s", format!("must be between 0 and 100, got {s}")));
        }
        if !(0.0..=100.0).contains(&l) {
            return Err(Error::format("l", format!("must be between 0 and 100, got {l}")));
        }
        Ok(Self { h, s, l })
    }

    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    #[inline]
    pub fn s(&self) -> f64 {
        self.s
    }

    #[inline]
    pub fn l(&self) -> f64 {
        self.l
    }
}

impl PartialEq for HslColor {
    fn eq(&self, other: &Self) -> bool {
        round4(self.h) == round4(other.h)
            && round4(self.s) == round4(other.s)
            && round4(self.l) == round4(other.l)
    }
}

/// A `#RRGGBB` hex code, kept exactly as supplied
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !HEX_PATTERN.is_match(&value) {
            return Err(Error::format("hex", format!("must be in the format '#RRGGBB', got '{value}'")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the three byte pairs
    pub fn to_rgb(&self) -> RgbColor {
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        RgbColor::from_u8(byte(1), byte(3), byte(5))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a `#RRGGBB` code to RGB
pub fn hex_to_rgb(hex: &str) -> Result<RgbColor> {
    Ok(HexColor::new(hex)?.to_rgb())
}

/// Convert a `#RRGGBB` code to HSL
pub fn hex_to_hsl(hex: &str) -> Result<HslColor> {
    Ok(hex_to_rgb(hex)?.to_hsl())
}

/// Hex, RGB and HSL views of one color, all derived from the hex code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSpec {
    hex: HexColor,
    rgb: RgbColor,
    hsl: HslColor,
}

impl ColorSpec {
    /// Build a color spec from its hex code.
    ///
    /// `rgb` and `hsl`, when given, must equal the values derived from `hex`;
    /// otherwise construction fails with [`Error::Invariant`].
    pub fn new(hex: &str, rgb: Option<RgbColor>, hsl: Option<HslColor>) -> Result<Self> {
        if hex.trim().is_empty() {
            return Err(Error::format("hex", "cannot be empty"));
        }
        let hex = HexColor::new(hex)?;
        let derived_rgb = hex.to_rgb();
        let derived_hsl = derived_rgb.to_hsl();

        if rgb.is_some_and(|rgb| rgb != derived_rgb) {
            return Err(Error::Invariant { field: "rgb".to_string() });
        }
        if hsl.is_some_and(|hsl| hsl != derived_hsl) {
            return Err(Error::Invariant { field: "hsl".to_string() });
        }

        Ok(Self {
            hex,
            rgb: derived_rgb,
            hsl: derived_hsl,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(hex, None, None)
    }

    pub fn hex(&self) -> &HexColor {
        &self.hex
    }

    pub fn rgb(&self) -> RgbColor {
        self.rgb
    }

    pub fn hsl(&self) -> HslColor {
        self.hsl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000").unwrap(), RgbColor::from_u8(255, 0, 0));
        assert_eq!(hex_to_rgb("#336699").unwrap(), RgbColor::from_u8(0x33, 0x66, 0x99));
        assert_eq!(hex_to_rgb("#a0b1c2").unwrap(), RgbColor::from_u8(0xA0, 0xB1, 0xC2));
    }

    #[test]
    fn test_hex_rejects_bad_format() {
        for bad in ["", "FF0000", "#FF000", "#FF00000", "#GG0000", " #FF0000", "#FF0000 "] {
            let err = hex_to_rgb(bad).unwrap_err();
            assert!(matches!(err, Error::Format { .. }), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#12AB9F", "#FF1100", "#7F7F80"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb.to_hex().as_str(), hex);
        }
        // lower-case input reconstructs the same channels
        let rgb = hex_to_rgb("#abcdef").unwrap();
        assert!(rgb.to_hex().as_str().eq_ignore_ascii_case("#abcdef"));
    }

    #[test]
    fn test_hex_kept_verbatim() {
        let lower = HexColor::new("#abcdef").unwrap();
        let upper = HexColor::new("#ABCDEF").unwrap();
        assert_eq!(lower.as_str(), "#abcdef");
        assert_ne!(lower, upper);
        assert_eq!(lower.to_rgb(), upper.to_rgb());
    }

    #[test]
    fn test_hex_to_hsl() {
        let red = hex_to_hsl("#FF0000").unwrap();
        assert_eq!(red, HslColor::new(0.0, 100.0, 50.0).unwrap());

        let blue_grey = hex_to_hsl("#336699").unwrap();
        assert_eq!(blue_grey, HslColor::new(210.0, 50.0, 40.0).unwrap());

        // hue wraps for magenta-ish reds where blue > green
        let pink = hex_to_hsl("#FF0080").unwrap();
        assert!(pink.h() > 329.0 && pink.h() < 360.0);
    }

    #[test]
    fn test_achromatic_hsl() {
        let grey = hex_to_hsl("#808080").unwrap();
        assert_eq!(grey.h(), 0.0);
        assert_eq!(grey.s(), 0.0);
        assert!((grey.l() - 50.196).abs() < 0.001);

        let black = hex_to_hsl("#000000").unwrap();
        assert_eq!(black, HslColor::new(0.0, 0.0, 0.0).unwrap());
    }

    #[test]
    fn test_rgb_range() {
        assert!(RgbColor::new(0, 0, 0).is_ok());
        assert!(RgbColor::new(255, 255, 255).is_ok());

        let err = RgbColor::new(256, 0, 0).unwrap_err();
        assert!(matches!(err, Error::Format { ref field, .. } if field == "r"));
        let err = RgbColor::new(0, -1, 0).unwrap_err();
        assert!(matches!(err, Error::Format { ref field, .. } if field == "g"));
    }

    #[test]
    fn test_hsl_range() {
        assert!(HslColor::new(360.0, 100.0, 100.0).is_ok());
        assert!(HslColor::new(-0.1, 0.0, 0.0).is_err());
        assert!(HslColor::new(0.0, 100.5, 0.0).is_err());
        assert!(HslColor::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_hsl_equality_tolerates_noise() {
        let a = HslColor::new(210.0, 50.0, 40.0).unwrap();
        let b = HslColor::new(210.000_01, 49.999_99, 40.000_001).unwrap();
        let c = HslColor::new(210.001, 50.0, 40.0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_color_spec_derives_from_hex() {
        let spec = ColorSpec::from_hex("#336699").unwrap();
        assert_eq!(spec.hex().as_str(), "#336699");
        assert_eq!(spec.rgb(), RgbColor::from_u8(0x33, 0x66, 0x99));
        assert_eq!(spec.hsl(), HslColor::new(210.0, 50.0, 40.0).unwrap());
    }

    #[test]
    fn test_color_spec_accepts_matching_components() {
        let rgb = RgbColor::from_u8(0x33, 0x66, 0x99);
        let hsl = HslColor::new(210.0, 50.0, 40.0).unwrap();
        let spec = ColorSpec::new("#336699", Some(rgb), Some(hsl)).unwrap();
        assert_eq!(spec, ColorSpec::from_hex("#336699").unwrap());
    }

    #[test]
    fn test_color_spec_rejects_mismatch() {
        let err = ColorSpec::new("#336699", Some(RgbColor::from_u8(0x33, 0x66, 0x98)), None).unwrap_err();
        assert!(matches!(err, Error::Invariant { ref field } if field == "rgb"));

        let hsl = HslColor::new(211.0, 50.0, 40.0).unwrap();
        let err = ColorSpec::new("#336699", None, Some(hsl)).unwrap_err();
        assert!(matches!(err, Error::Invariant { ref field } if field == "hsl"));
    }

    #[test]
    fn test_color_spec_rejects_empty_hex() {
        assert!(matches!(ColorSpec::from_hex("   ").unwrap_err(), Error::Format { .. }));
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.234_56), 1.2346);
        assert_eq!(round4(0.0), 0.0);
        assert_eq!(round4(86.608_249), 86.6082);
    }
}
