//! Color representations and RGB/HSL conversion
//!
//! Two representations are used for note colors:
//!
//! - [`Rgb`] - 8-bit channels, rendered as `#rrggbb`
//! - [`Hsl`] - hue in degrees, saturation and lightness in percent,
//!   rendered as `hsl(H, S%, L%)`
//!
//! Conversion between the two goes through `palette`'s sRGB/HSL types.
//! [`Hsl`] keeps full floating point precision so that converting to HSL and
//! back reproduces the source channels. Components are rounded to whole
//! degrees/percent only when rendered as CSS or via [`Hsl::rounded`].

use std::fmt;
use std::str::FromStr;

use palette::{IntoColor, Srgb};

use crate::{Error, Result};

/// `palette`'s HSL over the sRGB encoding, with `f64` components in `[0, 1]`
type SrgbHsl = palette::Hsl<palette::encoding::Srgb, f64>;

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Pure white, `#ffffff`
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorFormat`] if the string is not exactly a
    /// `#` followed by six hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::Rgb;
    ///
    /// let c = Rgb::from_hex("#db3132").unwrap();
    /// assert_eq!(c, Rgb::new(0xdb, 0x31, 0x32));
    /// assert!(Rgb::from_hex("db3132").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::invalid_color(hex))?;

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::invalid_color(hex))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as an `[r, g, b]` array
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from an `[r, g, b]` array
    pub fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }

    /// Convert to HSL
    ///
    /// Achromatic colors (all channels equal) get hue and saturation 0.
    pub fn to_hsl(&self) -> Hsl {
        let hsl: SrgbHsl = Srgb::new(self.r, self.g, self.b)
            .into_format::<f64>()
            .into_color();

        Hsl::new(
            hsl.hue.into_positive_degrees(),
            hsl.saturation * 100.0,
            hsl.lightness * 100.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

/// A color in hue/saturation/lightness form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`
    pub hue: f64,
    /// Saturation in percent, `[0, 100]`
    pub saturation: f64,
    /// Lightness in percent, `[0, 100]`
    pub lightness: f64,
}

impl Hsl {
    /// Create an HSL color
    ///
    /// Hue is wrapped into `[0, 360)`; saturation and lightness are clamped
    /// to `[0, 100]`.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
        }
    }

    /// Same hue and saturation with a different lightness (clamped to `[0, 100]`)
    pub fn with_lightness(&self, lightness: f64) -> Self {
        Self::new(self.hue, self.saturation, lightness)
    }

    /// Components rounded to whole degrees and percent
    ///
    /// A hue that rounds up to 360 wraps to 0.
    pub fn rounded(&self) -> Self {
        Self {
            hue: self.hue.round() % 360.0,
            saturation: self.saturation.round(),
            lightness: self.lightness.round(),
        }
    }

    /// Convert back to 8-bit RGB, rounding each channel to the nearest integer
    pub fn to_rgb(&self) -> Rgb {
        let hsl = SrgbHsl::new(self.hue, self.saturation / 100.0, self.lightness / 100.0);
        let rgb: Srgb<f64> = hsl.into_color();

        Rgb::new(
            to_channel(rgb.red),
            to_channel(rgb.green),
            to_channel(rgb.blue),
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rounded();
        write!(f, "hsl({}, {}%, {}%)", r.hue, r.saturation, r.lightness)
    }
}

impl FromStr for Hsl {
    type Err = Error;

    /// Parse `hsl(H, S%, L%)`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_color(s);

        let body = s
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let &[hue, sat, light] = parts.as_slice() else {
            return Err(invalid());
        };

        let number = |text: &str| -> Result<f64> {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };
        let percent = |text: &str| -> Result<f64> {
            let v = number(text.strip_suffix('%').ok_or_else(invalid)?)?;
            if (0.0..=100.0).contains(&v) {
                Ok(v)
            } else {
                Err(invalid())
            }
        };

        Ok(Hsl::new(number(hue)?, percent(sat)?, percent(light)?))
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// A display color, either form renders as a valid CSS color string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// `#rrggbb`
    Rgb(Rgb),
    /// `hsl(H, S%, L%)`
    Hsl(Hsl),
}

impl Color {
    /// Pure white, the idle background
    pub const WHITE: Color = Color::Rgb(Rgb::WHITE);

    /// This color as RGB (HSL colors are converted)
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Color::Rgb(rgb) => *rgb,
            Color::Hsl(hsl) => hsl.to_rgb(),
        }
    }

    /// This color as HSL (RGB colors are converted)
    pub fn to_hsl(&self) -> Hsl {
        match self {
            Color::Rgb(rgb) => rgb.to_hsl(),
            Color::Hsl(hsl) => *hsl,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Color::Hsl(hsl)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(rgb) => rgb.fmt(f),
            Color::Hsl(hsl) => hsl.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse either `#rrggbb` or `hsl(H, S%, L%)`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Rgb::from_hex(s).map(Color::Rgb)
        } else {
            s.parse::<Hsl>().map(Color::Hsl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseColorTable;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#db3132").unwrap(), Rgb::new(219, 49, 50));
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("#000000").unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "#", "db3132", "#db313", "#db31322", "#db31zz", "#+b3132", "#ééé"] {
            match Rgb::from_hex(bad) {
                Err(Error::InvalidColorFormat(input)) => assert_eq!(input, bad),
                other => panic!("Expected InvalidColorFormat for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_hex_display() {
        let c = Rgb::new(0x0a, 0xbc, 0xff);
        assert_eq!(c.to_string(), "#0abcff");
    }

    #[test]
    fn test_to_hsl_middle_c_base() {
        let hsl = Rgb::from_hex("#db3132").unwrap().to_hsl();
        assert!((hsl.hue - 359.647).abs() < 0.01, "hue was {}", hsl.hue);
        assert!((hsl.saturation - 70.248).abs() < 0.01);
        assert!((hsl.lightness - 52.549).abs() < 0.01);

        let rounded = hsl.rounded();
        assert_eq!(rounded.hue, 0.0);
        assert_eq!(rounded.saturation, 70.0);
        assert_eq!(rounded.lightness, 53.0);
        assert_eq!(hsl.to_string(), "hsl(0, 70%, 53%)");
    }

    #[test]
    fn test_to_hsl_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert_close(red.hue, 0.0);
        assert_close(red.saturation, 100.0);
        assert_close(red.lightness, 50.0);

        assert_close(Rgb::new(0, 255, 0).to_hsl().hue, 120.0);
        assert_close(Rgb::new(0, 0, 255).to_hsl().hue, 240.0);
    }

    #[test]
    fn test_achromatic() {
        let gray = Rgb::new(128, 128, 128).to_hsl();
        assert_close(gray.hue, 0.0);
        assert_close(gray.saturation, 0.0);
        assert_eq!(gray.to_rgb(), Rgb::new(128, 128, 128));

        assert_close(Rgb::WHITE.to_hsl().lightness, 100.0);
        assert_close(Rgb::new(0, 0, 0).to_hsl().lightness, 0.0);
    }

    #[test]
    fn test_round_trip_within_one() {
        let samples = [
            Rgb::new(219, 49, 50),
            Rgb::new(1, 2, 3),
            Rgb::new(250, 10, 128),
            Rgb::new(17, 200, 199),
            Rgb::new(255, 254, 0),
        ];
        for rgb in samples {
            let back = rgb.to_hsl().to_rgb();
            for (a, b) in rgb.channels().iter().zip(back.channels()) {
                assert!(a.abs_diff(b) <= 1, "{rgb} came back as {back}");
            }
        }
    }

    #[test]
    fn test_round_trip_base_palette() {
        for rgb in BaseColorTable::default().colors() {
            let back = rgb.to_hsl().to_rgb();
            for (a, b) in rgb.channels().iter().zip(back.channels()) {
                assert!(a.abs_diff(b) <= 1, "{rgb} came back as {back}");
            }
        }
    }

    #[test]
    fn test_hsl_new_normalizes() {
        let hsl = Hsl::new(-30.0, 120.0, -5.0);
        assert_eq!(hsl.hue, 330.0);
        assert_eq!(hsl.saturation, 100.0);
        assert_eq!(hsl.lightness, 0.0);
        assert_eq!(Hsl::new(720.0, 50.0, 50.0).hue, 0.0);
    }

    #[test]
    fn test_parse_hsl() {
        let hsl: Hsl = "hsl(200, 50%, 40%)".parse().unwrap();
        assert_eq!((hsl.hue, hsl.saturation, hsl.lightness), (200.0, 50.0, 40.0));

        let spaced: Hsl = " hsl( 10 , 20% , 30% ) ".parse().unwrap();
        assert_eq!(spaced.lightness, 30.0);

        // Saturation and lightness must carry a percent sign
        assert!("hsl(10, 20, 30)".parse::<Hsl>().is_err());
        assert!("hsl(10, 20%, 30)".parse::<Hsl>().is_err());

        assert!("hsl(10, 20%)".parse::<Hsl>().is_err());
        assert!("hsl(10, 120%, 30%)".parse::<Hsl>().is_err());
        assert!("hsla(10, 20%, 30%, 1)".parse::<Hsl>().is_err());
        assert!("hsl(x, 20%, 30%)".parse::<Hsl>().is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            "#61acd7".parse::<Color>().unwrap(),
            Color::Rgb(Rgb::new(0x61, 0xac, 0xd7))
        );
        let hsl = "hsl(0, 70%, 63%)".parse::<Color>().unwrap();
        assert_eq!(hsl.to_string(), "hsl(0, 70%, 63%)");
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_conversions() {
        let white = Color::WHITE;
        assert_eq!(white.to_string(), "#ffffff");
        assert_close(white.to_hsl().lightness, 100.0);

        let hsl = Color::Hsl(Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(hsl.to_rgb(), Rgb::new(0, 255, 0));
    }
}
