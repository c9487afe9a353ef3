//! CSS colour literals and hex normalisation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// How resolved colour tokens are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// Keep values exactly as resolved
    #[default]
    Preserve,
    /// Rewrite parseable colours as `#RRGGBB[AA]`
    Hex,
}

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or_else(|| invalid_hex(s)))
            .collect::<Result<_>>()?;

        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
            [r, g, b, a] => Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::new(
                r1 << 4 | r2,
                g1 << 4 | g2,
                b1 << 4 | b2,
                a1 << 4 | a2,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse any CSS colour form tokens commonly hold: hex, `rgb()`,
    /// `rgba()`, `hsl()` or `hsla()`, in comma or space syntax.
    ///
    /// Returns `None` for anything else (keywords, `currentColor`, gradients).
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::from_hex(value).ok();
        }

        let open = value.find('(')?;
        let inner = value[open + 1..].strip_suffix(')')?;
        let function = value[..open].trim().to_ascii_lowercase();
        let args = split_args(inner)?;

        match function.as_str() {
            "rgb" | "rgba" => from_rgb_args(&args),
            "hsl" | "hsla" => from_hsl_args(&args),
            _ => None,
        }
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s).ok_or_else(|| TokenError::parse(format!("Invalid colour: {}", s)))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Rewrite `value` as hex if it is a colour, otherwise return it unchanged.
pub fn normalize_colour(value: &str, format: ColorFormat) -> String {
    match format {
        ColorFormat::Preserve => value.to_string(),
        ColorFormat::Hex => Colour::parse_css(value)
            .map(|c| c.to_string())
            .unwrap_or_else(|| value.to_string()),
    }
}

fn invalid_hex(s: &str) -> TokenError {
    TokenError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Channel arguments, with the alpha (if any) always last.
fn split_args(inner: &str) -> Option<Vec<&str>> {
    let (channels, alpha) = match inner.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (inner, None),
    };

    let mut args: Vec<&str> = if channels.contains(',') {
        channels.split(',').map(str::trim).collect()
    } else {
        channels.split_whitespace().collect()
    };

    match alpha {
        // A slash alpha needs all three channels in front of it
        Some(alpha) if args.len() == 3 => {
            args.push(alpha);
            Some(args)
        }
        Some(_) => None,
        None => (args.len() == 3 || args.len() == 4).then_some(args),
    }
}

/// Parse a number or percentage into the 0..=1 range given the full scale.
fn unit(arg: &str, scale: f32) -> Option<f32> {
    let value = match arg.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
        None => arg.parse::<f32>().ok()? / scale,
    };
    value.is_finite().then_some(value.clamp(0.0, 1.0))
}

fn alpha(args: &[&str]) -> Option<u8> {
    match args.get(3) {
        Some(a) => unit(a, 1.0).map(to_byte),
        None => Some(255),
    }
}

fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).round() as u8
}

fn from_rgb_args(args: &[&str]) -> Option<Colour> {
    let r = unit(args[0], 255.0)?;
    let g = unit(args[1], 255.0)?;
    let b = unit(args[2], 255.0)?;
    Some(Colour::new(to_byte(r), to_byte(g), to_byte(b), alpha(args)?))
}

fn from_hsl_args(args: &[&str]) -> Option<Colour> {
    use palette::{Hsl, IntoColor, Srgb};

    let hue: f32 = args[0].strip_suffix("deg").unwrap_or(args[0]).parse().ok()?;
    // Saturation and lightness are percentages in CSS; bare numbers mean the same
    let saturation = unit(args[1], 100.0)?;
    let lightness = unit(args[2], 100.0)?;

    if !hue.is_finite() {
        return None;
    }

    let hsl: Hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb<f32> = hsl.into_color();

    Some(Colour::new(
        to_byte(rgb.red.clamp(0.0, 1.0)),
        to_byte(rgb.green.clamp(0.0, 1.0)),
        to_byte(rgb.blue.clamp(0.0, 1.0)),
        alpha(args)?,
    ))
}
