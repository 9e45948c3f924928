//! Hex color strings to gamma-decoded linear RGBA.
//!
//! A hex color is three equal-length groups of hex digits with an optional
//! leading `#` (`#FF8000`, `f80`). Each group is divided by 255 and raised to
//! [`GAMMA`], which is what a linear-light shader input expects. Alpha is
//! always 1.0.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Exponent used to decode perceptually encoded channels into linear light.
pub const GAMMA: f32 = 2.2;

/// Errors from color parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color format {value:?}: {reason}")]
    InvalidColorFormat { value: String, reason: &'static str },
}

impl ColorError {
    fn invalid(value: &str, reason: &'static str) -> Self {
        Self::InvalidColorFormat {
            value: value.to_string(),
            reason,
        }
    }
}

/// A gamma-decoded color ready for a shader base-color input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearRgba {
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_tuple(self) -> (f32, f32, f32, f32) {
        (self.r, self.g, self.b, self.a)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<LinearRgba> for [f32; 4] {
    fn from(c: LinearRgba) -> Self {
        c.to_array()
    }
}

impl From<LinearRgba> for (f32, f32, f32, f32) {
    fn from(c: LinearRgba) -> Self {
        c.to_tuple()
    }
}

impl FromStr for LinearRgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_linear_rgba(s)
    }
}

impl std::fmt::Display for LinearRgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4}, {:.1})",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Convert a hex color string into gamma-decoded linear RGBA.
///
/// The digit count (after an optional `#`) must be a non-zero multiple of
/// three. Raw channel values are always normalized by 255, so single-digit
/// groups (`#FFF`) decode to small intensities.
pub fn hex_to_linear_rgba(value: &str) -> Result<LinearRgba, ColorError> {
    let digits = value.strip_prefix('#').unwrap_or(value);

    if digits.is_empty() {
        return Err(ColorError::invalid(value, "empty color"));
    }
    if digits.len() % 3 != 0 {
        return Err(ColorError::invalid(
            value,
            "digit count is not a multiple of three",
        ));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::invalid(value, "non-hex character"));
    }

    let group = digits.len() / 3;
    let mut channels = [0.0f32; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let raw = u32::from_str_radix(&digits[i * group..(i + 1) * group], 16)
            .map_err(|_| ColorError::invalid(value, "channel value out of range"))?;
        *channel = (raw as f32 / 255.0).powf(GAMMA);
    }

    Ok(LinearRgba::opaque(channels[0], channels[1], channels[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn white_is_one() {
        let c = hex_to_linear_rgba("#FFFFFF").unwrap();
        assert_eq!(c.to_tuple(), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn black_is_zero() {
        let c = hex_to_linear_rgba("#000000").unwrap();
        assert_eq!(c.to_tuple(), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn mid_gray_without_hash() {
        let c = hex_to_linear_rgba("808080").unwrap();
        let expected = (128.0f32 / 255.0).powf(2.2);
        assert!(approx(c.r, expected));
        assert!(approx(c.g, expected));
        assert!(approx(c.b, expected));
        assert!((c.r - 0.2195).abs() < 1e-3);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn pure_red() {
        let c = hex_to_linear_rgba("#FF0000").unwrap();
        assert_eq!(c.to_tuple(), (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn lowercase_digits_accepted() {
        assert_eq!(
            hex_to_linear_rgba("#ff00ff").unwrap(),
            hex_to_linear_rgba("#FF00FF").unwrap()
        );
    }

    #[test]
    fn single_digit_groups_divide_by_255() {
        let c = hex_to_linear_rgba("#F00").unwrap();
        assert!(approx(c.r, (15.0f32 / 255.0).powf(2.2)));
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn gray_ramp_is_monotonic() {
        let mut prev = -1.0f32;
        for v in (0u32..=255).step_by(5) {
            let hex = format!("#{v:02x}{v:02x}{v:02x}");
            let r = hex_to_linear_rgba(&hex).unwrap().r;
            assert!(r > prev, "{hex} decoded to {r}, not above {prev}");
            prev = r;
        }
    }

    #[test]
    fn length_not_multiple_of_three_rejected() {
        let err = hex_to_linear_rgba("#12").unwrap_err();
        assert!(matches!(err, ColorError::InvalidColorFormat { .. }));
        assert!(hex_to_linear_rgba("12345").is_err());
    }

    #[test]
    fn non_hex_rejected() {
        assert!(matches!(
            hex_to_linear_rgba("#ZZZZZZ"),
            Err(ColorError::InvalidColorFormat { .. })
        ));
    }

    #[test]
    fn sign_characters_rejected() {
        assert!(hex_to_linear_rgba("+F+F+F").is_err());
    }

    #[test]
    fn empty_rejected() {
        assert!(hex_to_linear_rgba("").is_err());
        assert!(hex_to_linear_rgba("#").is_err());
    }

    #[test]
    fn multibyte_input_rejected_without_panic() {
        assert!(hex_to_linear_rgba("ééé").is_err());
    }

    #[test]
    fn oversized_groups_rejected() {
        let huge = "F".repeat(30);
        assert!(hex_to_linear_rgba(&huge).is_err());
    }

    #[test]
    fn from_str_matches_function() {
        let parsed: LinearRgba = "#336699".parse().unwrap();
        assert_eq!(parsed, hex_to_linear_rgba("#336699").unwrap());
    }

    #[test]
    fn error_message_names_input() {
        let err = hex_to_linear_rgba("#12").unwrap_err();
        assert!(err.to_string().contains("#12"));
    }
}
