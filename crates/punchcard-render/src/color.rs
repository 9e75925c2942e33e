//! Linear value-to-color interpolation between two configured endpoints.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#RGB` and `#RRGGBB` hex notations.
    pub fn parse(value: &str) -> Result<Rgb> {
        let invalid = || Error::InvalidColor {
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    let d = hex.get(i..i + 1).ok_or_else(invalid)?;
                    channel(&format!("{d}{d}"))
                };
                Ok(Rgb {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            6 => Ok(Rgb {
                r: channel(hex.get(0..2).ok_or_else(invalid)?)?,
                g: channel(hex.get(2..4).ok_or_else(invalid)?)?,
                b: channel(hex.get(4..6).ok_or_else(invalid)?)?,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// `d3.scaleLinear` over two color endpoints: maps a value domain onto a
/// channel-wise interpolation between the low and high colors.
#[derive(Debug, Clone, Copy)]
pub struct LinearColorScale {
    domain: [f64; 2],
    range: [Rgb; 2],
}

impl LinearColorScale {
    pub fn new(domain: [f64; 2], low: &str, high: &str) -> Result<Self> {
        Ok(Self {
            domain,
            range: [Rgb::parse(low)?, Rgb::parse(high)?],
        })
    }

    pub fn at(&self, value: f64) -> String {
        let span = self.domain[1] - self.domain[0];
        let t = if span == 0.0 {
            0.0
        } else {
            ((value - self.domain[0]) / span).clamp(0.0, 1.0)
        };
        let lerp = |a: u8, b: u8| {
            let mixed = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            mixed.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: lerp(self.range[0].r, self.range[1].r),
            g: lerp(self.range[0].g, self.range[1].g),
            b: lerp(self.range[0].b, self.range[1].b),
        }
        .to_hex()
    }
}

/// `steps` evenly spaced values from `from` to `to` inclusive.
pub fn linear_range(from: f64, to: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![from];
    }
    (0..steps)
        .map(|i| from + (to - from) * i as f64 / (steps - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::parse("#218380").unwrap(), Rgb { r: 0x21, g: 0x83, b: 0x80 });
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb { r: 255, g: 255, b: 255 });
        assert!(Rgb::parse("rebeccapurple").is_err());
        assert!(Rgb::parse("#12345").is_err());
    }

    #[test]
    fn interpolates_channel_wise() {
        let scale = LinearColorScale::new([0.0, 10.0], "#000000", "#ffffff").unwrap();
        assert_eq!(scale.at(0.0), "#000000");
        assert_eq!(scale.at(10.0), "#ffffff");
        assert_eq!(scale.at(5.0), "#808080");
    }

    #[test]
    fn degenerate_domain_pins_to_the_low_color() {
        let scale = LinearColorScale::new([0.0, 0.0], "#d8e6e7", "#218380").unwrap();
        assert_eq!(scale.at(0.0), "#d8e6e7");
    }

    #[test]
    fn out_of_domain_values_clamp() {
        let scale = LinearColorScale::new([0.0, 1.0], "#000000", "#ffffff").unwrap();
        assert_eq!(scale.at(-5.0), "#000000");
        assert_eq!(scale.at(9.0), "#ffffff");
    }

    #[test]
    fn linear_range_includes_both_ends() {
        assert_eq!(linear_range(5.0, 0.0, 3), vec![5.0, 2.5, 0.0]);
        assert_eq!(linear_range(1.0, 2.0, 1), vec![1.0]);
    }
}
