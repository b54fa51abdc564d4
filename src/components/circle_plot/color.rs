//! RGB colors, d3-style shading and palette generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Factor applied per unit of `darker`/`brighter`.
const SHADE_STEP: f64 = 0.7;

/// Channel floor used by `brighter` so near-black colors still lighten.
const BRIGHTEN_FLOOR: f64 = 30.0;

const CATEGORY10: [Rgb; 10] = [
	Rgb::new(0x1f, 0x77, 0xb4),
	Rgb::new(0xff, 0x7f, 0x0e),
	Rgb::new(0x2c, 0xa0, 0x2c),
	Rgb::new(0xd6, 0x27, 0x28),
	Rgb::new(0x94, 0x67, 0xbd),
	Rgb::new(0x8c, 0x56, 0x4b),
	Rgb::new(0xe3, 0x77, 0xc2),
	Rgb::new(0x7f, 0x7f, 0x7f),
	Rgb::new(0xbc, 0xbd, 0x22),
	Rgb::new(0x17, 0xbe, 0xcf),
];

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

/// A string that is not a `#rgb`/`#rrggbb` hex color.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color `{0}`, expected #rgb or #rrggbb")]
pub struct ParseColorError(String);

impl Rgb {
	/// Color from channel values.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Darken by `k` steps (each step scales every channel by 0.7).
	pub fn darker(self, k: f64) -> Self {
		let k = SHADE_STEP.powf(k);
		Self::from_channels(
			k * self.r as f64,
			k * self.g as f64,
			k * self.b as f64,
		)
	}

	/// Brighten by `k` steps. Black becomes a dark grey, and non-zero channels
	/// below the floor are lifted to it before scaling.
	pub fn brighter(self, k: f64) -> Self {
		let k = SHADE_STEP.powf(k);
		let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
		if r == 0.0 && g == 0.0 && b == 0.0 {
			return Self::from_channels(BRIGHTEN_FLOOR, BRIGHTEN_FLOOR, BRIGHTEN_FLOOR);
		}
		let lift = |c: f64| if c > 0.0 && c < BRIGHTEN_FLOOR { BRIGHTEN_FLOOR } else { c };
		Self::from_channels(
			(lift(r) / k).min(255.0),
			(lift(g) / k).min(255.0),
			(lift(b) / k).min(255.0),
		)
	}

	// Channels truncate toward zero.
	fn from_channels(r: f64, g: f64, b: f64) -> Self {
		let clamp = |c: f64| c.clamp(0.0, 255.0) as u8;
		Self::new(clamp(r), clamp(g), clamp(b))
	}

	fn from_hsl(h: f64, s: f64, l: f64) -> Self {
		let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let hp = h.rem_euclid(360.0) / 60.0;
		let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
		let (r1, g1, b1) = match hp as u32 {
			0 => (c, x, 0.0),
			1 => (x, c, 0.0),
			2 => (0.0, c, x),
			3 => (0.0, x, c),
			4 => (x, 0.0, c),
			_ => (c, 0.0, x),
		};
		let m = l - c / 2.0;
		Self::from_channels(
			((r1 + m) * 255.0).round(),
			((g1 + m) * 255.0).round(),
			((b1 + m) * 255.0).round(),
		)
	}
}

impl From<[u8; 3]> for Rgb {
	fn from([r, g, b]: [u8; 3]) -> Self {
		Self::new(r, g, b)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl FromStr for Rgb {
	type Err = ParseColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || ParseColorError(s.to_string());
		let hex = s.strip_prefix('#').ok_or_else(err)?;
		if !hex.is_ascii() {
			return Err(err());
		}
		let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
		match hex.len() {
			3 => {
				let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
				Ok(Self::new(r * 17, g * 17, b * 17))
			}
			6 => Ok(Self::new(
				channel(&hex[0..2])?,
				channel(&hex[2..4])?,
				channel(&hex[4..6])?,
			)),
			_ => Err(err()),
		}
	}
}

impl TryFrom<String> for Rgb {
	type Error = ParseColorError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<Rgb> for String {
	fn from(c: Rgb) -> Self {
		c.to_string()
	}
}

/// `n` visually distinct colors. Up to ten come from the category10 set,
/// beyond that hues are spread evenly around the wheel.
pub fn palette(n: usize) -> Vec<Rgb> {
	if n <= CATEGORY10.len() {
		return CATEGORY10[..n].to_vec();
	}
	(0..n)
		.map(|i| Rgb::from_hsl(i as f64 * 360.0 / n as f64, 0.65, 0.5))
		.collect()
}
