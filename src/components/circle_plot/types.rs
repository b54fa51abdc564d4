use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Opaque node identifier. Only the position of a node in `PlotData::nodes`
/// matters to the plot.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NodeKey {
	/// Numeric id.
	Int(i64),
	/// Textual id.
	Text(String),
}

impl From<i64> for NodeKey {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<&str> for NodeKey {
	fn from(v: &str) -> Self {
		Self::Text(v.to_string())
	}
}

/// Raw plot input, in the shape the widget has always accepted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PlotData {
	/// Node ids.
	pub nodes: Vec<NodeKey>,
	/// `[source, target]` pairs of indices into `nodes`.
	#[serde(default)]
	pub links: Vec<[usize; 2]>,
	/// Per-node display text.
	#[serde(default)]
	pub labels: Option<Vec<String>>,
	/// Grouping levels, outermost first. Each level is parallel to `nodes`.
	#[serde(default)]
	pub group: Option<Vec<Vec<usize>>>,
	/// Explicit palette, indexed by first-level group id.
	#[serde(default)]
	pub color: Option<Vec<[u8; 3]>>,
}

/// Display options.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotOptions {
	/// Width of the target area in pixels.
	pub width: f64,
	/// Height of the target area in pixels.
	pub height: f64,
	/// Initial bundling tension.
	pub tension: f64,
	/// Color used for anything without a resolved color.
	pub default_color: Rgb,
}

/// Initial bundling tension.
pub const DEFAULT_TENSION: f64 = 0.7;

impl Default for PlotOptions {
	fn default() -> Self {
		Self {
			width: 600.0,
			height: 400.0,
			tension: DEFAULT_TENSION,
			default_color: Rgb::new(0xde, 0xeb, 0xfa),
		}
	}
}

impl PlotOptions {
	/// Options for a given area, everything else defaulted.
	pub fn sized(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}
}
