//! Laid-out plot scene and its click and keyboard interaction.

use std::collections::HashSet;

use log::{debug, info};
use thiserror::Error;

use super::color::Rgb;
use super::hierarchy::{Hierarchy, NodeIdx};
use super::layout::{self, Point};
use super::path;
use super::shape::{self, ShapeError};
use super::types::{PlotData, PlotOptions};

/// Space reserved between the rings and the edge of the plot for labels.
pub const LABEL_INSET: f64 = 120.0;
/// Radial distance between hierarchy rings.
pub const RING_STEP: f64 = 10.0;
/// Thickness of each ring.
pub const RING_WIDTH: f64 = 7.0;
/// Angular padding, in degrees, on either side of an arc.
pub const ARC_PAD: f64 = 1.0;
/// Darken/brighten steps between a node and its children.
pub const SHADE: f64 = 0.3;
/// Tension change per arrow key press.
pub const TENSION_STEP: f64 = 0.05;
/// Resting opacity of a link.
pub const LINK_OPACITY: f64 = 0.7;

/// Why a plot could not be built.
#[derive(Debug, Error)]
pub enum PlotError {
	/// The input could not be shaped into a hierarchy.
	#[error("invalid plot data: {0}")]
	Shape(#[from] ShapeError),
}

/// Plot dimensions derived from the target width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
	/// Side of the square SVG.
	pub diameter: f64,
	/// Half the diameter; the plot centre.
	pub radius: f64,
	/// Radius of the leaf circle.
	pub inner_radius: f64,
}

impl Geometry {
	/// Geometry for a plot area `width` pixels wide.
	pub fn for_width(width: f64) -> Self {
		let diameter = width * 0.8;
		let radius = diameter / 2.0;
		Self {
			diameter,
			radius,
			inner_radius: radius - LABEL_INSET,
		}
	}
}

/// One rendered link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkState {
	/// Leaf the link starts at.
	pub source: NodeIdx,
	/// Leaf the link ends at.
	pub target: NodeIdx,
	/// Bundled control nodes, `source` first and `target` last.
	pub route: Vec<NodeIdx>,
	/// Dimmed because another group is selected.
	pub faded_out: bool,
	/// Inverts how the next arc click fades this link.
	pub faded_stick: bool,
	/// Toggled by clicking either end's label.
	pub highlighted: bool,
}

impl LinkState {
	fn touches(&self, leaves: &HashSet<NodeIdx>) -> bool {
		leaves.contains(&self.source) || leaves.contains(&self.target)
	}

	/// CSS classes for the current flags.
	pub fn class(&self) -> String {
		let mut class = String::from("link");
		if self.faded_out {
			class.push_str(" link--fade--out");
		}
		if self.faded_stick {
			class.push_str(" link--fade--stick");
		}
		if self.highlighted {
			class.push_str(" link--highlight");
		}
		class
	}
}

/// One rendered leaf label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelState {
	/// Leaf this label names.
	pub node: NodeIdx,
	/// Display text, empty when none was given.
	pub text: String,
	/// SVG transform placing the text outside the rings.
	pub transform: String,
	/// `start` or `end`.
	pub anchor: &'static str,
	/// Set while the label is selected.
	pub highlight_stick: bool,
}

impl LabelState {
	/// CSS classes for the current flags.
	pub fn class(&self) -> &'static str {
		if self.highlight_stick {
			"node node--highlight--stick"
		} else {
			"node"
		}
	}
}

/// One rendered ring segment for an interior node.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcState {
	/// Interior node the arc stands for.
	pub node: NodeIdx,
	/// Depth of that node.
	pub depth: usize,
	/// Start and end angle in radians.
	pub span: (f64, f64),
	/// Inner and outer radius.
	pub radii: (f64, f64),
	/// SVG path data.
	pub d: String,
	/// Set while the arc is selected.
	pub highlight_stick: bool,
}

impl ArcState {
	/// CSS classes for the current flags.
	pub fn class(&self) -> &'static str {
		if self.highlight_stick {
			"arc arc--highlight--stick"
		} else {
			"arc"
		}
	}
}

/// Arrow keys the plot responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	/// Tighten the bundles.
	Up,
	/// Loosen the bundles.
	Down,
	/// Reserved.
	Left,
	/// Reserved.
	Right,
}

impl Key {
	/// Maps a `KeyboardEvent.key` value.
	pub fn from_key_name(name: &str) -> Option<Self> {
		match name {
			"ArrowUp" | "Up" => Some(Self::Up),
			"ArrowDown" | "Down" => Some(Self::Down),
			"ArrowLeft" | "Left" => Some(Self::Left),
			"ArrowRight" | "Right" => Some(Self::Right),
			_ => None,
		}
	}
}

/// A laid-out plot and its interaction flags. Rebuilt from scratch whenever
/// the input or the plot size changes.
#[derive(Clone, Debug, Default)]
pub struct CirclePlotState {
	/// Plot dimensions.
	pub geometry: Geometry,
	/// Grouping of the input nodes.
	pub tree: Hierarchy,
	/// Layout position per arena entry.
	pub positions: Vec<Point>,
	/// Resolved color per arena entry.
	pub colors: Vec<Option<Rgb>>,
	/// Depth of the leaves.
	pub max_depth: usize,
	/// Links in input order.
	pub links: Vec<LinkState>,
	/// Labels in tree order; empty when the input had no labels.
	pub labels: Vec<LabelState>,
	/// Arcs for interior nodes in tree order.
	pub arcs: Vec<ArcState>,
	/// Current bundling tension in `[0, 1]`.
	pub tension: f64,
	/// Fallback for anything without a color.
	pub default_color: Rgb,
}

impl CirclePlotState {
	/// Shapes and lays out `data` for a plot of the given size.
	pub fn new(data: &PlotData, options: &PlotOptions) -> Result<Self, PlotError> {
		let shaped = shape::shape(data)?;
		let tree = shaped.hierarchy;
		let geometry = Geometry::for_width(options.width);
		let positions = layout::cluster(&tree, 360.0, geometry.inner_radius);
		let max_depth = tree.max_depth();

		let mut points: Vec<NodeIdx> = tree.leaves().collect();
		points.sort_by_key(|&l| tree.node(l).item.as_ref().map_or(usize::MAX, |i| i.index));

		let links: Vec<LinkState> = shaped
			.links
			.iter()
			.map(|&[s, t]| {
				let (source, target) = (points[s], points[t]);
				LinkState {
					source,
					target,
					route: layout::bundle(&tree, source, target),
					faded_out: false,
					faded_stick: false,
					highlighted: false,
				}
			})
			.collect();

		let labels: Vec<LabelState> = if data.labels.is_some() {
			tree.leaves()
				.map(|l| LabelState {
					node: l,
					text: tree
						.node(l)
						.item
						.as_ref()
						.and_then(|i| i.label.clone())
						.unwrap_or_default(),
					transform: path::label_transform(positions[l], max_depth),
					anchor: path::label_anchor(positions[l]),
					highlight_stick: false,
				})
				.collect()
		} else {
			Vec::new()
		};

		let colors = assign_colors(&tree, &shaped.group_colors, max_depth);

		let arcs: Vec<ArcState> = tree
			.preorder()
			.filter(|&i| {
				let depth = tree.node(i).depth;
				depth > 0 && depth < max_depth
			})
			.map(|i| {
				let depth = tree.node(i).depth;
				let (lo, hi) = layout::angular_extent(&tree, &positions, i);
				let span = ((lo - ARC_PAD).to_radians(), (hi + ARC_PAD).to_radians());
				let inner = depth as f64 * RING_STEP + geometry.inner_radius;
				let radii = (inner, inner + RING_WIDTH);
				ArcState {
					node: i,
					depth,
					span,
					radii,
					d: path::annular_sector(radii.0, radii.1, span.0, span.1),
					highlight_stick: false,
				}
			})
			.collect();

		info!(
			"circle plot: {} leaves, {} links, {} arcs, depth {}",
			points.len(),
			links.len(),
			arcs.len(),
			max_depth
		);

		Ok(Self {
			geometry,
			tree,
			positions,
			colors,
			max_depth,
			links,
			labels,
			arcs,
			tension: options.tension.clamp(0.0, 1.0),
			default_color: options.default_color,
		})
	}

	/// Shaded color of a tree node, as used by the arcs.
	pub fn color_of(&self, idx: NodeIdx) -> Rgb {
		self.colors
			.get(idx)
			.copied()
			.flatten()
			.unwrap_or(self.default_color)
	}

	/// SVG path data for link `i` at the current tension.
	pub fn link_path(&self, i: usize) -> String {
		let points: Vec<Point> = self.links[i]
			.route
			.iter()
			.map(|&n| self.positions[n])
			.collect();
		path::radial_bundle(&points, self.tension)
	}

	/// Group color of a leaf, before any shading.
	pub fn item_color(&self, leaf: NodeIdx) -> Rgb {
		self.tree
			.nodes()
			.get(leaf)
			.and_then(|n| n.item.as_ref())
			.and_then(|i| i.color)
			.unwrap_or(self.default_color)
	}

	/// Links take the group color of their source node.
	pub fn link_stroke(&self, i: usize) -> Rgb {
		self.item_color(self.links[i].source)
	}

	/// Labels take the group color of their node.
	pub fn label_fill(&self, l: usize) -> Rgb {
		self.item_color(self.labels[l].node)
	}

	/// Whether clicking arc `a` does anything: only the ring right above the
	/// leaves is interactive.
	pub fn arc_clickable(&self, a: usize) -> bool {
		self.arcs[a].depth + 1 == self.max_depth
	}

	/// Toggles the arc's highlight and fades every link outside its subtree.
	/// Links inside the subtree flip their sticky flag, which inverts how they
	/// fade on the next click. If everything ends up faded, nothing is.
	pub fn click_arc(&mut self, a: usize) {
		if !self.arc_clickable(a) {
			return;
		}
		let arc = &mut self.arcs[a];
		arc.highlight_stick = !arc.highlight_stick;
		let leaves: HashSet<NodeIdx> = self.tree.descendant_leaves(arc.node).into_iter().collect();

		for link in &mut self.links {
			let touching = link.touches(&leaves);
			link.faded_out = if touching {
				link.faded_stick
			} else {
				!link.faded_stick
			};
			if touching {
				link.faded_stick = !link.faded_stick;
			}
		}

		if self.links.iter().all(|l| l.faded_out) {
			debug!("every link faded, clearing fade");
			for link in &mut self.links {
				link.faded_out = false;
			}
		}
	}

	/// Toggles the highlight of every link attached to label `l`'s leaf.
	pub fn click_label(&mut self, l: usize) {
		let label = &mut self.labels[l];
		label.highlight_stick = !label.highlight_stick;
		let node = label.node;
		for link in &mut self.links {
			if link.source == node || link.target == node {
				link.highlighted = !link.highlighted;
			}
		}
	}

	/// Applies a key press. Returns `true` if the browser default should be
	/// suppressed.
	pub fn handle_key(&mut self, key: Key) -> bool {
		match key {
			Key::Up => self.adjust_tension(TENSION_STEP),
			Key::Down => self.adjust_tension(-TENSION_STEP),
			Key::Left | Key::Right => {}
		}
		true
	}

	/// Moves the tension by `delta`, clamped to `[0, 1]`.
	pub fn adjust_tension(&mut self, delta: f64) {
		self.tension = (self.tension + delta).clamp(0.0, 1.0);
		debug!("tension = {}", self.tension);
	}
}

/// Depth 1 takes the palette by sibling order. Below that, a node with
/// several children hands its even children a darker and its odd children a
/// brighter shade of its own color; an only child inherits it.
fn assign_colors(tree: &Hierarchy, palette: &[Rgb], max_depth: usize) -> Vec<Option<Rgb>> {
	let mut colors: Vec<Option<Rgb>> = tree
		.nodes()
		.iter()
		.map(|n| n.item.as_ref().and_then(|i| i.color))
		.collect();

	for &c in &tree.node(Hierarchy::ROOT).children {
		colors[c] = palette.get(tree.node(c).sibling).copied();
	}

	// Arena order is pre-order, so parents resolve before their children.
	for idx in tree.preorder() {
		let node = tree.node(idx);
		if node.depth == 0 || node.depth >= max_depth {
			continue;
		}
		let base = colors[idx];
		if node.children.len() > 1 {
			for &c in &node.children {
				colors[c] = base.map(|b| {
					if tree.node(c).sibling % 2 == 0 {
						b.darker(SHADE)
					} else {
						b.brighter(SHADE)
					}
				});
			}
		} else {
			for &c in &node.children {
				colors[c] = base;
			}
		}
	}
	colors
}
