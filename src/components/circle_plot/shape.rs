//! Turns flat plot input into a nested hierarchy plus a group palette.

use std::collections::BTreeSet;

use log::debug;
use thiserror::Error;

use super::color::{Rgb, palette};
use super::hierarchy::{Hierarchy, Item};
use super::types::PlotData;

/// Input the shaper refuses to build a plot from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
	/// A grouping level is not parallel to the node list.
	#[error("group level {level} has {found} entries, expected one per node ({expected})")]
	LevelLength {
		/// Offending level.
		level: usize,
		/// Number of nodes.
		expected: usize,
		/// Entries in the level.
		found: usize,
	},
	/// A link endpoint is not a node index.
	#[error("link {link} references node {node}, but there are only {len} nodes")]
	LinkOutOfRange {
		/// Position of the link in the input.
		link: usize,
		/// The out-of-range endpoint.
		node: usize,
		/// Number of nodes.
		len: usize,
	},
}

/// Plot input reshaped for layout.
#[derive(Clone, Debug)]
pub struct ShapedData {
	/// Items nested by grouping level.
	pub hierarchy: Hierarchy,
	/// Links as given.
	pub links: Vec<[usize; 2]>,
	/// Palette indexed by first-level group id.
	pub group_colors: Vec<Rgb>,
	/// `0..max(group id)` for each grouping level. Informational: nesting
	/// buckets by the raw group ids, so layout never reads this.
	pub level: Vec<Vec<usize>>,
}

/// Validates `data` and nests its nodes by grouping level.
pub fn shape(data: &PlotData) -> Result<ShapedData, ShapeError> {
	let n = data.nodes.len();
	let group = match &data.group {
		Some(levels) if !levels.is_empty() => levels.clone(),
		_ => vec![vec![0; n]],
	};

	for (level, ids) in group.iter().enumerate() {
		if ids.len() != n {
			return Err(ShapeError::LevelLength {
				level,
				expected: n,
				found: ids.len(),
			});
		}
	}
	for (link, pair) in data.links.iter().enumerate() {
		if let Some(&node) = pair.iter().find(|&&i| i >= n) {
			return Err(ShapeError::LinkOutOfRange { link, node, len: n });
		}
	}

	let group_colors = match &data.color {
		Some(triples) => triples.iter().copied().map(Rgb::from).collect(),
		None => {
			let distinct = group[0].iter().collect::<BTreeSet<_>>().len();
			palette(distinct + 1)
		}
	};

	let level: Vec<Vec<usize>> = group
		.iter()
		.map(|ids| (0..ids.iter().copied().max().unwrap_or(0)).collect())
		.collect();

	let labels = data.labels.as_deref().unwrap_or_default();
	let items = (0..n)
		.map(|i| Item {
			index: i,
			color: group_colors.get(group[0][i]).copied(),
			label: labels.get(i).cloned(),
			levels: group.iter().map(|ids| ids[i]).collect(),
		})
		.collect();

	let hierarchy = Hierarchy::nest(items, group.len());
	debug!(
		"shaped {} nodes into {} tree nodes over {} levels",
		n,
		hierarchy.len(),
		group.len()
	);

	Ok(ShapedData {
		hierarchy,
		links: data.links.clone(),
		group_colors,
		level,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::circle_plot::types::NodeKey;

	fn data(n: usize, links: &[[usize; 2]], group: Option<Vec<Vec<usize>>>) -> PlotData {
		PlotData {
			nodes: (0..n as i64).map(NodeKey::from).collect(),
			links: links.to_vec(),
			labels: None,
			group,
			color: None,
		}
	}

	fn bucket_sizes(tree: &Hierarchy) -> Vec<usize> {
		tree.node(Hierarchy::ROOT)
			.children
			.iter()
			.map(|&c| tree.descendant_leaves(c).len())
			.collect()
	}

	#[test]
	fn default_group_is_one_bucket_in_order() {
		let shaped = shape(&data(6, &[], None)).unwrap();
		let tree = &shaped.hierarchy;
		assert_eq!(bucket_sizes(tree), vec![6]);
		let order: Vec<_> = tree
			.leaves()
			.map(|l| tree.node(l).item.as_ref().unwrap().index)
			.collect();
		assert_eq!(order, (0..6).collect::<Vec<_>>());
		assert_eq!(shaped.group_colors.len(), 2);
		assert_eq!(shaped.level, vec![Vec::<usize>::new()]);
	}

	#[test]
	fn two_groups_get_distinct_colors() {
		let shaped = shape(&data(4, &[[0, 1], [2, 3]], Some(vec![vec![0, 0, 1, 1]]))).unwrap();
		let tree = &shaped.hierarchy;
		assert_eq!(bucket_sizes(tree), vec![2, 2]);
		let colors: Vec<_> = tree
			.leaves()
			.map(|l| tree.node(l).item.as_ref().unwrap().color)
			.collect();
		assert_eq!(colors[0], colors[1]);
		assert_ne!(colors[1], colors[2]);
		assert_eq!(shaped.level, vec![vec![0]]);
	}

	#[test]
	fn explicit_colors_are_the_palette() {
		let mut input = data(3, &[], Some(vec![vec![1, 0, 1]]));
		input.color = Some(vec![[255, 0, 0], [0, 0, 255]]);
		let shaped = shape(&input).unwrap();
		assert_eq!(shaped.group_colors, vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);
		let first = shaped.hierarchy.leaves().next().unwrap();
		let item = shaped.hierarchy.node(first).item.as_ref().unwrap();
		assert_eq!((item.index, item.color), (1, Some(Rgb::new(255, 0, 0))));
	}

	#[test]
	fn labels_may_be_short() {
		let mut input = data(3, &[], None);
		input.labels = Some(vec!["a".into()]);
		let shaped = shape(&input).unwrap();
		let labels: Vec<_> = shaped
			.hierarchy
			.leaves()
			.map(|l| shaped.hierarchy.node(l).item.as_ref().unwrap().label.clone())
			.collect();
		assert_eq!(labels, vec![Some("a".to_string()), None, None]);
	}

	#[test]
	fn constant_inner_level_is_a_single_bucket() {
		let shaped = shape(&data(3, &[], Some(vec![vec![0, 1, 1], vec![0, 0, 0]]))).unwrap();
		let tree = &shaped.hierarchy;
		for &top in &tree.node(Hierarchy::ROOT).children {
			assert_eq!(tree.node(top).children.len(), 1);
		}
		assert_eq!(tree.max_depth(), 3);
	}

	#[test]
	fn empty_nodes_shape_to_empty_tree() {
		let shaped = shape(&data(0, &[], None)).unwrap();
		assert!(shaped.hierarchy.is_empty());
	}

	#[test]
	fn rejects_malformed_input() {
		assert_eq!(
			shape(&data(3, &[], Some(vec![vec![0, 0]]))).unwrap_err(),
			ShapeError::LevelLength {
				level: 0,
				expected: 3,
				found: 2
			}
		);
		assert_eq!(
			shape(&data(3, &[[0, 1], [2, 3]], None)).unwrap_err(),
			ShapeError::LinkOutOfRange {
				link: 1,
				node: 3,
				len: 3
			}
		);
	}
}
