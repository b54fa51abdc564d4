//! Radial cluster layout and hierarchical edge bundling.

use super::hierarchy::{Hierarchy, NodeIdx};

/// Polar position: `x` is an angle in degrees, `y` a radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Angle in degrees, clockwise from 12 o'clock.
	pub x: f64,
	/// Distance from the centre.
	pub y: f64,
}

/// Sibling leaves sit one unit apart, cousins two.
fn separation(tree: &Hierarchy, a: NodeIdx, b: NodeIdx) -> f64 {
	if tree.node(a).parent == tree.node(b).parent {
		1.0
	} else {
		2.0
	}
}

/// Dendrogram layout: leaves evenly spread over `[0, sweep)` degrees at
/// `radius`, parents centred over their children, the root at the centre.
/// Returns one point per arena entry.
pub fn cluster(tree: &Hierarchy, sweep: f64, radius: f64) -> Vec<Point> {
	let mut pos = vec![Point::default(); tree.len()];
	let mut height = vec![0.0_f64; tree.len()];
	let mut previous: Option<NodeIdx> = None;
	let mut x = 0.0;

	// Leaves are placed in pre-order; parents after all their children.
	for idx in tree.preorder() {
		let node = tree.node(idx);
		if node.children.is_empty() {
			if let Some(prev) = previous {
				x += separation(tree, idx, prev);
			}
			pos[idx].x = x;
			previous = Some(idx);
		}
	}
	for idx in tree.preorder().collect::<Vec<_>>().into_iter().rev() {
		let children = &tree.node(idx).children;
		if children.is_empty() {
			continue;
		}
		pos[idx].x = children.iter().map(|&c| pos[c].x).sum::<f64>() / children.len() as f64;
		height[idx] = 1.0 + children.iter().map(|&c| height[c]).fold(0.0, f64::max);
	}

	let left = extreme(tree, Hierarchy::ROOT, |c| c.first());
	let right = extreme(tree, Hierarchy::ROOT, |c| c.last());
	let x0 = pos[left].x - separation(tree, left, right) / 2.0;
	let x1 = pos[right].x + separation(tree, right, left) / 2.0;
	let root_height = height[Hierarchy::ROOT];

	for idx in tree.preorder() {
		pos[idx].x = (pos[idx].x - x0) / (x1 - x0) * sweep;
		pos[idx].y = if root_height > 0.0 {
			(1.0 - height[idx] / root_height) * radius
		} else {
			0.0
		};
	}
	pos
}

fn extreme(
	tree: &Hierarchy,
	mut idx: NodeIdx,
	pick: impl Fn(&[NodeIdx]) -> Option<&NodeIdx>,
) -> NodeIdx {
	while let Some(&next) = pick(&tree.node(idx).children) {
		idx = next;
	}
	idx
}

/// Deepest common ancestor of `a` and `b`.
pub fn least_common_ancestor(tree: &Hierarchy, a: NodeIdx, b: NodeIdx) -> NodeIdx {
	if a == b {
		return a;
	}
	let mut a_path = tree.ancestors(a);
	let mut b_path = tree.ancestors(b);
	let mut shared = Hierarchy::ROOT;
	while let (Some(x), Some(y)) = (a_path.pop(), b_path.pop()) {
		if x != y {
			break;
		}
		shared = x;
	}
	shared
}

/// Control nodes of a bundled link: up from `source` to the common ancestor,
/// then down to `target`.
pub fn bundle(tree: &Hierarchy, source: NodeIdx, target: NodeIdx) -> Vec<NodeIdx> {
	let lca = least_common_ancestor(tree, source, target);
	let mut path = vec![source];
	let mut cur = source;
	while cur != lca {
		match tree.node(cur).parent {
			Some(p) => cur = p,
			None => break,
		}
		path.push(cur);
	}
	let mut down = Vec::new();
	let mut cur = target;
	while cur != lca {
		down.push(cur);
		match tree.node(cur).parent {
			Some(p) => cur = p,
			None => break,
		}
	}
	path.extend(down.into_iter().rev());
	path
}

/// Smallest and largest leaf angle below `idx`.
pub fn angular_extent(tree: &Hierarchy, pos: &[Point], idx: NodeIdx) -> (f64, f64) {
	tree.descendant_leaves(idx)
		.into_iter()
		.map(|l| pos[l].x)
		.fold((f64::INFINITY, 0.0), |(lo, hi), x| (lo.min(x), hi.max(x)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::circle_plot::hierarchy::Item;

	fn tree(groups: &[usize]) -> Hierarchy {
		let items = groups
			.iter()
			.enumerate()
			.map(|(index, &g)| Item {
				index,
				color: None,
				label: None,
				levels: vec![g],
			})
			.collect();
		Hierarchy::nest(items, 1)
	}

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn leaves_spread_with_group_gaps() {
		let t = tree(&[0, 0, 1, 1]);
		let pos = cluster(&t, 360.0, 100.0);
		let xs: Vec<_> = t.leaves().map(|l| pos[l].x).collect();
		// Offsets 0, 1, 3, 4 inside [-1, 5]; the outer leaves are cousins.
		let expected = [1.0, 2.0, 4.0, 5.0].map(|u| u / 6.0 * 360.0);
		for (x, e) in xs.iter().zip(expected) {
			assert!(approx(*x, e), "{x} != {e}");
		}
		assert!(t.leaves().all(|l| approx(pos[l].y, 100.0)));
		assert!(approx(pos[Hierarchy::ROOT].y, 0.0));

		let first = t.node(Hierarchy::ROOT).children[0];
		assert!(approx(pos[first].x, (xs[0] + xs[1]) / 2.0));
		assert!(approx(pos[first].y, 50.0));
	}

	#[test]
	fn single_leaf_sits_half_way() {
		let t = tree(&[0]);
		let pos = cluster(&t, 360.0, 10.0);
		let leaf = t.leaves().next().unwrap();
		assert!(approx(pos[leaf].x, 180.0));
	}

	#[test]
	fn empty_tree_has_a_centred_root() {
		let t = tree(&[]);
		let pos = cluster(&t, 360.0, 10.0);
		assert_eq!(pos.len(), 1);
		assert!(approx(pos[0].y, 0.0));
	}

	#[test]
	fn bundle_routes_through_common_ancestors() {
		let t = tree(&[0, 0, 1]);
		let leaves: Vec<_> = t.leaves().collect();
		let (a, b, c) = (leaves[0], leaves[1], leaves[2]);
		let pa = t.node(a).parent.unwrap();
		let pc = t.node(c).parent.unwrap();

		assert_eq!(bundle(&t, a, b), vec![a, pa, b]);
		assert_eq!(bundle(&t, a, c), vec![a, pa, Hierarchy::ROOT, pc, c]);
		assert_eq!(bundle(&t, c, a), vec![c, pc, Hierarchy::ROOT, pa, a]);
		assert_eq!(bundle(&t, b, b), vec![b]);
	}

	#[test]
	fn extent_covers_descendant_leaves() {
		let t = tree(&[0, 0, 0, 1]);
		let pos = cluster(&t, 360.0, 10.0);
		let first = t.node(Hierarchy::ROOT).children[0];
		let leaves = t.descendant_leaves(first);
		let (lo, hi) = angular_extent(&t, &pos, first);
		assert!(approx(lo, pos[leaves[0]].x));
		assert!(approx(hi, pos[leaves[2]].x));
	}
}
