//! Arena-backed category hierarchy.
//!
//! Nodes are addressed by index; the root is always index 0. Leaves are the
//! nodes that carry an [`Item`], one per input node.

use std::collections::BTreeMap;

use super::color::Rgb;

/// Index of a node in a [`Hierarchy`].
pub type NodeIdx = usize;

/// The per-node record stored on a leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
	/// Position in the original node list.
	pub index: usize,
	/// Color from the first-level palette, if the palette covers the group.
	pub color: Option<Rgb>,
	/// Display text.
	pub label: Option<String>,
	/// Group id at every grouping level, outermost first.
	pub levels: Vec<usize>,
}

/// One entry of the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
	/// Parent index, `None` for the root.
	pub parent: Option<NodeIdx>,
	/// Distance from the root.
	pub depth: usize,
	/// Position among the parent's children.
	pub sibling: usize,
	/// Group id this bucket was formed from (interior nodes below the root).
	pub key: Option<usize>,
	/// Children in layout order.
	pub children: Vec<NodeIdx>,
	/// Present exactly on leaves.
	pub item: Option<Item>,
}

impl TreeNode {
	/// Whether this node stands for an input item.
	pub fn is_leaf(&self) -> bool {
		self.item.is_some()
	}
}

/// A nested grouping of items.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
	nodes: Vec<TreeNode>,
}

impl Default for Hierarchy {
	fn default() -> Self {
		Self {
			nodes: vec![TreeNode {
				parent: None,
				depth: 0,
				sibling: 0,
				key: None,
				children: Vec::new(),
				item: None,
			}],
		}
	}
}

impl Hierarchy {
	/// Index of the root node.
	pub const ROOT: NodeIdx = 0;

	/// Bucket `items` by `levels[0]`, then by `levels[1]` inside each bucket,
	/// and so on for `depth` levels. Buckets are ordered by group id; items
	/// keep their relative order.
	pub fn nest(items: Vec<Item>, depth: usize) -> Self {
		let mut tree = Self::default();
		tree.nest_into(Self::ROOT, items, 0, depth);
		tree
	}

	fn nest_into(&mut self, parent: NodeIdx, items: Vec<Item>, level: usize, depth: usize) {
		if level == depth {
			for item in items {
				self.push(parent, None, Some(item));
			}
			return;
		}
		let mut buckets: BTreeMap<usize, Vec<Item>> = BTreeMap::new();
		for item in items {
			let key = item.levels.get(level).copied().unwrap_or_default();
			buckets.entry(key).or_default().push(item);
		}
		for (key, bucket) in buckets {
			let idx = self.push(parent, Some(key), None);
			self.nest_into(idx, bucket, level + 1, depth);
		}
	}

	fn push(&mut self, parent: NodeIdx, key: Option<usize>, item: Option<Item>) -> NodeIdx {
		let idx = self.nodes.len();
		let (depth, sibling) = {
			let p = &self.nodes[parent];
			(p.depth + 1, p.children.len())
		};
		self.nodes.push(TreeNode {
			parent: Some(parent),
			depth,
			sibling,
			key,
			children: Vec::new(),
			item,
		});
		self.nodes[parent].children.push(idx);
		idx
	}

	/// Number of arena entries, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the root has no children.
	pub fn is_empty(&self) -> bool {
		self.nodes[Self::ROOT].children.is_empty()
	}

	/// The entry at `idx`.
	pub fn node(&self, idx: NodeIdx) -> &TreeNode {
		&self.nodes[idx]
	}

	/// All entries in arena order.
	pub fn nodes(&self) -> &[TreeNode] {
		&self.nodes
	}

	/// All node indices in pre-order (parents before children, children in
	/// order). Nodes are pushed depth-first, so this is arena order.
	pub fn preorder(&self) -> impl Iterator<Item = NodeIdx> + '_ {
		0..self.nodes.len()
	}

	/// Leaves in tree order.
	pub fn leaves(&self) -> impl Iterator<Item = NodeIdx> + '_ {
		self.preorder().filter(|&i| self.nodes[i].is_leaf())
	}

	/// Depth of the deepest node; 0 for an empty tree.
	pub fn max_depth(&self) -> usize {
		self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
	}

	/// Leaves below `idx`, in tree order. A leaf is its own descendant.
	pub fn descendant_leaves(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		let mut out = Vec::new();
		let mut stack = vec![idx];
		while let Some(i) = stack.pop() {
			let node = &self.nodes[i];
			if node.is_leaf() {
				out.push(i);
			}
			stack.extend(node.children.iter().rev());
		}
		out
	}

	/// `idx` followed by each ancestor up to the root.
	pub fn ancestors(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		let mut out = vec![idx];
		let mut cur = idx;
		while let Some(p) = self.nodes[cur].parent {
			out.push(p);
			cur = p;
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(index: usize, levels: &[usize]) -> Item {
		Item {
			index,
			color: None,
			label: None,
			levels: levels.to_vec(),
		}
	}

	#[test]
	fn nests_by_each_level_in_order() {
		let items = vec![
			item(0, &[1, 0]),
			item(1, &[0, 1]),
			item(2, &[1, 1]),
			item(3, &[0, 1]),
			item(4, &[1, 0]),
		];
		let tree = Hierarchy::nest(items, 2);
		let root = tree.node(Hierarchy::ROOT);
		assert_eq!(root.children.len(), 2);

		let keys: Vec<_> = root.children.iter().map(|&c| tree.node(c).key).collect();
		assert_eq!(keys, vec![Some(0), Some(1)]);

		let order: Vec<_> = tree
			.leaves()
			.map(|l| tree.node(l).item.as_ref().unwrap().index)
			.collect();
		assert_eq!(order, vec![1, 3, 0, 4, 2]);
		assert!(tree.leaves().all(|l| tree.node(l).depth == 3));
		assert_eq!(tree.max_depth(), 3);
	}

	#[test]
	fn empty_input_is_a_bare_root() {
		let tree = Hierarchy::nest(Vec::new(), 1);
		assert!(tree.is_empty());
		assert_eq!(tree.len(), 1);
		assert_eq!(tree.leaves().count(), 0);
		assert_eq!(tree.max_depth(), 0);
	}

	#[test]
	fn descendants_and_ancestors() {
		let items = (0..4).map(|i| item(i, &[i / 2])).collect();
		let tree = Hierarchy::nest(items, 1);
		let second = tree.node(Hierarchy::ROOT).children[1];
		let leaves = tree.descendant_leaves(second);
		let indices: Vec<_> = leaves
			.iter()
			.map(|&l| tree.node(l).item.as_ref().unwrap().index)
			.collect();
		assert_eq!(indices, vec![2, 3]);
		assert_eq!(tree.ancestors(leaves[0]), vec![leaves[0], second, Hierarchy::ROOT]);
		assert_eq!(tree.node(leaves[1]).sibling, 1);
	}
}
