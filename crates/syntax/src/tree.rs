use std::cmp::Reverse;

use thiserror::Error;
use veil_primitives::{Revision, TextRange};

use crate::node::{SyntaxNode, Walk};

/// Errors rejecting a node set that does not form a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
	/// A node ends before it starts.
	#[error("node `{kind}` has inverted range {start}..{end}")]
	Inverted {
		kind: String,
		start: usize,
		end: usize,
	},

	/// A node extends past the end of the document.
	#[error("node `{kind}` at {range} exceeds document length {len}")]
	OutOfBounds {
		kind: String,
		range: TextRange,
		len: usize,
	},

	/// Two nodes partially overlap, so neither contains the other.
	#[error("node `{inner}` at {inner_range} crosses `{outer}` at {outer_range}")]
	Crossing {
		outer: String,
		outer_range: TextRange,
		inner: String,
		inner_range: TextRange,
	},
}

/// Read-only view of a parsed syntax tree.
///
/// Implementations are borrowed for the duration of one decoration build and
/// never retained across revisions.
pub trait SyntaxTree {
	/// Revision of the document this tree was parsed from.
	fn revision(&self) -> Revision;

	/// Visits, in document order, every node intersecting `range`.
	///
	/// Ancestors are visited before descendants. Traversal starts from the
	/// first node inside `range` and its ancestor chain, and ends at the first
	/// node starting after it, so the cost tracks the size of `range` and the
	/// tree depth rather than the node count.
	fn walk(&self, range: TextRange, visitor: &mut dyn FnMut(&SyntaxNode) -> Walk);

	/// Returns true if the tree holds no nodes (e.g. a transient parser state).
	fn is_empty(&self) -> bool;
}

/// Pre-order flattened tree.
///
/// Nodes are sorted by start, so [`SyntaxTree::walk`] finds its first
/// candidate by binary search. `skip[i]` is the index just past node `i`'s
/// subtree and `parent[i]` links back to its enclosing node.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
	revision: Revision,
	nodes: Vec<SyntaxNode>,
	skip: Vec<u32>,
	parent: Vec<Option<u32>>,
}

impl NodeTree {
	/// Empty tree for `revision`.
	pub fn empty(revision: Revision) -> Self {
		Self {
			revision,
			nodes: Vec::new(),
			skip: Vec::new(),
			parent: Vec::new(),
		}
	}

	/// Builds a tree from nodes in any order.
	///
	/// Nodes with identical ranges nest in input order (first is outermost).
	pub fn from_nodes(
		revision: Revision,
		doc_len: usize,
		nodes: impl IntoIterator<Item = SyntaxNode>,
	) -> crate::Result<Self> {
		let mut nodes: Vec<SyntaxNode> = nodes.into_iter().collect();
		for node in &nodes {
			if node.start() > node.end() {
				return Err(TreeError::Inverted {
					kind: node.kind.to_string(),
					start: node.start(),
					end: node.end(),
				});
			}
			if node.end() > doc_len {
				return Err(TreeError::OutOfBounds {
					kind: node.kind.to_string(),
					range: node.range,
					len: doc_len,
				});
			}
		}
		// Stable sort keeps input order among identical ranges.
		nodes.sort_by_key(|n| (n.start(), Reverse(n.end())));

		let mut skip = vec![0u32; nodes.len()];
		let mut parent = vec![None; nodes.len()];
		let mut open: Vec<usize> = Vec::new();
		for (idx, node) in nodes.iter().enumerate() {
			while let Some(&top) = open.last() {
				let parent = &nodes[top];
				if parent.contains(node) {
					break;
				}
				if node.start() < parent.end() {
					return Err(TreeError::Crossing {
						outer: parent.kind.to_string(),
						outer_range: parent.range,
						inner: node.kind.to_string(),
						inner_range: node.range,
					});
				}
				skip[top] = idx as u32;
				open.pop();
			}
			parent[idx] = open.last().map(|&top| top as u32);
			open.push(idx);
		}
		let len = nodes.len() as u32;
		for idx in open {
			skip[idx] = len;
		}

		tracing::trace!(%revision, nodes = nodes.len(), "syntax tree indexed");
		Ok(Self {
			revision,
			nodes,
			skip,
			parent,
		})
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// All nodes in pre-order.
	pub fn nodes(&self) -> &[SyntaxNode] {
		&self.nodes
	}

	/// Collects the nodes [`SyntaxTree::walk`] would visit for `range`.
	pub fn nodes_in(&self, range: TextRange) -> Vec<&SyntaxNode> {
		let mut visited = Vec::new();
		self.walk_indexed(range, |idx| {
			visited.push(idx);
			Walk::Continue
		});
		visited.into_iter().map(|idx| &self.nodes[idx]).collect()
	}

	/// Drives `visitor` over node indices in walk order.
	///
	/// Returns how many nodes were examined, visited or not.
	fn walk_indexed(&self, range: TextRange, mut visitor: impl FnMut(usize) -> Walk) -> usize {
		// Every intersecting node that starts before `range` encloses the
		// last such node, so it sits on that node's ancestor chain.
		let first = self.nodes.partition_point(|n| n.start() < range.start);
		let mut chain = Vec::new();
		let mut cursor = first.checked_sub(1);
		while let Some(idx) = cursor {
			chain.push(idx);
			cursor = self.parent[idx].map(|p| p as usize);
		}

		let mut examined = 0;
		let mut idx = first;
		for &ancestor in chain.iter().rev() {
			examined += 1;
			if !self.nodes[ancestor].range.intersects(&range) {
				continue;
			}
			match visitor(ancestor) {
				Walk::Continue => {}
				Walk::SkipChildren => {
					idx = idx.max(self.skip[ancestor] as usize);
					break;
				}
				Walk::Stop => return examined,
			}
		}

		while let Some(node) = self.nodes.get(idx) {
			if node.start() > range.end {
				break;
			}
			examined += 1;
			if !node.range.intersects(&range) {
				// Not visible itself, but a zero-width child on the edge may be.
				idx += 1;
				continue;
			}
			match visitor(idx) {
				Walk::Continue => idx += 1,
				Walk::SkipChildren => idx = self.skip[idx] as usize,
				Walk::Stop => break,
			}
		}
		examined
	}
}

impl SyntaxTree for NodeTree {
	fn revision(&self) -> Revision {
		self.revision
	}

	fn walk(&self, range: TextRange, visitor: &mut dyn FnMut(&SyntaxNode) -> Walk) {
		self.walk_indexed(range, |idx| visitor(&self.nodes[idx]));
	}

	fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
