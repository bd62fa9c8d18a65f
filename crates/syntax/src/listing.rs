//! Serialized node dumps, as produced by an out-of-process parser.
//!
//! ```json
//! { "revision": 0, "nodes": [ { "kind": "formatting-escape", "start": 9, "end": 10 } ] }
//! ```

use serde::{Deserialize, Serialize};
use veil_primitives::{Revision, TextRange};

use crate::node::SyntaxNode;
use crate::tree::{NodeTree, TreeError};

/// One node entry of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
	pub kind: String,
	pub start: usize,
	pub end: usize,
}

/// Flat node dump for one document revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeListing {
	/// Revision the dump was parsed from. Absent means "current".
	#[serde(default)]
	pub revision: Option<u64>,
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
}

impl NodeListing {
	/// Converts the dump into a tree, using `current` when the listing does
	/// not name a revision.
	pub fn into_tree(self, current: Revision, doc_len: usize) -> Result<NodeTree, TreeError> {
		let revision = self.revision.map(Revision).unwrap_or(current);
		let mut nodes = Vec::with_capacity(self.nodes.len());
		for record in self.nodes {
			if record.start > record.end {
				return Err(TreeError::Inverted {
					kind: record.kind,
					start: record.start,
					end: record.end,
				});
			}
			nodes.push(SyntaxNode::new(
				record.kind,
				TextRange::new(record.start, record.end),
			));
		}
		NodeTree::from_nodes(revision, doc_len, nodes)
	}
}

impl From<&NodeTree> for NodeListing {
	fn from(tree: &NodeTree) -> Self {
		use crate::tree::SyntaxTree;

		Self {
			revision: Some(tree.revision().0),
			nodes: tree
				.nodes()
				.iter()
				.map(|n| NodeRecord {
					kind: n.kind.to_string(),
					start: n.start(),
					end: n.end(),
				})
				.collect(),
		}
	}
}
