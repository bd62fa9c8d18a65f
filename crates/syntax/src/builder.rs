use veil_primitives::{Document, Revision, TextRange};

use crate::node::SyntaxNode;
use crate::tree::NodeTree;

/// Incremental constructor for [`NodeTree`], mostly used by hosts wiring a
/// parser callback and by tests.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
	revision: Revision,
	nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
	pub fn new(revision: Revision) -> Self {
		Self {
			revision,
			nodes: Vec::new(),
		}
	}

	/// Starts a tree tagged with `doc`'s current revision.
	pub fn for_document(doc: &Document) -> Self {
		Self::new(doc.revision())
	}

	/// Adds a node.
	pub fn node(mut self, kind: &str, range: impl Into<TextRange>) -> Self {
		self.push(kind, range);
		self
	}

	/// Adds a node in place.
	pub fn push(&mut self, kind: &str, range: impl Into<TextRange>) -> &mut Self {
		self.nodes.push(SyntaxNode::new(kind, range));
		self
	}

	/// Validates nesting against a document of `doc_len` characters.
	pub fn build(self, doc_len: usize) -> crate::Result<NodeTree> {
		NodeTree::from_nodes(self.revision, doc_len, self.nodes)
	}
}
