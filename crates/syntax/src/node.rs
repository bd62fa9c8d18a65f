use std::sync::Arc;

use veil_primitives::TextRange;

/// Grammar-defined node label (e.g. `formatting-escape`, `inline-code`).
///
/// Cloning is a reference-count bump; parsers emit the same handful of kinds
/// many times over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKind(Arc<str>);

impl NodeKind {
	pub fn new(kind: &str) -> Self {
		Self(Arc::from(kind))
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeKind {
	fn from(kind: &str) -> Self {
		Self::new(kind)
	}
}

impl From<String> for NodeKind {
	fn from(kind: String) -> Self {
		Self(Arc::from(kind))
	}
}

impl PartialEq<str> for NodeKind {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for NodeKind {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl std::fmt::Display for NodeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// One node of the host parser's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
	pub kind: NodeKind,
	pub range: TextRange,
}

impl SyntaxNode {
	pub fn new(kind: impl Into<NodeKind>, range: impl Into<TextRange>) -> Self {
		Self {
			kind: kind.into(),
			range: range.into(),
		}
	}

	#[inline]
	pub fn start(&self) -> usize {
		self.range.start
	}

	#[inline]
	pub fn end(&self) -> usize {
		self.range.end
	}

	/// Returns true if `other` nests inside this node.
	pub fn contains(&self, other: &SyntaxNode) -> bool {
		self.range.covers(&other.range)
	}
}

/// Visitor verdict for [`SyntaxTree::walk`](crate::SyntaxTree::walk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
	/// Descend into the node's children.
	Continue,
	/// Move on to the node's next sibling.
	SkipChildren,
	/// End the traversal.
	Stop,
}
