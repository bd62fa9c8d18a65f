use thiserror::Error;

use crate::tree::NodeId;

/// Errors from output tree manipulation.
#[derive(Debug, Error)]
pub enum RenderError {
	/// The node was removed from the tree.
	#[error("output node {0:?} no longer exists")]
	Missing(NodeId),

	/// Children can only be appended to elements.
	#[error("output node {0:?} is not an element")]
	NotElement(NodeId),

	/// The node has no parent to be replaced within.
	#[error("output node {0:?} is detached")]
	Detached(NodeId),

	/// A serialized output tree could not be parsed.
	#[error("invalid output tree: {0}")]
	Spec(#[from] serde_json::Error),
}

/// Result type for output tree operations.
pub type Result<T> = std::result::Result<T, RenderError>;
