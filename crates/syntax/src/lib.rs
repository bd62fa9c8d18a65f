//! Syntax tree access for the decoration pipeline.
//!
//! Parsing happens elsewhere. This crate only models the result: an immutable
//! tree of `{kind, range}` nodes tagged with the document revision it was
//! parsed from, plus range-restricted pre-order traversal over it.

mod builder;
mod listing;
mod node;
mod tree;

pub use builder::TreeBuilder;
pub use listing::{NodeListing, NodeRecord};
pub use node::{NodeKind, SyntaxNode, Walk};
pub use tree::{NodeTree, SyntaxTree, TreeError};

/// Result type for tree construction.
pub type Result<T> = std::result::Result<T, TreeError>;
