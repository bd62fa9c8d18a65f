use veil_config::Settings;
use veil_primitives::{Document, VisibleRanges};
use veil_syntax::{NodeTree, SyntaxTree};

/// What a view controller reads from its host on every rebuild.
///
/// Everything is re-fetched per rebuild; controllers keep no reference to
/// the tree or document between calls.
pub trait ViewHost {
	type Tree: SyntaxTree + ?Sized;

	/// Current document state.
	fn document(&self) -> &Document;

	/// Syntax tree for the current document state.
	fn syntax(&self) -> &Self::Tree;

	/// Ranges currently on screen, ascending and disjoint.
	fn visible_ranges(&self) -> VisibleRanges;

	/// Feature settings, read once per rebuild.
	fn settings(&self) -> Settings;
}

/// Owned host state for a single view.
///
/// Useful for hosts that copy editor state out per tick, and for tests.
#[derive(Debug, Clone)]
pub struct Snapshot {
	pub document: Document,
	pub tree: NodeTree,
	pub visible: VisibleRanges,
	pub settings: Settings,
}

impl Snapshot {
	/// Host state showing the whole document with default settings.
	pub fn new(document: Document, tree: NodeTree) -> Self {
		let visible = VisibleRanges::single(document.full_range());
		Self {
			document,
			tree,
			visible,
			settings: Settings::default(),
		}
	}
}

impl ViewHost for Snapshot {
	type Tree = NodeTree;

	fn document(&self) -> &Document {
		&self.document
	}

	fn syntax(&self) -> &NodeTree {
		&self.tree
	}

	fn visible_ranges(&self) -> VisibleRanges {
		self.visible.clone()
	}

	fn settings(&self) -> Settings {
		self.settings
	}
}
