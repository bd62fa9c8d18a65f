use crate::tree::OutputTree;

/// A lifecycle owner bound to one render pass.
pub trait RenderChild {
	/// Called once when the render context loads its children.
	fn on_load(&mut self, tree: &mut OutputTree);

	/// Called when the render context is torn down.
	fn on_unload(&mut self, _tree: &mut OutputTree) {}
}

/// Collects the children registered during post-processing.
#[derive(Default)]
pub struct RenderContext {
	children: Vec<Box<dyn RenderChild>>,
	loaded: usize,
}

impl RenderContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a child whose lifecycle is bound to this context.
	pub fn add_child(&mut self, child: Box<dyn RenderChild>) {
		self.children.push(child);
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Loads every child not loaded yet. Returns how many were loaded.
	pub fn load_children(&mut self, tree: &mut OutputTree) -> usize {
		let pending = &mut self.children[self.loaded..];
		for child in pending.iter_mut() {
			child.on_load(tree);
		}
		let count = pending.len();
		self.loaded = self.children.len();
		count
	}

	/// Unloads loaded children in reverse registration order and drops all.
	pub fn unload(&mut self, tree: &mut OutputTree) {
		for child in self.children[..self.loaded].iter_mut().rev() {
			child.on_unload(tree);
		}
		self.children.clear();
		self.loaded = 0;
	}
}

impl std::fmt::Debug for RenderContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenderContext")
			.field("children", &self.children.len())
			.field("loaded", &self.loaded)
			.finish()
	}
}
