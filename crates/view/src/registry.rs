//! Per-host bookkeeping of live view controllers.

use std::collections::HashMap;

use veil_decoration::{DecorationBuilder, DecorationSet};

use crate::controller::{Outcome, ViewController};
use crate::host::ViewHost;
use crate::update::{UpdatePolicy, ViewUpdate};

/// Identifier of a live view. Never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Event addressed to one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
	/// A change report for the view.
	Update(ViewUpdate),
	/// The view is closing.
	Detach,
}

/// Owns the controllers of every open view and routes host events to them.
///
/// Events are dispatched one at a time on the caller's thread; each returns
/// only after any rebuild it triggered is complete.
#[derive(Debug)]
pub struct ViewRegistry {
	views: HashMap<ViewId, ViewController>,
	next_id: u64,
	builder: DecorationBuilder,
	policy: UpdatePolicy,
}

impl Default for ViewRegistry {
	fn default() -> Self {
		Self::new(DecorationBuilder::default(), UpdatePolicy::default())
	}
}

impl ViewRegistry {
	pub fn new(builder: DecorationBuilder, policy: UpdatePolicy) -> Self {
		Self {
			views: HashMap::new(),
			next_id: 1,
			builder,
			policy,
		}
	}

	/// Creates a controller for a new view and builds its initial set.
	pub fn open<H: ViewHost + ?Sized>(&mut self, host: &H) -> ViewId {
		let id = ViewId(self.next_id);
		self.next_id += 1;

		let mut controller = ViewController::with_builder(id, self.builder.clone(), self.policy);
		controller.attach(host);
		self.views.insert(id, controller);
		id
	}

	/// Routes `event` to view `id`.
	///
	/// Events for closed or unknown views are ignored.
	pub fn dispatch<H: ViewHost + ?Sized>(&mut self, id: ViewId, event: ViewEvent, host: &H) -> Outcome {
		match event {
			ViewEvent::Update(update) => match self.views.get_mut(&id) {
				Some(view) => view.update(host, update),
				None => {
					tracing::trace!(view = ?id, "update for unknown view ignored");
					Outcome::Ignored
				}
			},
			ViewEvent::Detach => self.close(id),
		}
	}

	/// Detaches and drops view `id`.
	pub fn close(&mut self, id: ViewId) -> Outcome {
		match self.views.remove(&id) {
			Some(mut view) => view.detach(),
			None => Outcome::Ignored,
		}
	}

	/// Decorations currently exposed for view `id`.
	pub fn decorations(&self, id: ViewId) -> Option<&DecorationSet> {
		self.views.get(&id).and_then(ViewController::decorations)
	}

	pub fn get(&self, id: ViewId) -> Option<&ViewController> {
		self.views.get(&id)
	}

	pub fn len(&self) -> usize {
		self.views.len()
	}

	pub fn is_empty(&self) -> bool {
		self.views.is_empty()
	}

	pub fn ids(&self) -> impl Iterator<Item = ViewId> + '_ {
		self.views.keys().copied()
	}
}
