use veil_decoration::{DecorationBuilder, DecorationSet};
use veil_primitives::{TextRange, VisibleRanges};

use crate::host::ViewHost;
use crate::registry::ViewId;
use crate::update::{UpdatePolicy, ViewUpdate};

/// Lifecycle of one view's decorations.
///
/// `Uninitialized -> Built -> Built ... -> Destroyed`. `Destroyed` is
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
	/// Not yet attached to a view.
	#[default]
	Uninitialized,
	/// Attached; holds the current decorations.
	Built(DecorationSet),
	/// Detached; no further updates are processed.
	Destroyed,
}

/// Host event driving a [`ViewState`] transition.
pub enum Lifecycle<'h, H: ?Sized> {
	/// The view was created.
	Attach(&'h H),
	/// The host reported a change.
	Update(&'h H, ViewUpdate),
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// A new set replaced the old one. `changed` is the region to repaint,
	/// `None` if the new set draws the same as the old.
	Rebuilt { changed: Option<TextRange> },
	/// The update did not invalidate the set.
	Unchanged,
	/// The view was detached and its set released.
	Released,
	/// The event did not apply in the current state.
	Ignored,
}

fn rebuild<H: ViewHost + ?Sized>(host: &H, builder: &DecorationBuilder, policy: UpdatePolicy) -> DecorationSet {
	let settings = host.settings();
	let doc = host.document();
	let ranges = match policy {
		UpdatePolicy::Viewport => host.visible_ranges(),
		UpdatePolicy::Document => VisibleRanges::single(doc.full_range()),
	};
	builder.build(host.syntax(), doc, &ranges, &settings)
}

impl ViewState {
	/// Computes the state following `event`.
	///
	/// Building happens synchronously inside the transition, so the returned
	/// state always holds a complete set.
	pub fn next<H: ViewHost + ?Sized>(
		self,
		event: Lifecycle<'_, H>,
		builder: &DecorationBuilder,
		policy: UpdatePolicy,
	) -> (Self, Outcome) {
		match (self, event) {
			(Self::Uninitialized, Lifecycle::Attach(host)) => {
				let set = rebuild(host, builder, policy);
				let changed = DecorationSet::changed_range(&DecorationSet::none(set.revision()), &set);
				(Self::Built(set), Outcome::Rebuilt { changed })
			}
			(Self::Built(old), Lifecycle::Update(host, update)) => {
				if !policy.should_rebuild(&update) {
					return (Self::Built(old), Outcome::Unchanged);
				}
				let set = rebuild(host, builder, policy);
				let changed = DecorationSet::changed_range(&old, &set);
				(Self::Built(set), Outcome::Rebuilt { changed })
			}
			(state, _) => (state, Outcome::Ignored),
		}
	}

	/// Computes the state following detachment.
	pub fn release(self) -> (Self, Outcome) {
		match self {
			Self::Destroyed => (Self::Destroyed, Outcome::Ignored),
			Self::Uninitialized | Self::Built(_) => (Self::Destroyed, Outcome::Released),
		}
	}
}

/// Owns the decoration set of a single live view.
#[derive(Debug)]
pub struct ViewController {
	id: ViewId,
	state: ViewState,
	builder: DecorationBuilder,
	policy: UpdatePolicy,
	rebuilds: u64,
}

impl ViewController {
	/// Creates an unattached controller with the default rules and policy.
	pub fn new(id: ViewId) -> Self {
		Self::with_builder(id, DecorationBuilder::default(), UpdatePolicy::default())
	}

	pub fn with_builder(id: ViewId, builder: DecorationBuilder, policy: UpdatePolicy) -> Self {
		Self {
			id,
			state: ViewState::Uninitialized,
			builder,
			policy,
			rebuilds: 0,
		}
	}

	pub fn id(&self) -> ViewId {
		self.id
	}

	pub fn policy(&self) -> UpdatePolicy {
		self.policy
	}

	pub fn state(&self) -> &ViewState {
		&self.state
	}

	/// Current decorations, if attached.
	pub fn decorations(&self) -> Option<&DecorationSet> {
		match &self.state {
			ViewState::Built(set) => Some(set),
			_ => None,
		}
	}

	pub fn is_destroyed(&self) -> bool {
		matches!(self.state, ViewState::Destroyed)
	}

	/// Number of sets built over this controller's life.
	pub fn rebuild_count(&self) -> u64 {
		self.rebuilds
	}

	/// Builds the initial set.
	pub fn attach<H: ViewHost + ?Sized>(&mut self, host: &H) -> Outcome {
		self.apply(Lifecycle::Attach(host))
	}

	/// Handles a host change report.
	pub fn update<H: ViewHost + ?Sized>(&mut self, host: &H, update: ViewUpdate) -> Outcome {
		self.apply(Lifecycle::Update(host, update))
	}

	/// Releases the set. Later events are ignored.
	pub fn detach(&mut self) -> Outcome {
		let (state, outcome) = std::mem::take(&mut self.state).release();
		self.state = state;
		self.record(outcome);
		outcome
	}

	fn apply<H: ViewHost + ?Sized>(&mut self, event: Lifecycle<'_, H>) -> Outcome {
		let (state, outcome) = std::mem::take(&mut self.state).next(event, &self.builder, self.policy);
		self.state = state;
		self.record(outcome);
		outcome
	}

	fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::Rebuilt { changed } => {
				self.rebuilds += 1;
				tracing::debug!(
					view = ?self.id,
					revision = %self.decorations().map(|s| s.revision()).unwrap_or_default(),
					entries = self.decorations().map_or(0, |s| s.len()),
					changed = ?changed,
					"decorations rebuilt"
				);
			}
			Outcome::Released => tracing::debug!(view = ?self.id, "decorations released"),
			Outcome::Ignored => tracing::trace!(view = ?self.id, "event ignored in current state"),
			Outcome::Unchanged => {}
		}
	}
}
