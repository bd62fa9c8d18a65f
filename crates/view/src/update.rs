/// Change report delivered once per host update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewUpdate {
	/// Document text changed.
	pub document_changed: bool,
	/// Visible ranges moved (scroll, resize).
	pub viewport_changed: bool,
	/// Feature settings changed.
	pub settings_changed: bool,
}

impl ViewUpdate {
	/// A document edit.
	pub fn document() -> Self {
		Self {
			document_changed: true,
			..Self::default()
		}
	}

	/// A scroll or resize.
	pub fn viewport() -> Self {
		Self {
			viewport_changed: true,
			..Self::default()
		}
	}

	/// A settings toggle.
	pub fn settings() -> Self {
		Self {
			settings_changed: true,
			..Self::default()
		}
	}

	/// An update with no relevant change, such as a cursor move.
	pub fn selection() -> Self {
		Self::default()
	}

	/// Returns true if decorations built before this update may be wrong.
	pub fn invalidates(&self) -> bool {
		self.document_changed || self.viewport_changed || self.settings_changed
	}
}

/// How much of the document a view decorates, and when it rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
	/// Decorate visible ranges; rebuild only on invalidating updates.
	#[default]
	Viewport,
	/// Decorate the whole document; rebuild on every update.
	Document,
}

impl UpdatePolicy {
	/// Returns true if `update` should trigger a rebuild under this policy.
	pub fn should_rebuild(&self, update: &ViewUpdate) -> bool {
		match self {
			Self::Viewport => update.invalidates(),
			Self::Document => true,
		}
	}
}
