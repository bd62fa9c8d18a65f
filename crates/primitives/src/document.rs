use std::borrow::Cow;

use ropey::{Rope, RopeSlice};

use crate::range::{RangeError, TextRange};

/// Monotonic identity of one document state.
///
/// Every mutation yields a strictly larger revision, so a syntax tree or a
/// decoration set tagged with an older revision is known to be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(pub u64);

impl Revision {
	/// Returns the revision following this one.
	#[inline]
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl std::fmt::Display for Revision {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "r{}", self.0)
	}
}

/// Host-owned text buffer.
///
/// The decoration pipeline only ever reads a `Document`; the editing methods
/// exist for the host (and tests) that own it.
#[derive(Debug, Clone, Default)]
pub struct Document {
	text: Rope,
	revision: Revision,
}

impl Document {
	/// Creates a document at revision zero.
	pub fn new(text: &str) -> Self {
		Self {
			text: Rope::from(text),
			revision: Revision::default(),
		}
	}

	#[inline]
	pub fn revision(&self) -> Revision {
		self.revision
	}

	#[inline]
	pub fn rope(&self) -> &Rope {
		&self.text
	}

	#[inline]
	pub fn slice(&self) -> RopeSlice<'_> {
		self.text.slice(..)
	}

	/// Length in characters.
	#[inline]
	pub fn len_chars(&self) -> usize {
		self.text.len_chars()
	}

	/// Full extent of the document.
	pub fn full_range(&self) -> TextRange {
		TextRange::new(0, self.len_chars())
	}

	/// Returns the text in `range`, clamped to the document.
	///
	/// Borrows when the slice lies within a single rope chunk.
	pub fn slice_doc(&self, range: TextRange) -> Cow<'_, str> {
		let range = range.clamp_to_len(self.len_chars());
		let slice = self.text.slice(range.as_std());
		match slice.as_str() {
			Some(s) => Cow::Borrowed(s),
			None => Cow::Owned(slice.to_string()),
		}
	}

	/// Replaces `range` with `text` and advances the revision.
	pub fn replace(&mut self, range: TextRange, text: &str) -> Result<Revision, RangeError> {
		range.check_bounds(self.len_chars())?;
		self.text.remove(range.as_std());
		self.text.insert(range.start, text);
		self.revision = self.revision.next();
		Ok(self.revision)
	}

	/// Inserts `text` at `pos` and advances the revision.
	pub fn insert(&mut self, pos: usize, text: &str) -> Result<Revision, RangeError> {
		self.replace(TextRange::point(pos), text)
	}
}

impl std::fmt::Display for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for chunk in self.text.chunks() {
			f.write_str(chunk)?;
		}
		Ok(())
	}
}
