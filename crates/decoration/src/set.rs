use std::sync::Arc;

use veil_primitives::{CharIdx, Revision, TextRange};

use crate::replacement::Replacement;

/// One replaced range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationEntry {
	pub range: TextRange,
	pub replacement: Replacement,
}

impl DecorationEntry {
	#[inline]
	pub fn start(&self) -> CharIdx {
		self.range.start
	}

	#[inline]
	pub fn end(&self) -> CharIdx {
		self.range.end
	}
}

/// Immutable, sorted, non-overlapping decorations for one document revision.
///
/// Cloning shares the entry storage. A set is never patched: every rebuild
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationSet {
	revision: Revision,
	entries: Arc<[DecorationEntry]>,
}

impl DecorationSet {
	/// Set with no decorations.
	pub fn none(revision: Revision) -> Self {
		Self {
			revision,
			entries: Arc::from(Vec::new()),
		}
	}

	/// Revision of the document the set was built against.
	pub fn revision(&self) -> Revision {
		self.revision
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, DecorationEntry> {
		self.entries.iter()
	}

	pub fn as_slice(&self) -> &[DecorationEntry] {
		&self.entries
	}

	/// Entries intersecting `range`, in order.
	pub fn entries_in(&self, range: TextRange) -> impl Iterator<Item = &DecorationEntry> + '_ {
		// Non-overlap means ends ascend with starts.
		let first = self.entries.partition_point(|e| e.end() < range.start);
		self.entries[first..]
			.iter()
			.take_while(move |e| e.start() <= range.end)
			.filter(move |e| e.range.intersects(&range))
	}

	/// Entry whose range contains `pos`.
	pub fn at(&self, pos: CharIdx) -> Option<&DecorationEntry> {
		let idx = self.entries.partition_point(|e| e.end() <= pos);
		self.entries.get(idx).filter(|e| e.range.contains(pos))
	}

	/// Smallest range covering every entry that differs between two sets.
	///
	/// Returns `None` when the entries are identical, meaning nothing on
	/// screen needs repainting.
	pub fn changed_range(old: &DecorationSet, new: &DecorationSet) -> Option<TextRange> {
		let (a, b) = (&old.entries[..], &new.entries[..]);
		let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
		let (a, b) = (&a[prefix..], &b[prefix..]);
		let suffix = a
			.iter()
			.rev()
			.zip(b.iter().rev())
			.take_while(|(x, y)| x == y)
			.count();
		let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);
		a.iter()
			.chain(b)
			.map(|e| e.range)
			.reduce(|acc, r| acc.union(&r))
	}
}

impl<'a> IntoIterator for &'a DecorationSet {
	type Item = &'a DecorationEntry;
	type IntoIter = std::slice::Iter<'a, DecorationEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Accumulates entries in document order into a [`DecorationSet`].
///
/// An entry starting before the previous entry's end is dropped. Traversal
/// order normally rules this out; it still happens for a node straddling two
/// adjacent visible ranges, or with grammars whose node kinds overlap.
#[derive(Debug)]
pub struct DecorationSetBuilder {
	revision: Revision,
	entries: Vec<DecorationEntry>,
	skipped: usize,
}

impl DecorationSetBuilder {
	pub fn new(revision: Revision) -> Self {
		Self {
			revision,
			entries: Vec::new(),
			skipped: 0,
		}
	}

	/// Appends an entry. Returns false if it was dropped as overlapping.
	pub fn add(&mut self, range: TextRange, replacement: Replacement) -> bool {
		if let Some(last) = self.entries.last()
			&& (range.start < last.end() || (range == last.range && range.is_empty()))
		{
			tracing::trace!(%range, previous = %last.range, "skipping overlapping decoration");
			self.skipped += 1;
			return false;
		}
		self.entries.push(DecorationEntry { range, replacement });
		true
	}

	/// Number of entries dropped so far.
	pub fn skipped(&self) -> usize {
		self.skipped
	}

	pub fn finish(self) -> DecorationSet {
		DecorationSet {
			revision: self.revision,
			entries: Arc::from(self.entries),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn set(ranges: &[(usize, usize)]) -> DecorationSet {
		let mut b = DecorationSetBuilder::new(Revision(0));
		for &(s, e) in ranges {
			b.add(TextRange::new(s, e), Replacement::Empty);
		}
		b.finish()
	}

	#[test]
	fn test_builder_skips_overlap() {
		let mut b = DecorationSetBuilder::new(Revision(1));
		assert!(b.add(TextRange::new(2, 4), Replacement::Empty));
		assert!(!b.add(TextRange::new(3, 6), Replacement::Empty));
		assert!(!b.add(TextRange::new(2, 4), Replacement::Empty));
		assert!(b.add(TextRange::new(4, 5), Replacement::dimmed_backslash()));
		assert_eq!(b.skipped(), 2);

		let set = b.finish();
		assert_eq!(set.revision(), Revision(1));
		let ranges: Vec<_> = set.iter().map(|e| e.range).collect();
		assert_eq!(ranges, [TextRange::new(2, 4), TextRange::new(4, 5)]);
	}

	#[test]
	fn test_builder_rejects_duplicate_point() {
		let mut b = DecorationSetBuilder::new(Revision(0));
		assert!(b.add(TextRange::point(3), Replacement::Empty));
		assert!(!b.add(TextRange::point(3), Replacement::Empty));
		assert!(b.add(TextRange::new(3, 4), Replacement::Empty));
	}

	#[test]
	fn test_entries_in_and_at() {
		let s = set(&[(1, 2), (5, 7), (9, 10)]);
		let hits: Vec<_> = s.entries_in(TextRange::new(6, 9)).map(|e| e.range).collect();
		assert_eq!(hits, [TextRange::new(5, 7)]);

		assert_eq!(s.at(6).map(|e| e.range), Some(TextRange::new(5, 7)));
		assert_eq!(s.at(7), None);
		assert_eq!(s.at(9).map(|e| e.range), Some(TextRange::new(9, 10)));
	}

	#[test]
	fn test_changed_range() {
		let old = set(&[(1, 2), (5, 7), (9, 10)]);
		assert_eq!(DecorationSet::changed_range(&old, &old.clone()), None);

		let new = set(&[(1, 2), (6, 8), (9, 10)]);
		assert_eq!(
			DecorationSet::changed_range(&old, &new),
			Some(TextRange::new(5, 8))
		);

		let grown = set(&[(1, 2), (5, 7), (9, 10), (20, 21)]);
		assert_eq!(
			DecorationSet::changed_range(&old, &grown),
			Some(TextRange::new(20, 21))
		);

		let cleared = DecorationSet::none(Revision(0));
		assert_eq!(
			DecorationSet::changed_range(&old, &cleared),
			Some(TextRange::new(1, 10))
		);
	}
}
