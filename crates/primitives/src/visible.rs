use smallvec::SmallVec;

use crate::range::{RangeError, TextRange};

/// The ranges currently rendered on screen.
///
/// Always ascending and pairwise disjoint. Hosts that cannot guarantee that
/// ordering go through [`VisibleRanges::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleRanges {
	ranges: SmallVec<[TextRange; 4]>,
}

impl VisibleRanges {
	/// Builds from ranges the host promises are ascending and disjoint.
	pub fn new(ranges: impl IntoIterator<Item = TextRange>) -> Result<Self, RangeError> {
		let ranges: SmallVec<[TextRange; 4]> = ranges.into_iter().collect();
		for pair in ranges.windows(2) {
			if pair[1].start < pair[0].end {
				return Err(RangeError::Unordered {
					prev: pair[0],
					next: pair[1],
				});
			}
		}
		Ok(Self { ranges })
	}

	/// Sorts and merges arbitrary ranges into a valid set.
	pub fn normalized(ranges: impl IntoIterator<Item = TextRange>) -> Self {
		let mut sorted: SmallVec<[TextRange; 4]> = ranges.into_iter().collect();
		sorted.sort_by_key(|r| (r.start, r.end));

		let mut merged: SmallVec<[TextRange; 4]> = SmallVec::with_capacity(sorted.len());
		for range in sorted {
			match merged.last_mut() {
				Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
				_ => merged.push(range),
			}
		}
		Self { ranges: merged }
	}

	/// A single visible range.
	pub fn single(range: TextRange) -> Self {
		Self {
			ranges: smallvec::smallvec![range],
		}
	}

	pub fn len(&self) -> usize {
		self.ranges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &TextRange> + '_ {
		self.ranges.iter()
	}

	pub fn as_slice(&self) -> &[TextRange] {
		&self.ranges
	}

	/// Returns true if `range` intersects at least one visible range.
	pub fn intersects(&self, range: &TextRange) -> bool {
		self.ranges.iter().any(|r| r.intersects(range))
	}

	/// Clamps every range to a document of `len` characters, dropping ranges
	/// left with nothing on screen.
	pub fn clamp(&self, len: usize) -> Self {
		let ranges = self
			.ranges
			.iter()
			.map(|r| r.clamp_to_len(len))
			.filter(|r| !r.is_empty())
			.collect();
		Self { ranges }
	}
}

impl<'a> IntoIterator for &'a VisibleRanges {
	type Item = &'a TextRange;
	type IntoIter = std::slice::Iter<'a, TextRange>;

	fn into_iter(self) -> Self::IntoIter {
		self.ranges.iter()
	}
}
