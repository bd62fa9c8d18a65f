use thiserror::Error;

/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// Errors raised when constructing ranges from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
	/// The range ends before it starts.
	#[error("range {start}..{end} is inverted")]
	Inverted {
		/// Requested start.
		start: CharIdx,
		/// Requested end.
		end: CharIdx,
	},

	/// The range extends past the end of the document.
	#[error("range {start}..{end} exceeds document length {len}")]
	OutOfBounds {
		/// Requested start.
		start: CharIdx,
		/// Requested end.
		end: CharIdx,
		/// Document length in characters.
		len: usize,
	},

	/// Visible ranges were not ascending and disjoint.
	#[error("visible range {next} overlaps or precedes {prev}")]
	Unordered {
		/// The preceding range.
		prev: TextRange,
		/// The offending range.
		next: TextRange,
	},

	/// A textual range could not be parsed.
	#[error("invalid range syntax: {0:?} (expected START..END)")]
	Syntax(String),
}

/// Half-open character range `[start, end)`.
///
/// Unlike a selection, a `TextRange` has no direction: `start <= end` always
/// holds for values built through [`TextRange::new`] or [`TextRange::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextRange {
	/// Inclusive start.
	pub start: CharIdx,
	/// Exclusive end.
	pub end: CharIdx,
}

impl TextRange {
	/// Creates a range, swapping the bounds if they are inverted.
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		if start <= end {
			Self { start, end }
		} else {
			Self { start: end, end: start }
		}
	}

	/// Creates a range, rejecting inverted bounds.
	pub fn try_new(start: CharIdx, end: CharIdx) -> Result<Self, RangeError> {
		if start > end {
			return Err(RangeError::Inverted { start, end });
		}
		Ok(Self { start, end })
	}

	/// Zero-width range at `pos`.
	pub fn point(pos: CharIdx) -> Self {
		Self { start: pos, end: pos }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `pos` lies within `[start, end)`.
	#[inline]
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.start && pos < self.end
	}

	/// Returns true if `other` lies entirely within this range.
	pub fn covers(&self, other: &TextRange) -> bool {
		self.start <= other.start && other.end <= self.end
	}

	/// Returns true if the two ranges share at least one position.
	///
	/// A zero-width range intersects a range whose closed interval contains
	/// its point, so an empty node sitting on a viewport edge is still visited.
	pub fn intersects(&self, other: &TextRange) -> bool {
		if self.is_empty() || other.is_empty() {
			return self.start <= other.end && other.start <= self.end;
		}
		self.start < other.end && other.start < self.end
	}

	/// Returns true if the two ranges share a non-empty span.
	pub fn overlaps(&self, other: &TextRange) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Smallest range covering both.
	pub fn union(&self, other: &TextRange) -> Self {
		Self {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}

	/// Clamps both bounds to `[0, len]`.
	pub fn clamp_to_len(&self, len: usize) -> Self {
		Self {
			start: self.start.min(len),
			end: self.end.min(len),
		}
	}

	/// Validates the range against a document length.
	pub fn check_bounds(&self, len: usize) -> Result<(), RangeError> {
		if self.end > len {
			return Err(RangeError::OutOfBounds {
				start: self.start,
				end: self.end,
				len,
			});
		}
		Ok(())
	}

	/// Converts to a std range for rope slicing.
	#[inline]
	pub fn as_std(&self) -> std::ops::Range<CharIdx> {
		self.start..self.end
	}
}

impl From<std::ops::Range<CharIdx>> for TextRange {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}

impl std::fmt::Display for TextRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

impl std::str::FromStr for TextRange {
	type Err = RangeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (start, end) = s
			.split_once("..")
			.ok_or_else(|| RangeError::Syntax(s.to_string()))?;
		let start = start
			.trim()
			.parse()
			.map_err(|_| RangeError::Syntax(s.to_string()))?;
		let end = end
			.trim()
			.parse()
			.map_err(|_| RangeError::Syntax(s.to_string()))?;
		Self::try_new(start, end)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_new_swaps_inverted_bounds() {
		let r = TextRange::new(10, 5);
		assert_eq!(r, TextRange { start: 5, end: 10 });
		assert_eq!(r.len(), 5);
	}

	#[test]
	fn test_try_new_rejects_inverted() {
		assert_eq!(
			TextRange::try_new(3, 1),
			Err(RangeError::Inverted { start: 3, end: 1 })
		);
	}

	#[test]
	fn test_intersects_half_open() {
		let a = TextRange::new(0, 5);
		assert!(a.intersects(&TextRange::new(4, 8)));
		assert!(!a.intersects(&TextRange::new(5, 8)));
		assert!(!a.overlaps(&TextRange::new(5, 8)));
	}

	#[test]
	fn test_intersects_zero_width_on_edge() {
		let a = TextRange::new(2, 5);
		assert!(a.intersects(&TextRange::point(5)));
		assert!(a.intersects(&TextRange::point(2)));
		assert!(!a.intersects(&TextRange::point(6)));
	}

	#[test]
	fn test_parse_range() {
		assert_eq!("3..9".parse::<TextRange>(), Ok(TextRange::new(3, 9)));
		assert!(matches!("3-9".parse::<TextRange>(), Err(RangeError::Syntax(_))));
		assert!(matches!(
			"9..3".parse::<TextRange>(),
			Err(RangeError::Inverted { .. })
		));
	}

	#[test]
	fn test_check_bounds() {
		assert!(TextRange::new(0, 4).check_bounds(4).is_ok());
		assert!(TextRange::new(0, 5).check_bounds(4).is_err());
	}

	#[test]
	fn test_clamp_to_len_by_value() {
		let range = TextRange::new(3, 12);
		assert_eq!(range.clamp_to_len(8), TextRange::new(3, 8));
		assert_eq!(range.clamp_to_len(2), TextRange::point(2));
		assert_eq!(range.clamp_to_len(20), range);
	}
}
