//! Rope utilities for neighbourhood checks around nodes.

use ropey::RopeSlice;

use crate::range::{CharIdx, TextRange};

/// Returns the character immediately before `pos`, if any.
#[inline]
pub fn char_before(text: RopeSlice<'_>, pos: CharIdx) -> Option<char> {
	if pos == 0 || pos > text.len_chars() {
		return None;
	}
	Some(text.char(pos - 1))
}

/// Returns the character at `pos` (the one immediately after a range ending
/// at `pos`), if any.
#[inline]
pub fn char_at(text: RopeSlice<'_>, pos: CharIdx) -> Option<char> {
	(pos < text.len_chars()).then(|| text.char(pos))
}

/// Returns true if `range` holds exactly the text `expected`.
pub fn range_eq(text: RopeSlice<'_>, range: TextRange, expected: &str) -> bool {
	if range.end > text.len_chars() || range.len() != expected.chars().count() {
		return false;
	}
	text.slice(range.as_std()).chars().eq(expected.chars())
}
