use std::borrow::Cow;

use bitflags::bitflags;
use veil_primitives::{Document, TextRange};

use crate::replacement::{Glyph, Replacement};
use crate::set::DecorationSet;

bitflags! {
	/// Presentation hints attached to rendered replacement text.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Emphasis: u8 {
		/// Low-emphasis colour (the host's "faint" text).
		const FAINT = 0b0001;
		/// Content is a substituted glyph rather than document text.
		const GLYPH = 0b0010;
	}
}

/// Translates a [`Replacement`] into host-specific renderable output.
///
/// One adapter covers every replacement kind; hosts implement it once for
/// their widget type instead of one widget type per kind.
pub trait ReplacementRenderer {
	type Output;

	fn render(&self, replacement: &Replacement) -> Self::Output;
}

/// Rendered replacement for text surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
	pub text: Cow<'static, str>,
	pub emphasis: Emphasis,
}

/// Renders replacements as styled strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl ReplacementRenderer for TextRenderer {
	type Output = StyledText;

	fn render(&self, replacement: &Replacement) -> StyledText {
		match replacement {
			Replacement::DimText(text) => StyledText {
				text: text.clone(),
				emphasis: Emphasis::FAINT,
			},
			Replacement::Glyph(Glyph::Text(text)) => StyledText {
				text: text.clone(),
				emphasis: Emphasis::GLYPH,
			},
			Replacement::Glyph(Glyph::Image { alt, .. }) => StyledText {
				text: alt.clone(),
				emphasis: Emphasis::GLYPH,
			},
			Replacement::Empty => StyledText {
				text: Cow::Borrowed(""),
				emphasis: Emphasis::empty(),
			},
		}
	}
}

/// A run of painted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<W> {
	/// Document text shown as-is.
	Source(TextRange),
	/// A replacement widget drawn over `range`.
	Widget { range: TextRange, widget: W },
}

/// Splits `range` into source runs and replacement widgets.
///
/// A set built for another revision is not applied at all: its offsets no
/// longer describe `doc`, so the range is painted as plain source.
pub fn paint<R>(doc: &Document, set: &DecorationSet, range: TextRange, renderer: &R) -> Vec<Segment<R::Output>>
where
	R: ReplacementRenderer,
{
	let range = range.clamp_to_len(doc.len_chars());
	if set.revision() != doc.revision() {
		tracing::trace!(set = %set.revision(), doc = %doc.revision(), "painting without stale decorations");
		return if range.is_empty() {
			Vec::new()
		} else {
			vec![Segment::Source(range)]
		};
	}

	let mut segments = Vec::new();
	let mut pos = range.start;
	for entry in set.entries_in(range) {
		// Widgets are atomic; one hanging off the range edge is not drawn.
		if !range.covers(&entry.range) {
			continue;
		}
		if entry.start() > pos {
			segments.push(Segment::Source(TextRange::new(pos, entry.start())));
		}
		segments.push(Segment::Widget {
			range: entry.range,
			widget: renderer.render(&entry.replacement),
		});
		pos = entry.end();
	}
	if pos < range.end {
		segments.push(Segment::Source(TextRange::new(pos, range.end)));
	}
	segments
}

/// Text a plain surface would display for `range` with `set` applied.
pub fn display_text(doc: &Document, set: &DecorationSet, range: TextRange) -> String {
	let mut out = String::new();
	for segment in paint(doc, set, range, &TextRenderer) {
		match segment {
			Segment::Source(r) => out.push_str(&doc.slice_doc(r)),
			Segment::Widget { widget, .. } => out.push_str(&widget.text),
		}
	}
	out
}
