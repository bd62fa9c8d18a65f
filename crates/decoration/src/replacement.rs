use std::borrow::Cow;

/// Character shown in place of an isolated escape marker.
pub const ESCAPE_GLYPH: &str = "\\";

/// What a decorated range renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
	/// Fixed text drawn with low emphasis.
	DimText(Cow<'static, str>),
	/// A substitute glyph.
	Glyph(Glyph),
	/// Nothing; the range is hidden.
	Empty,
}

/// Visual content of a [`Replacement::Glyph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
	/// One or more code points, e.g. an emoji.
	Text(Cow<'static, str>),
	/// An image reference with fallback text.
	Image {
		src: Cow<'static, str>,
		alt: Cow<'static, str>,
	},
}

impl Replacement {
	/// The faint single-backslash widget used for escape markers.
	pub const fn dimmed_backslash() -> Self {
		Self::DimText(Cow::Borrowed(ESCAPE_GLYPH))
	}

	/// An emoji or other text glyph.
	pub fn glyph(text: impl Into<Cow<'static, str>>) -> Self {
		Self::Glyph(Glyph::Text(text.into()))
	}

	/// Text a plain-text surface would show for this replacement.
	pub fn fallback_text(&self) -> &str {
		match self {
			Self::DimText(text) => text,
			Self::Glyph(Glyph::Text(text)) => text,
			Self::Glyph(Glyph::Image { alt, .. }) => alt,
			Self::Empty => "",
		}
	}
}
