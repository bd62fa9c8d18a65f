//! Decoration sets: rendering-only replacements of text ranges.
//!
//! [`build`] walks the syntax tree over the visible ranges and emits one
//! [`DecorationEntry`] per matching node. The resulting [`DecorationSet`] is
//! immutable; callers replace it wholesale when the document or viewport
//! changes. Nothing here mutates document text.

/// Tree walk producing decoration sets.
pub mod build;
/// Rendering adapters turning replacements into host output.
pub mod paint;
/// What a decorated range is shown as.
pub mod replacement;
/// Node-kind detection rules.
pub mod rules;
/// Immutable decoration sets and their builder.
pub mod set;
/// Colon-delimited emoji shortcodes.
pub mod shortcode;

pub use build::{DecorationBuilder, build};
pub use paint::{Emphasis, ReplacementRenderer, Segment, StyledText, TextRenderer, display_text, paint};
pub use replacement::{Glyph, Replacement};
pub use rules::{ESCAPE_KIND, Rules};
pub use set::{DecorationEntry, DecorationSet, DecorationSetBuilder};
