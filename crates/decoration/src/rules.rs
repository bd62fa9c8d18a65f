use veil_primitives::Document;
use veil_primitives::rope::{char_at, char_before, range_eq};
use veil_syntax::{NodeKind, SyntaxNode};

use crate::replacement::{ESCAPE_GLYPH, Replacement};

/// Node kind the markdown grammar assigns to an escape backslash.
pub const ESCAPE_KIND: &str = "formatting-escape";

/// Which node kinds are decorated, and how.
#[derive(Debug, Clone)]
pub struct Rules {
	/// Kind label of escape-marker nodes.
	pub escape_kind: NodeKind,
}

impl Default for Rules {
	fn default() -> Self {
		Self {
			escape_kind: NodeKind::new(ESCAPE_KIND),
		}
	}
}

impl Rules {
	/// Returns the replacement for `node`, if any rule matches it.
	pub fn detect(&self, node: &SyntaxNode, doc: &Document) -> Option<Replacement> {
		if node.kind == self.escape_kind && is_isolated_escape(node, doc) {
			return Some(Replacement::dimmed_backslash());
		}
		None
	}
}

/// Returns true if `node` covers a lone escape character on its own line.
///
/// The neighbourhood `prev + node + next` must read `\` with each neighbour
/// either a line break or the document edge, i.e. `"\\\n"` at the start of
/// the document, `"\n\\\n"` mid-document, or `"\n\\"` on the final line.
pub fn is_isolated_escape(node: &SyntaxNode, doc: &Document) -> bool {
	let text = doc.slice();
	if !range_eq(text, node.range, ESCAPE_GLYPH) {
		return false;
	}
	let at_line_start = matches!(char_before(text, node.start()), None | Some('\n'));
	let at_line_end = matches!(char_at(text, node.end()), None | Some('\n'));
	at_line_start && at_line_end
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use veil_primitives::TextRange;

	use super::*;

	fn escape_at(text: &str, pos: usize) -> (SyntaxNode, Document) {
		(
			SyntaxNode::new(ESCAPE_KIND, TextRange::new(pos, pos + 1)),
			Document::new(text),
		)
	}

	#[rstest]
	#[case::document_start("\\\nrest", 0, true)]
	#[case::own_line("a\n\\\nb", 2, true)]
	#[case::final_line("a\n\\", 2, true)]
	#[case::whole_document("\\", 0, true)]
	#[case::inline("a\\b", 1, false)]
	#[case::leading_text("a\\\nb", 1, false)]
	#[case::trailing_text("a\n\\b", 2, false)]
	#[case::not_a_backslash("a\n*\nb", 2, false)]
	fn test_isolation(#[case] text: &str, #[case] pos: usize, #[case] expected: bool) {
		let (node, doc) = escape_at(text, pos);
		assert_eq!(is_isolated_escape(&node, &doc), expected);
	}

	#[test]
	fn test_detect_requires_kind() {
		let doc = Document::new("\\\n");
		let rules = Rules::default();
		let escape = SyntaxNode::new(ESCAPE_KIND, 0..1);
		let other = SyntaxNode::new("inline-code", 0..1);
		assert_eq!(rules.detect(&escape, &doc), Some(Replacement::dimmed_backslash()));
		assert_eq!(rules.detect(&other, &doc), None);
	}

	#[test]
	fn test_custom_escape_kind() {
		let doc = Document::new("\\\n");
		let rules = Rules {
			escape_kind: NodeKind::new("Escape"),
		};
		assert!(rules.detect(&SyntaxNode::new("Escape", 0..1), &doc).is_some());
		assert!(rules.detect(&SyntaxNode::new(ESCAPE_KIND, 0..1), &doc).is_none());
	}
}
