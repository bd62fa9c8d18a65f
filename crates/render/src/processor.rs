use veil_config::Settings;
use veil_decoration::shortcode;

use crate::context::{RenderChild, RenderContext};
use crate::tree::{NodeId, OutputTree};

/// Hook run once per rendered output tree.
pub trait PostProcessor {
	fn post_process(&self, tree: &mut OutputTree, root: NodeId, ctx: &mut RenderContext);
}

/// Swaps colon-delimited inline code for emoji glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcodeProcessor {
	settings: Settings,
}

impl ShortcodeProcessor {
	pub fn new(settings: Settings) -> Self {
		Self { settings }
	}
}

impl PostProcessor for ShortcodeProcessor {
	fn post_process(&self, tree: &mut OutputTree, root: NodeId, ctx: &mut RenderContext) {
		if !self.settings.enable {
			return;
		}
		for code in tree.find_all(root, "code") {
			let text = tree.inner_text(code);
			let text = text.trim();
			if shortcode::is_shortcode(text) {
				tracing::trace!(code = text, "registering shortcode substitution");
				ctx.add_child(Box::new(ShortcodeChild::new(code, text)));
			}
		}
	}
}

/// Replaces one inline code element with a `span` holding its glyph.
///
/// Unknown shortcodes keep their trimmed text.
#[derive(Debug, Clone)]
pub struct ShortcodeChild {
	target: NodeId,
	code: String,
	replacement: Option<NodeId>,
}

impl ShortcodeChild {
	pub fn new(target: NodeId, code: &str) -> Self {
		Self {
			target,
			code: code.to_string(),
			replacement: None,
		}
	}

	/// The `span` inserted on load.
	pub fn replacement(&self) -> Option<NodeId> {
		self.replacement
	}
}

impl RenderChild for ShortcodeChild {
	fn on_load(&mut self, tree: &mut OutputTree) {
		if tree.parent(self.target).is_none() {
			tracing::debug!(code = %self.code, "shortcode target is detached or gone");
			return;
		}
		let span = tree.element("span");
		let glyph = tree.text(shortcode::substitute(&self.code));
		let swapped = tree
			.append(span, glyph)
			.and_then(|()| tree.replace_with(self.target, span));
		match swapped {
			Ok(()) => self.replacement = Some(span),
			Err(error) => {
				tracing::debug!(%error, code = %self.code, "shortcode swap failed");
				// Drops the glyph text along with the span.
				let _ = tree.remove(span);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const MARKUP: &str = r#"{"tag":"p","children":[
		"Hi ",
		{"tag":"code","children":[" :smile: "]},
		" and ",
		{"tag":"code","children":[":nope:"]},
		" and ",
		{"tag":"code","children":["let x = 1;"]},
		{"tag":"code","children":[":+1:"]}
	]}"#;

	#[test]
	fn test_substitutes_known_and_keeps_unknown() {
		let (mut tree, root) = OutputTree::from_json(MARKUP).unwrap();
		let mut ctx = RenderContext::new();
		ShortcodeProcessor::default().post_process(&mut tree, root, &mut ctx);
		assert_eq!(ctx.len(), 3);

		assert_eq!(ctx.load_children(&mut tree), 3);
		assert_eq!(
			tree.to_markup(root),
			"<p>Hi <span>😄</span> and <span>:nope:</span> and <code>let x = 1;</code><span>👍</span></p>"
		);
	}

	#[test]
	fn test_children_load_once() {
		let (mut tree, root) = OutputTree::from_json(MARKUP).unwrap();
		let mut ctx = RenderContext::new();
		ShortcodeProcessor::default().post_process(&mut tree, root, &mut ctx);
		ctx.load_children(&mut tree);
		let once = tree.to_markup(root);
		assert_eq!(ctx.load_children(&mut tree), 0);
		assert_eq!(tree.to_markup(root), once);

		ctx.unload(&mut tree);
		assert!(ctx.is_empty());
		assert_eq!(tree.to_markup(root), once);
	}

	#[test]
	fn test_disabled_leaves_output() {
		let (mut tree, root) = OutputTree::from_json(MARKUP).unwrap();
		let before = tree.to_markup(root);
		let mut ctx = RenderContext::new();
		ShortcodeProcessor::new(Settings::disabled()).post_process(&mut tree, root, &mut ctx);
		assert!(ctx.is_empty());
		ctx.load_children(&mut tree);
		assert_eq!(tree.to_markup(root), before);
	}

	#[test]
	fn test_root_code_element_cannot_be_replaced() {
		let (mut tree, root) = OutputTree::from_json(r#"{"tag":"code","children":[":smile:"]}"#).unwrap();
		let mut ctx = RenderContext::new();
		ShortcodeProcessor::default().post_process(&mut tree, root, &mut ctx);
		let before = tree.len();
		ctx.load_children(&mut tree);
		assert_eq!(tree.to_markup(root), "<code>:smile:</code>");
		assert_eq!(tree.len(), before);
	}

	#[test]
	fn test_removed_target_allocates_nothing() {
		let (mut tree, root) =
			OutputTree::from_json(r#"{"tag":"p","children":[{"tag":"code","children":[":tada:"]}]}"#).unwrap();
		let mut ctx = RenderContext::new();
		ShortcodeProcessor::default().post_process(&mut tree, root, &mut ctx);
		let code = tree.find_all(root, "code")[0];
		tree.remove(code).unwrap();

		let before = tree.len();
		ctx.load_children(&mut tree);
		assert_eq!(tree.len(), before);
		assert_eq!(tree.to_markup(root), "<p></p>");
	}
}
