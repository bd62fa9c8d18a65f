use veil_config::Settings;
use veil_primitives::{Document, VisibleRanges};
use veil_syntax::{SyntaxTree, Walk};

use crate::rules::Rules;
use crate::set::{DecorationSet, DecorationSetBuilder};

/// Builds a decoration set with the default [`Rules`].
pub fn build<T>(tree: &T, doc: &Document, ranges: &VisibleRanges, settings: &Settings) -> DecorationSet
where
	T: SyntaxTree + ?Sized,
{
	DecorationBuilder::default().build(tree, doc, ranges, settings)
}

/// Walks a syntax tree over visible ranges and collects decorations.
#[derive(Debug, Clone, Default)]
pub struct DecorationBuilder {
	rules: Rules,
}

impl DecorationBuilder {
	pub fn new(rules: Rules) -> Self {
		Self { rules }
	}

	pub fn rules(&self) -> &Rules {
		&self.rules
	}

	/// Produces the decorations for `doc` restricted to `ranges`.
	///
	/// Only nodes intersecting a visible range are visited. A disabled
	/// feature, or a tree parsed from a different revision than `doc`, yields
	/// an empty set rather than an error; the next rebuild corrects it.
	pub fn build<T>(
		&self,
		tree: &T,
		doc: &Document,
		ranges: &VisibleRanges,
		settings: &Settings,
	) -> DecorationSet
	where
		T: SyntaxTree + ?Sized,
	{
		let revision = doc.revision();
		if !settings.enable {
			return DecorationSet::none(revision);
		}
		if tree.revision() != revision {
			tracing::debug!(
				tree = %tree.revision(),
				doc = %revision,
				"syntax tree is stale, skipping decorations"
			);
			return DecorationSet::none(revision);
		}

		let builder = self.collect(tree, doc, ranges);
		let skipped = builder.skipped();
		let set = builder.finish();
		tracing::trace!(%revision, entries = set.len(), skipped, "decorations built");
		set
	}

	/// Walks every clamped visible range, feeding detections to one builder.
	fn collect<T>(&self, tree: &T, doc: &Document, ranges: &VisibleRanges) -> DecorationSetBuilder
	where
		T: SyntaxTree + ?Sized,
	{
		let mut builder = DecorationSetBuilder::new(doc.revision());
		for range in ranges.clamp(doc.len_chars()).iter().copied() {
			tree.walk(range, &mut |node| {
				if let Some(replacement) = self.rules.detect(node, doc) {
					tracing::trace!(kind = %node.kind, range = %node.range, "decorating node");
					builder.add(node.range, replacement);
				}
				Walk::Continue
			});
		}
		builder
	}
}
