use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use veil_config::{JsonFileStore, Settings, SettingsStore, load_settings};
use veil_decoration::{DecorationBuilder, DecorationSet, Glyph, Replacement, display_text, shortcode};
use veil_primitives::{Document, TextRange, VisibleRanges};
use veil_render::{OutputTree, PostProcessor, RenderContext, ShortcodeProcessor};
use veil_syntax::{NodeListing, SyntaxTree};
use veil_view::{Snapshot, UpdatePolicy, ViewController, ViewId};

use crate::cli::Command;

/// Executes one subcommand, writing its report to `out`.
pub fn run(command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
	match command {
		Command::Decorate {
			document,
			tree,
			ranges,
			settings,
			whole_document,
		} => {
			let settings = settings_from(settings.as_deref());
			decorate(&document, &tree, ranges, settings, whole_document, out)
		}
		Command::Substitute { codes } => {
			for code in &codes {
				writeln!(out, "{code}\t{}", shortcode::substitute(code))?;
			}
			Ok(())
		}
		Command::Render { output, settings } => {
			let settings = settings_from(settings.as_deref());
			render(&output, settings, out)
		}
		Command::Settings { path, enable } => settings(&path, enable, out),
	}
}

fn settings_from(path: Option<&Path>) -> Settings {
	match path {
		Some(path) => load_settings(&JsonFileStore::new(path)),
		None => Settings::default(),
	}
}

fn decorate(
	document: &Path,
	tree: &Path,
	ranges: Vec<TextRange>,
	settings: Settings,
	whole_document: bool,
	out: &mut dyn Write,
) -> anyhow::Result<()> {
	let text = std::fs::read_to_string(document)
		.with_context(|| format!("reading document {}", document.display()))?;
	let document = Document::new(&text);

	let listing = std::fs::read_to_string(tree).with_context(|| format!("reading node dump {}", tree.display()))?;
	let listing: NodeListing =
		serde_json::from_str(&listing).with_context(|| format!("parsing node dump {}", tree.display()))?;
	let tree = listing.into_tree(document.revision(), document.len_chars())?;
	if tree.revision() != document.revision() {
		tracing::warn!(
			tree = %tree.revision(),
			document = %document.revision(),
			"node dump is stale, nothing will be decorated"
		);
	}

	let mut host = Snapshot::new(document, tree);
	host.settings = settings;
	if !ranges.is_empty() {
		host.visible = VisibleRanges::normalized(ranges);
	}
	let policy = if whole_document {
		UpdatePolicy::Document
	} else {
		UpdatePolicy::Viewport
	};

	let mut view = ViewController::with_builder(ViewId(0), DecorationBuilder::default(), policy);
	let outcome = view.attach(&host);
	tracing::debug!(?outcome, "view attached");

	let empty = DecorationSet::none(host.document.revision());
	let set = view.decorations().unwrap_or(&empty);
	write_entries(set, out)?;
	writeln!(out, "---")?;
	write!(
		out,
		"{}",
		display_text(&host.document, set, host.document.full_range())
	)?;
	view.detach();
	Ok(())
}

fn write_entries(set: &DecorationSet, out: &mut dyn Write) -> anyhow::Result<()> {
	writeln!(out, "{} {} decoration(s)", set.revision(), set.len())?;
	for entry in set {
		let (kind, text) = match &entry.replacement {
			Replacement::DimText(text) => ("dim", &**text),
			Replacement::Glyph(Glyph::Text(text)) => ("glyph", &**text),
			Replacement::Glyph(Glyph::Image { alt, .. }) => ("image", &**alt),
			Replacement::Empty => ("hidden", ""),
		};
		writeln!(out, "{}\t{kind}\t{text:?}", entry.range)?;
	}
	Ok(())
}

fn render(output: &Path, settings: Settings, out: &mut dyn Write) -> anyhow::Result<()> {
	let json = std::fs::read_to_string(output).with_context(|| format!("reading output tree {}", output.display()))?;
	let (mut tree, root) = OutputTree::from_json(&json)?;

	let mut ctx = RenderContext::new();
	ShortcodeProcessor::new(settings).post_process(&mut tree, root, &mut ctx);
	let loaded = ctx.load_children(&mut tree);
	tracing::debug!(loaded, "shortcode children loaded");

	writeln!(out, "{}", tree.to_markup(root))?;
	ctx.unload(&mut tree);
	Ok(())
}

fn settings(path: &Path, enable: Option<bool>, out: &mut dyn Write) -> anyhow::Result<()> {
	let store = JsonFileStore::new(path);
	let mut settings = store.load()?.unwrap_or_default();
	if let Some(enable) = enable {
		settings.enable = enable;
		store.save(&settings)?;
		tracing::info!(path = %path.display(), enable, "settings saved");
	}

	for descriptor in Settings::descriptors() {
		let value = settings.get(descriptor.key)?;
		writeln!(
			out,
			"{} = {value}\t{}: {}",
			descriptor.key, descriptor.name, descriptor.description
		)?;
	}
	Ok(())
}
