use pretty_assertions::assert_eq;
// Used by the library and its unit tests only.
use rstest as _;
use tracing as _;
use veil_config::{MemoryStore, Settings, SettingsStore, load_settings};
use veil_decoration::{ESCAPE_KIND, Replacement, display_text};
use veil_primitives::{Document, TextRange, VisibleRanges};
use veil_syntax::{NodeTree, TreeBuilder};
use veil_view::{Outcome, Snapshot, ViewController, ViewEvent, ViewId, ViewRegistry, ViewUpdate};

/// Stand-in for the host's incremental parser: one escape node per
/// backslash under a document root.
fn parse(doc: &Document) -> NodeTree {
	let mut builder = TreeBuilder::for_document(doc);
	builder.push("Document", doc.full_range());
	for (idx, ch) in doc.slice().chars().enumerate() {
		if ch == '\\' {
			builder.push(ESCAPE_KIND, idx..idx + 1);
		}
	}
	builder.build(doc.len_chars()).unwrap()
}

fn host(text: &str) -> Snapshot {
	let doc = Document::new(text);
	let tree = parse(&doc);
	Snapshot::new(doc, tree)
}

fn edit(host: &mut Snapshot, range: TextRange, text: &str) {
	host.document.replace(range, text).unwrap();
	host.tree = parse(&host.document);
	host.visible = VisibleRanges::single(host.document.full_range());
}

fn ranges(view: &ViewController) -> Vec<TextRange> {
	view.decorations()
		.map(|set| set.iter().map(|e| e.range).collect())
		.unwrap_or_default()
}

#[test]
fn escape_on_own_line_end_to_end() {
	let host = host("line one\n\\\nline two");
	let mut view = ViewController::new(ViewId(1));
	view.attach(&host);

	let set = view.decorations().unwrap();
	assert_eq!(set.len(), 1);
	assert_eq!(set.as_slice()[0].range, TextRange::new(9, 10));
	assert_eq!(set.as_slice()[0].replacement, Replacement::dimmed_backslash());
	assert_eq!(host.document.to_string(), "line one\n\\\nline two");
}

#[test]
fn edits_rebuild_and_report_changed_region() {
	let mut host = host("a\n\\\nb");
	let mut view = ViewController::new(ViewId(1));
	view.attach(&host);
	assert_eq!(ranges(&view), [TextRange::new(2, 3)]);

	// Typing after the backslash breaks its isolation.
	edit(&mut host, TextRange::point(3), "x");
	assert_eq!(
		view.update(&host, ViewUpdate::document()),
		Outcome::Rebuilt {
			changed: Some(TextRange::new(2, 3))
		}
	);
	assert!(ranges(&view).is_empty());

	edit(&mut host, TextRange::new(3, 4), "");
	view.update(&host, ViewUpdate::document());
	assert_eq!(ranges(&view), [TextRange::new(2, 3)]);
	assert_eq!(host.document.to_string(), "a\n\\\nb");
}

#[test]
fn scrolling_limits_decorations_to_viewport() {
	let mut host = host("\\\n\n\n\n\\\n\n\n\n\\");
	host.visible = VisibleRanges::single(TextRange::new(0, 3));
	let mut view = ViewController::new(ViewId(1));
	view.attach(&host);
	assert_eq!(ranges(&view), [TextRange::new(0, 1)]);

	host.visible = VisibleRanges::single(TextRange::new(4, 8));
	assert_eq!(
		view.update(&host, ViewUpdate::viewport()),
		Outcome::Rebuilt {
			changed: Some(TextRange::new(0, 6))
		}
	);
	assert_eq!(ranges(&view), [TextRange::new(5, 6)]);

	// Stale visible ranges are kept when only the selection moved.
	host.visible = VisibleRanges::single(host.document.full_range());
	assert_eq!(view.update(&host, ViewUpdate::selection()), Outcome::Unchanged);
	assert_eq!(ranges(&view), [TextRange::new(5, 6)]);
}

#[test]
fn disabled_setting_is_honored_end_to_end() {
	let store = MemoryStore::new();
	store.save(&Settings::disabled()).unwrap();

	let mut host = host("\\\nx\n\\");
	host.settings = load_settings(&store);

	let mut view = ViewController::new(ViewId(1));
	view.attach(&host);
	assert_eq!(view.decorations().map(|s| s.is_empty()), Some(true));

	edit(&mut host, TextRange::point(0), "\\\n");
	view.update(&host, ViewUpdate::document());
	assert_eq!(view.decorations().map(|s| s.is_empty()), Some(true));

	host.settings = Settings::default();
	view.update(&host, ViewUpdate::settings());
	assert_eq!(ranges(&view), [TextRange::new(0, 1), TextRange::new(2, 3), TextRange::new(6, 7)]);

	let set = view.decorations().unwrap();
	assert_eq!(
		display_text(&host.document, set, host.document.full_range()),
		host.document.to_string()
	);
}

#[test]
fn registry_routes_and_forgets_closed_views() {
	let first = host("\\\n");
	let second = host("no escapes");
	let mut registry = ViewRegistry::default();

	let a = registry.open(&first);
	let b = registry.open(&second);
	assert_ne!(a, b);
	assert_eq!(registry.len(), 2);
	assert_eq!(registry.decorations(a).map(|s| s.len()), Some(1));
	assert_eq!(registry.decorations(b).map(|s| s.len()), Some(0));

	assert_eq!(registry.dispatch(a, ViewEvent::Detach, &first), Outcome::Released);
	assert_eq!(
		registry.dispatch(a, ViewEvent::Update(ViewUpdate::document()), &first),
		Outcome::Ignored
	);
	assert_eq!(registry.decorations(a), None);
	assert_eq!(registry.close(a), Outcome::Ignored);

	let c = registry.open(&first);
	assert_ne!(c, a);
	assert_eq!(registry.ids().count(), 2);
}
