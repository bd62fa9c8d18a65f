use clap::Parser;
use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Command {
	Cli::try_parse_from(std::iter::once("veil").chain(args.iter().copied()))
		.unwrap()
		.command
}

#[test]
fn parse_decorate_with_ranges() {
	let Command::Decorate {
		document,
		tree,
		ranges,
		settings,
		whole_document,
	} = parse(&["decorate", "note.md", "--tree", "note.json", "-r", "0..10", "--range", "20..30"])
	else {
		panic!("expected decorate");
	};
	assert_eq!(document, PathBuf::from("note.md"));
	assert_eq!(tree, PathBuf::from("note.json"));
	assert_eq!(ranges, vec![TextRange::new(0, 10), TextRange::new(20, 30)]);
	assert_eq!(settings, None);
	assert!(!whole_document);
}

#[test]
fn parse_decorate_rejects_bad_range() {
	let result = Cli::try_parse_from(["veil", "decorate", "a.md", "--tree", "a.json", "--range", "ten"]);
	assert!(result.is_err());
}

#[test]
fn parse_whole_document_conflicts_with_ranges() {
	let result = Cli::try_parse_from([
		"veil",
		"decorate",
		"a.md",
		"--tree",
		"a.json",
		"--range",
		"0..1",
		"--whole-document",
	]);
	assert!(result.is_err());
}

#[test]
fn parse_substitute_requires_codes() {
	assert!(Cli::try_parse_from(["veil", "substitute"]).is_err());
	let Command::Substitute { codes } = parse(&["substitute", ":smile:", ":tada:"]) else {
		panic!("expected substitute");
	};
	assert_eq!(codes, vec![":smile:".to_string(), ":tada:".to_string()]);
}

#[test]
fn parse_settings_toggle() {
	let Command::Settings { path, enable } = parse(&["settings", "data.json", "--enable", "false"]) else {
		panic!("expected settings");
	};
	assert_eq!(path, PathBuf::from("data.json"));
	assert_eq!(enable, Some(false));

	let Command::Settings { enable, .. } = parse(&["settings", "data.json"]) else {
		panic!("expected settings");
	};
	assert_eq!(enable, None);
}

#[test]
fn verbose_is_global() {
	let cli = Cli::try_parse_from(["veil", "substitute", ":eyes:", "-v"]).unwrap();
	assert!(cli.verbose);
}
