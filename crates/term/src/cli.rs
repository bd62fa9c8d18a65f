use std::path::PathBuf;

use clap::{Parser, Subcommand};
use veil_primitives::TextRange;

#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(about = "Dims lone markdown escape backslashes and swaps emoji shortcodes")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Decorate a document from a parser node dump
	Decorate {
		/// Document to decorate
		document: PathBuf,

		/// JSON node dump for the document
		#[arg(long, short = 't', value_name = "NODES.json")]
		tree: PathBuf,

		/// Visible range in char offsets (repeatable, e.g. 0..120)
		#[arg(long = "range", short = 'r', value_name = "A..B")]
		ranges: Vec<TextRange>,

		/// Settings file (defaults apply when absent)
		#[arg(long, value_name = "data.json")]
		settings: Option<PathBuf>,

		/// Decorate the whole document instead of the visible ranges
		#[arg(long, conflicts_with = "ranges")]
		whole_document: bool,
	},
	/// Resolve emoji shortcodes
	Substitute {
		/// Shortcodes such as :smile:
		#[arg(required = true)]
		codes: Vec<String>,
	},
	/// Run the shortcode pass over a rendered output tree
	Render {
		/// JSON output tree
		output: PathBuf,

		/// Settings file (defaults apply when absent)
		#[arg(long, value_name = "data.json")]
		settings: Option<PathBuf>,
	},
	/// Show or change plugin settings
	Settings {
		/// Settings file
		path: PathBuf,

		/// Turn the decorations on or off
		#[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
		enable: Option<bool>,
	},
}

#[cfg(test)]
mod tests;
