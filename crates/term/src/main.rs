//! `veil` binary.
//!
//! Drives the decoration pipeline over files on disk: a document, a node dump
//! produced by a parser, and the plugin's `data.json` settings.

mod cli;
mod commands;

use std::path::PathBuf;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut stdout = std::io::stdout().lock();
	commands::run(cli.command, &mut stdout)
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_env("VEIL_LOG").unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("veil=trace,debug")
			} else {
				EnvFilter::new("veil=info")
			}
		})
	};

	if let Some(log_dir) = std::env::var("VEIL_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("veil.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(filter())
				.with(file_layer)
				.init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
