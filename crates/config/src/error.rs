//! Error types for settings persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading or writing the settings file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Stored data is not valid settings JSON.
	#[error("invalid settings data: {0}")]
	Json(#[from] serde_json::Error),

	/// A setting key is not recognised.
	#[error("unknown setting: {0}")]
	UnknownKey(String),

	/// A setting value could not be parsed.
	#[error("invalid value {value:?} for setting {key}")]
	InvalidValue {
		/// Setting key.
		key: String,
		/// Offending value.
		value: String,
	},
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
