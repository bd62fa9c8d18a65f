//! Persistence seam for [`Settings`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::settings::Settings;

/// Host key-value store holding the feature's settings.
pub trait SettingsStore {
	/// Returns the stored settings, or `None` if nothing was saved yet.
	fn load(&self) -> Result<Option<Settings>>;

	/// Persists `settings`, replacing any previous value.
	fn save(&self, settings: &Settings) -> Result<()>;
}

/// Loads settings, falling back to defaults.
///
/// Absent data and unreadable data both yield [`Settings::default`]; the
/// latter is logged so a corrupt file does not disable the feature silently.
pub fn load_settings(store: &dyn SettingsStore) -> Settings {
	match store.load() {
		Ok(Some(settings)) => settings,
		Ok(None) => Settings::default(),
		Err(error) => {
			tracing::warn!(%error, "failed to load settings, using defaults");
			Settings::default()
		}
	}
}

/// Settings persisted as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	/// Conventional file name inside a plugin data directory.
	pub const FILE_NAME: &'static str = "data.json";

	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Store at `dir/data.json`.
	pub fn in_dir(dir: impl AsRef<Path>) -> Self {
		Self::new(dir.as_ref().join(Self::FILE_NAME))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_error(&self, error: std::io::Error) -> ConfigError {
		ConfigError::Io {
			path: self.path.clone(),
			error,
		}
	}
}

impl SettingsStore for JsonFileStore {
	fn load(&self) -> Result<Option<Settings>> {
		let data = match std::fs::read_to_string(&self.path) {
			Ok(data) => data,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(error) => return Err(self.io_error(error)),
		};
		if data.trim().is_empty() {
			return Ok(None);
		}
		let settings = serde_json::from_str(&data)?;
		tracing::debug!(path = %self.path.display(), "settings loaded");
		Ok(Some(settings))
	}

	fn save(&self, settings: &Settings) -> Result<()> {
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
		}
		let data = serde_json::to_string_pretty(settings)?;
		std::fs::write(&self.path, data).map_err(|e| self.io_error(e))?;
		tracing::debug!(path = %self.path.display(), "settings saved");
		Ok(())
	}
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
	value: RefCell<Option<Settings>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(settings: Settings) -> Self {
		Self {
			value: RefCell::new(Some(settings)),
		}
	}
}

impl SettingsStore for MemoryStore {
	fn load(&self) -> Result<Option<Settings>> {
		Ok(*self.value.borrow())
	}

	fn save(&self, settings: &Settings) -> Result<()> {
		*self.value.borrow_mut() = Some(*settings);
		Ok(())
	}
}
