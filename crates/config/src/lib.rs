//! Settings for the substitution feature.
//!
//! There is a single user-facing toggle. Hosts persist it through their own
//! key-value store; this crate provides the [`SettingsStore`] seam plus a
//! JSON file store matching the usual `data.json` plugin layout.
//!
//! ```json
//! { "enable": true }
//! ```
//!
//! Missing keys fall back to [`Settings::default`], so older data files keep
//! loading as new settings are introduced.

pub mod error;
pub mod settings;
pub mod store;

pub use error::{ConfigError, Result};
pub use settings::{SettingDescriptor, Settings};
pub use store::{JsonFileStore, MemoryStore, SettingsStore, load_settings};
