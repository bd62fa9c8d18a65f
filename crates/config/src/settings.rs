use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// User settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Master toggle for all visual substitutions.
	pub enable: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self { enable: true }
	}
}

/// Static description of one setting, for a host's settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDescriptor {
	/// Key in the persisted data.
	pub key: &'static str,
	/// Display name.
	pub name: &'static str,
	/// One-line help text.
	pub description: &'static str,
}

const DESCRIPTORS: &[SettingDescriptor] = &[SettingDescriptor {
	key: "enable",
	name: "Enable",
	description: "Default enable/disable show white space.",
}];

impl Settings {
	/// Settings with substitutions turned off.
	pub fn disabled() -> Self {
		Self { enable: false }
	}

	/// All settings a panel should render, in display order.
	pub fn descriptors() -> &'static [SettingDescriptor] {
		DESCRIPTORS
	}

	/// Returns the value of `key` in its textual form.
	pub fn get(&self, key: &str) -> Result<String> {
		match key {
			"enable" => Ok(self.enable.to_string()),
			_ => Err(ConfigError::UnknownKey(key.to_string())),
		}
	}

	/// Sets `key` from its textual form.
	pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
		match key {
			"enable" => {
				self.enable = parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
					key: key.to_string(),
					value: value.to_string(),
				})?;
				Ok(())
			}
			_ => Err(ConfigError::UnknownKey(key.to_string())),
		}
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "on" | "yes" | "1" => Some(true),
		"false" | "off" | "no" | "0" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_default_enabled() {
		assert!(Settings::default().enable);
		assert!(!Settings::disabled().enable);
	}

	#[test]
	fn test_missing_keys_use_defaults() {
		let s: Settings = serde_json::from_str("{}").unwrap();
		assert_eq!(s, Settings::default());

		let s: Settings = serde_json::from_str(r#"{"enable": false, "legacy": 3}"#).unwrap();
		assert!(!s.enable);
	}

	#[test]
	fn test_set_and_get() {
		let mut s = Settings::default();
		s.set("enable", "off").unwrap();
		assert_eq!(s.get("enable").unwrap(), "false");
		assert!(matches!(s.set("enable", "maybe"), Err(ConfigError::InvalidValue { .. })));
		assert!(matches!(s.set("colour", "red"), Err(ConfigError::UnknownKey(_))));
	}

	#[test]
	fn test_descriptors_cover_keys() {
		let s = Settings::default();
		for d in Settings::descriptors() {
			assert!(s.get(d.key).is_ok(), "descriptor {} has no backing key", d.key);
		}
	}
}
