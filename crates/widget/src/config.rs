//! Editor configuration loaded from TOML.
//!
//! ```toml
//! mode = "variable"
//! strategy = "full"
//! trigger = "@"
//!
//! [variables]
//! userName = "User Name"
//!
//! [theme.unknown]
//! background = "#fff1f0"
//! border = "#ffa39e"
//! foreground = "#f5222d"
//! ```
//!
//! Every key is optional. The host supplies the text; nothing here reads files.

use chipline_decoration::{ChipTheme, KnownVariables, Mode, UpdateStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default menu trigger character.
pub const DEFAULT_TRIGGER: char = '/';

/// Serializable editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	/// Token syntax.
	pub mode: Mode,
	/// How edits are folded into the decorations.
	pub strategy: UpdateStrategy,
	/// Character that opens the suggestion menu.
	pub trigger: String,
	/// Known variables; absent means validity is not modeled.
	pub variables: Option<KnownVariables>,
	/// Chip colours.
	pub theme: ChipTheme,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			mode: Mode::default(),
			strategy: UpdateStrategy::default(),
			trigger: DEFAULT_TRIGGER.to_string(),
			variables: None,
			theme: ChipTheme::default(),
		}
	}
}

impl EditorConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.trigger_char()?;
		Ok(config)
	}

	/// The trigger as a single char.
	pub fn trigger_char(&self) -> Result<char> {
		let mut chars = self.trigger.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Ok(c),
			_ => Err(ConfigError::InvalidTrigger(self.trigger.clone())),
		}
	}
}
