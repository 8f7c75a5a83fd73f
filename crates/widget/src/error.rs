//! Error types for editor configuration.

use thiserror::Error;

/// Errors that can occur when parsing editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or mapping it onto the config schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The trigger is not exactly one character.
	#[error("invalid trigger {0:?} (expected exactly one character)")]
	InvalidTrigger(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
