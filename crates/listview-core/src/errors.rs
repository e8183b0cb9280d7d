//! Configuration error types

use thiserror::Error;

/// Error raised while loading list view configuration
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Reading a configuration file failed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML document could not be parsed
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON document could not be parsed
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	/// Document parsed but holds invalid values
	#[error("Invalid configuration: {0}")]
	Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
