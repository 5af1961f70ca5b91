//! Configuration for the portal client.
//!
//! Loads a TOML file, resolves `${VAR}` and `${VAR:-default}` environment
//! references, and validates the result before anything is wired up.
//! Configuration problems are the one fatal error class in the client:
//! the binary refuses to start on them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration for the portal client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Backend endpoint configuration.
	pub portal: PortalConfig,
	/// Configuration for the durable storage backend.
	pub storage: StorageConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
	/// Base URL of the Order Portal backend.
	pub base_url: String,
}

/// Configuration for the storage backend holding the session token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

impl Config {
	/// Loads configuration from a TOML file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Validates the configuration before anything consumes it.
	fn validate(&self) -> Result<(), ConfigError> {
		let base_url = self.portal.base_url.trim();
		if base_url.is_empty() {
			return Err(ConfigError::Validation(
				"portal.base_url must not be empty".to_string(),
			));
		}
		if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"portal.base_url must be an http(s) URL, got '{}'",
				base_url
			)));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"storage.primary must not be empty".to_string(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"storage.primary '{}' has no matching [storage.implementations.{}] section",
				self.storage.primary, self.storage.primary
			)));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Replaces `${VAR}` and `${VAR:-default}` references with environment
/// values before parsing.
fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				}
			},
		};
		result = result.replace(full_match.as_str(), &value);
	}
	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
[portal]
base_url = "https://portal.example.com"

[storage]
primary = "memory"

[storage.implementations.memory]
"#;

	#[test]
	fn test_parse_minimal_config() {
		let config: Config = MINIMAL.parse().unwrap();

		assert_eq!(config.portal.base_url, "https://portal.example.com");
		assert_eq!(config.storage.primary, "memory");
		assert!(config.storage.implementations.contains_key("memory"));
	}

	#[test]
	fn test_env_var_resolution_with_default() {
		let raw = r#"
[portal]
base_url = "${PORTAL_TEST_UNSET_URL:-https://fallback.example.com}"

[storage]
primary = "memory"

[storage.implementations.memory]
"#;
		let config: Config = raw.parse().unwrap();
		assert_eq!(config.portal.base_url, "https://fallback.example.com");
	}

	#[test]
	fn test_missing_env_var_without_default_fails() {
		let raw = r#"
[portal]
base_url = "${PORTAL_TEST_DEFINITELY_UNSET}"

[storage]
primary = "memory"

[storage.implementations.memory]
"#;
		let err = raw.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn test_rejects_non_http_base_url() {
		let raw = r#"
[portal]
base_url = "portal.example.com"

[storage]
primary = "memory"

[storage.implementations.memory]
"#;
		let err = raw.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn test_rejects_primary_without_matching_section() {
		let raw = r#"
[portal]
base_url = "https://portal.example.com"

[storage]
primary = "file"

[storage.implementations.memory]
"#;
		let err = raw.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[tokio::test]
	async fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("portal.toml");
		std::fs::write(&path, MINIMAL).unwrap();

		let config = Config::from_file(path.to_str().unwrap()).await.unwrap();
		assert_eq!(config.storage.primary, "memory");
	}

	#[tokio::test]
	async fn test_from_file_missing_path_is_io_error() {
		let err = Config::from_file("/nonexistent/portal.toml").await.unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}
}
