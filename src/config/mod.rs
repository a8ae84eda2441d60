//! Application configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Config schema version written into new config files.
const CONFIG_VERSION: u32 = 1;

/// Name of the config file inside the data directory.
const CONFIG_FILE: &str = "av-core.json";

/// Get the default data directory for the current platform.
pub fn default_data_dir() -> Result<PathBuf> {
	dirs::data_dir()
		.map(|dir| dir.join("av-core"))
		.ok_or_else(|| anyhow!("Could not determine the platform data directory"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	pub data_dir: PathBuf,

	/// Logging level
	pub log_level: String,
}

impl AppConfig {
	/// Load configuration from a specific data directory.
	pub fn load_from(data_dir: &PathBuf) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let config: AppConfig = serde_json::from_str(&json)?;

			if config.version > CONFIG_VERSION {
				return Err(anyhow!(
					"Config version {} is newer than supported version {}",
					config.version,
					CONFIG_VERSION
				));
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.clone());
			config.save()?;
			Ok(config)
		}
	}

	/// Load or create configuration.
	pub fn load_or_create(data_dir: &PathBuf) -> Result<Self> {
		Self::load_from(data_dir).or_else(|_| {
			let config = Self::default_with_dir(data_dir.clone());
			config.save()?;
			Ok(config)
		})
	}

	/// Create default configuration with a specific data directory.
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: CONFIG_VERSION,
			data_dir,
			log_level: "info".to_string(),
		}
	}

	/// Save configuration to disk.
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	/// Path of the persisted volume records.
	pub fn volumes_file(&self) -> PathBuf {
		self.data_dir.join("volumes.json")
	}

	/// Path of the logs directory.
	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	/// Ensure all required directories exist.
	pub fn ensure_directories(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;
		fs::create_dir_all(self.logs_dir())?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;

	#[test]
	fn test_load_or_create_round_trip() {
		let dir = TempDir::new().unwrap();
		let data_dir = dir.path().to_path_buf();

		let created = AppConfig::load_or_create(&data_dir).unwrap();
		assert_eq!(created.version, CONFIG_VERSION);
		assert!(data_dir.join(CONFIG_FILE).exists());

		let loaded = AppConfig::load_or_create(&data_dir).unwrap();
		assert_eq!(loaded.data_dir, created.data_dir);
		assert_eq!(loaded.log_level, "info");
	}

	#[test]
	fn test_newer_config_version_is_rejected() {
		let dir = TempDir::new().unwrap();
		let data_dir = dir.path().to_path_buf();
		let mut config = AppConfig::default_with_dir(data_dir.clone());
		config.version = CONFIG_VERSION + 1;
		config.save().unwrap();

		assert!(AppConfig::load_from(&data_dir).is_err());
	}
}
