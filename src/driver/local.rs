//! Local disk driver

use super::registry::DriverRegistration;
use super::{
	param_str, validate_required, DriverError, DriverSettings, SettingField, SettingsSchema,
	VolumeDriver,
};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Driver for volumes stored in a folder on local disk.
#[derive(Debug, Clone)]
pub struct LocalDriver {
	root: PathBuf,
}

impl LocalDriver {
	pub const TYPE_ID: &'static str = "local";

	pub fn new(settings: &DriverSettings) -> Self {
		let root = settings
			.get("path")
			.and_then(Value::as_str)
			.map(PathBuf::from)
			.unwrap_or_default();
		Self { root }
	}

	pub fn schema() -> SettingsSchema {
		vec![SettingField::new("path", "Base Path", true)]
	}

	pub fn registration() -> DriverRegistration {
		DriverRegistration {
			type_id: Self::TYPE_ID,
			display_name: "Local Folder",
			selectable: true,
			schema: Self::schema,
			factory: |settings| Box::new(Self::new(settings)),
		}
	}

	async fn list_folders(&self, params: &[Value]) -> Result<Value, DriverError> {
		let root = match params.first().and_then(Value::as_str) {
			Some(path) if !path.trim().is_empty() => PathBuf::from(path),
			_ => self.root.clone(),
		};
		if root.as_os_str().is_empty() {
			// No configured root and no path parameter
			param_str(params, 0, "path")?;
		}
		debug!("Listing folders under {:?}", root);

		let mut entries = tokio::fs::read_dir(&root).await?;
		let mut folders = Vec::new();
		while let Some(entry) = entries.next_entry().await? {
			if entry.file_type().await?.is_dir() {
				folders.push(entry.file_name().to_string_lossy().into_owned());
			}
		}
		folders.sort();

		Ok(serde_json::to_value(folders)?)
	}
}

#[async_trait]
impl VolumeDriver for LocalDriver {
	fn type_id(&self) -> &'static str {
		Self::TYPE_ID
	}

	fn display_name(&self) -> &'static str {
		"Local Folder"
	}

	fn settings_schema(&self) -> SettingsSchema {
		Self::schema()
	}

	fn validate_settings(&self, settings: &DriverSettings) -> Result<(), DriverError> {
		validate_required(&Self::schema(), settings)
	}

	async fn load_data(&self, operation: &str, params: &[Value]) -> Result<Value, DriverError> {
		match operation {
			"listFolders" => self.list_folders(params).await,
			other => Err(DriverError::UnknownOperation(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;
	use tempfile::TempDir;

	#[tokio::test]
	async fn test_list_folders_returns_sorted_directories() {
		let dir = TempDir::new().unwrap();
		std::fs::create_dir(dir.path().join("beta")).unwrap();
		std::fs::create_dir(dir.path().join("alpha")).unwrap();
		std::fs::write(dir.path().join("file.txt"), b"not a folder").unwrap();

		let driver = LocalDriver::new(&DriverSettings::new());
		let result = driver
			.load_data(
				"listFolders",
				&[json!(dir.path().to_string_lossy().into_owned())],
			)
			.await
			.unwrap();

		assert_eq!(result, json!(["alpha", "beta"]));
	}

	#[tokio::test]
	async fn test_unknown_operation_errors() {
		let driver = LocalDriver::new(&DriverSettings::new());
		let result = driver.load_data("listBuckets", &[]).await;
		assert!(matches!(result, Err(DriverError::UnknownOperation(_))));
	}

	#[test]
	fn test_validate_settings_requires_path() {
		let driver = LocalDriver::new(&DriverSettings::new());
		assert!(driver.validate_settings(&DriverSettings::new()).is_err());

		let mut settings = DriverSettings::new();
		settings.insert("path".to_string(), json!("/srv/assets"));
		assert!(driver.validate_settings(&settings).is_ok());
	}
}
