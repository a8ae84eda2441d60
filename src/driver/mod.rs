//! Pluggable volume drivers
//!
//! A driver governs how one kind of volume actually stores files: local
//! disk, a remote object store, or the legacy per-session uploads type.
//! Drivers are resolved through the explicit [`DriverRegistry`] by exact
//! type-id match; there is no reflection or dynamic class loading.

pub mod local;
pub mod registry;
pub mod remote;
pub mod temp;

pub use local::LocalDriver;
pub use registry::{DriverRegistry, DriverResolution};
pub use remote::RemoteDriver;
pub use temp::TempDriver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Driver-specific configuration values, opaque to the volume store.
pub type DriverSettings = serde_json::Map<String, Value>;

/// Error type for driver related errors
#[derive(Error, Debug)]
pub enum DriverError {
	#[error("The volume type \"{0}\" is not registered")]
	UnknownType(String),

	#[error("The driver operation \"{0}\" does not exist")]
	UnknownOperation(String),

	#[error("Missing parameter {index} ({name})")]
	MissingParam { index: usize, name: &'static str },

	#[error("Invalid setting \"{field}\": {message}")]
	InvalidSetting { field: String, message: String },

	#[error("Driver operation failed: {0}")]
	Operation(String),

	#[error("Provider request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Encode(#[from] serde_json::Error),
}

/// One field in a driver's settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingField {
	pub key: String,
	pub label: String,
	pub required: bool,
	/// Whether the value should be masked in rendered forms
	#[serde(default)]
	pub secret: bool,
}

impl SettingField {
	pub fn new(key: &str, label: &str, required: bool) -> Self {
		Self {
			key: key.to_string(),
			label: label.to_string(),
			required,
			secret: false,
		}
	}

	pub fn secret(mut self) -> Self {
		self.secret = true;
		self
	}
}

/// Ordered settings fields a driver understands.
pub type SettingsSchema = Vec<SettingField>;

/// Metadata about a driver type, independent of any instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDescriptor {
	#[serde(rename = "type")]
	pub type_id: String,
	pub display_name: String,
	/// False for types that exist only as a legacy fallback
	pub selectable: bool,
	pub settings_schema: SettingsSchema,
}

/// Capability contract implemented by each storage backend.
#[async_trait]
pub trait VolumeDriver: Send + Sync {
	/// Stable type identifier for this driver.
	fn type_id(&self) -> &'static str;

	/// Human-readable name shown in type pickers.
	fn display_name(&self) -> &'static str;

	/// Whether this type can be chosen for new volumes.
	fn is_selectable(&self) -> bool {
		true
	}

	/// The settings fields this driver understands.
	fn settings_schema(&self) -> SettingsSchema;

	/// Validate a settings mapping against this driver's schema.
	fn validate_settings(&self, settings: &DriverSettings) -> Result<(), DriverError>;

	/// Run a named read-only data query (e.g. a remote bucket listing).
	///
	/// Implementations performing network I/O make a single attempt with a
	/// bounded timeout; retrying is the caller's decision, never the driver's.
	async fn load_data(&self, operation: &str, params: &[Value]) -> Result<Value, DriverError>;
}

/// Check that every required schema field has a non-empty string value.
pub(crate) fn validate_required(
	schema: &SettingsSchema,
	settings: &DriverSettings,
) -> Result<(), DriverError> {
	for field in schema.iter().filter(|field| field.required) {
		let present = settings
			.get(&field.key)
			.and_then(Value::as_str)
			.map(|value| !value.trim().is_empty())
			.unwrap_or(false);
		if !present {
			return Err(DriverError::InvalidSetting {
				field: field.key.clone(),
				message: format!("{} is required.", field.label),
			});
		}
	}
	Ok(())
}

/// Fetch a required positional string parameter.
pub(crate) fn param_str<'a>(
	params: &'a [Value],
	index: usize,
	name: &'static str,
) -> Result<&'a str, DriverError> {
	params
		.get(index)
		.and_then(Value::as_str)
		.filter(|value| !value.trim().is_empty())
		.ok_or(DriverError::MissingParam { index, name })
}
