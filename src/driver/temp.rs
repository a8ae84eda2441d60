//! Temporary uploads driver
//!
//! Legacy type for per-session upload volumes. Existing volumes of this
//! type stay editable, but the type is hidden from pickers so no new
//! volumes can be created with it.

use super::registry::DriverRegistration;
use super::{DriverError, DriverSettings, SettingsSchema, VolumeDriver};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct TempDriver;

impl TempDriver {
	pub const TYPE_ID: &'static str = "temp";

	pub fn registration() -> DriverRegistration {
		DriverRegistration {
			type_id: Self::TYPE_ID,
			display_name: "Temp Uploads",
			selectable: false,
			schema: Vec::new,
			factory: |_settings| Box::new(Self),
		}
	}
}

#[async_trait]
impl VolumeDriver for TempDriver {
	fn type_id(&self) -> &'static str {
		Self::TYPE_ID
	}

	fn display_name(&self) -> &'static str {
		"Temp Uploads"
	}

	fn is_selectable(&self) -> bool {
		false
	}

	fn settings_schema(&self) -> SettingsSchema {
		Vec::new()
	}

	fn validate_settings(&self, _settings: &DriverSettings) -> Result<(), DriverError> {
		Ok(())
	}

	async fn load_data(&self, operation: &str, _params: &[Value]) -> Result<Value, DriverError> {
		Err(DriverError::UnknownOperation(operation.to_string()))
	}
}
