//! Driver data query
//!
//! Runs a driver's named read-only operation (e.g. a remote bucket
//! listing) on behalf of a settings form. The driver is instantiated
//! with empty settings; everything the operation needs arrives as
//! positional params, since the form may not have been saved yet.

use super::output::DriverDataOutput;
use crate::context::CoreContext;
use crate::driver::DriverSettings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDataQuery {
	/// Driver type to load data from
	#[serde(rename = "type")]
	pub type_id: String,
	/// Operation name understood by the driver
	pub operation: String,
	/// Positional operation parameters
	#[serde(default)]
	pub params: Vec<Value>,
}

impl crate::cqrs::Query for DriverDataQuery {
	type Output = DriverDataOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output> {
		let driver = match context.drivers.create(&self.type_id, &DriverSettings::new()) {
			Ok(driver) => driver,
			Err(error) => {
				return Ok(DriverDataOutput::Error {
					error: error.to_string(),
				})
			}
		};

		match driver.load_data(&self.operation, &self.params).await {
			Ok(data) => Ok(DriverDataOutput::Data(data)),
			Err(error) => {
				tracing::warn!(
					volume_type = %self.type_id,
					operation = %self.operation,
					"Driver data load failed: {}",
					error
				);
				Ok(DriverDataOutput::Error {
					error: error.to_string(),
				})
			}
		}
	}
}

crate::register_query!(DriverDataQuery, "volumes.driver_data");
