//! Volume save action
//!
//! Creates or updates a volume from submitted form data. Settings arrive
//! keyed by driver type, the way a form with one settings pane per type
//! posts them; only the pane for the selected type is kept.

use super::output::VolumeSaveOutput;
use crate::context::CoreContext;
use crate::driver::DriverSettings;
use crate::infra::action::error::ActionError;
use crate::volume::{FieldLayout, Volume, VolumeError, VolumeId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSaveAction {
	/// Existing volume to update; `None` creates a new one
	#[serde(default)]
	pub volume_id: Option<VolumeId>,

	#[serde(rename = "type")]
	pub type_id: String,
	pub name: String,
	pub handle: String,

	#[serde(default)]
	pub has_urls: bool,
	#[serde(default)]
	pub url: Option<String>,

	/// Settings panes keyed by driver type id
	#[serde(default)]
	pub settings_by_type: HashMap<String, DriverSettings>,

	#[serde(default)]
	pub field_layout: FieldLayout,
}

impl VolumeSaveAction {
	fn build_volume(&self) -> Volume {
		let now = Utc::now();
		Volume {
			id: self.volume_id,
			name: self.name.clone(),
			handle: self.handle.clone(),
			type_id: self.type_id.clone(),
			has_urls: self.has_urls,
			url: self.url.clone(),
			// Panes for unselected types are discarded
			settings: self
				.settings_by_type
				.get(&self.type_id)
				.cloned()
				.unwrap_or_default(),
			field_layout: self.field_layout.clone(),
			date_created: now,
			date_updated: now,
		}
	}
}

crate::register_action!(VolumeSaveAction, "volumes.save");

impl crate::infra::action::CoreAction for VolumeSaveAction {
	type Output = VolumeSaveOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output, ActionError> {
		let volume = self.build_volume();

		match context.volumes.save(volume.clone()).await {
			Ok(saved) => Ok(VolumeSaveOutput::Saved { volume: saved }),
			Err(VolumeError::Validation(errors)) => {
				Ok(VolumeSaveOutput::Invalid { volume, errors })
			}
			Err(other) => Err(other.into()),
		}
	}

	fn action_kind(&self) -> &'static str {
		"volumes.save"
	}
}
