//! Volume edit query
//!
//! Prepares everything an edit form needs: the volume (or a blank one for
//! the create screen), the driver types it may switch to, and a settings
//! form per type. A volume whose driver type is no longer registered is
//! switched to the fallback type with an issue attached to the `type`
//! field, so the record stays editable instead of becoming inaccessible.

use super::output::{DriverSettingsForm, VolumeEditOutput};
use crate::context::CoreContext;
use crate::driver::{DriverResolution, DriverSettings};
use crate::infra::action::error::ActionError;
use crate::volume::{ValidationIssue, Volume, VolumeId};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEditQuery {
	/// Volume to edit; `None` renders a blank create form
	#[serde(default)]
	pub volume_id: Option<VolumeId>,
}

impl crate::cqrs::Query for VolumeEditQuery {
	type Output = VolumeEditOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output> {
		let mut volume = match self.volume_id {
			Some(id) => context
				.volumes
				.get(id)
				.await
				.ok_or_else(|| anyhow::Error::new(ActionError::NotFound(id)))?,
			None => Volume::new(context.drivers.fallback_type_id()),
		};

		let mut issues = Vec::new();
		match context
			.drivers
			.resolve_or_fallback(&volume.type_id, &volume.settings)?
		{
			DriverResolution::Resolved(_) => {}
			DriverResolution::Fallback {
				driver,
				original_type_id,
			} => {
				issues.push(ValidationIssue::new(
					"type",
					format!(
						"The volume type \"{}\" could not be found.",
						original_type_id
					),
				));
				// The stored settings belong to the missing type
				volume.type_id = driver.type_id().to_string();
				volume.settings = DriverSettings::new();
			}
		}

		// Non-selectable types stay offered only to volumes that already use them
		let driver_types: Vec<_> = context
			.drivers
			.descriptors()
			.into_iter()
			.filter(|descriptor| descriptor.selectable || descriptor.type_id == volume.type_id)
			.collect();

		let settings_forms = driver_types
			.iter()
			.map(|descriptor| DriverSettingsForm {
				type_id: descriptor.type_id.clone(),
				display_name: descriptor.display_name.clone(),
				schema: descriptor.settings_schema.clone(),
				values: if descriptor.type_id == volume.type_id {
					volume.settings.clone()
				} else {
					DriverSettings::new()
				},
			})
			.collect();

		Ok(VolumeEditOutput {
			volume,
			issues,
			driver_types,
			settings_forms,
		})
	}
}

crate::register_query!(VolumeEditQuery, "volumes.edit");
