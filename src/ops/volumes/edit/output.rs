use crate::driver::{DriverDescriptor, DriverSettings, SettingsSchema};
use crate::volume::{ValidationIssue, Volume};
use serde::{Deserialize, Serialize};

/// One driver type's settings form, pre-filled for the volume being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSettingsForm {
	#[serde(rename = "type")]
	pub type_id: String,
	pub display_name: String,
	pub schema: SettingsSchema,
	/// Current values; empty unless this is the volume's own type
	pub values: DriverSettings,
}

/// Everything an edit screen needs to render a volume form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeEditOutput {
	/// The volume under edit (blank and unsaved for a create form)
	pub volume: Volume,
	/// Issues to surface immediately, e.g. a missing driver type
	pub issues: Vec<ValidationIssue>,
	/// Driver types offered in the type picker
	pub driver_types: Vec<DriverDescriptor>,
	/// One settings form per offered type
	pub settings_forms: Vec<DriverSettingsForm>,
}
