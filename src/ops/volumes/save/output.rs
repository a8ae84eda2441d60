use crate::volume::{ValidationIssue, Volume};
use serde::{Deserialize, Serialize};

/// Output of the volume save action.
///
/// Validation failures are part of the normal result, not an error: the
/// caller gets the submitted volume back together with per-field issues
/// so the form can be re-rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum VolumeSaveOutput {
	Saved {
		volume: Volume,
	},
	Invalid {
		volume: Volume,
		errors: Vec<ValidationIssue>,
	},
}
