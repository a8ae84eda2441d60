use serde::{Deserialize, Serialize};

/// Output of the volume delete action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDeleteOutput {
	pub success: bool,
	/// False when the volume was already gone
	pub deleted: bool,
}
