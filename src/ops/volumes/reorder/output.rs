use serde::{Deserialize, Serialize};

/// Output of the volume reorder action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeReorderOutput {
	pub success: bool,
}
