use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Output of the volume list query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumesListOutput {
	/// Every volume, in display order
	pub volumes: Vec<Volume>,
}
