//! Volume reorder action

use super::output::VolumeReorderOutput;
use crate::context::CoreContext;
use crate::infra::action::error::ActionError;
use crate::volume::VolumeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeReorderAction {
	/// Volume ids in their new display order
	pub ids: Vec<VolumeId>,
}

crate::register_action!(VolumeReorderAction, "volumes.reorder");

impl crate::infra::action::CoreAction for VolumeReorderAction {
	type Output = VolumeReorderOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output, ActionError> {
		context.volumes.reorder(&self.ids).await?;

		Ok(VolumeReorderOutput { success: true })
	}

	fn action_kind(&self) -> &'static str {
		"volumes.reorder"
	}
}
