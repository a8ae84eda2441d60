//! Volume delete action
//!
//! Deleting a volume that no longer exists is a no-op, not an error:
//! the desired end state (volume gone) already holds.

use super::output::VolumeDeleteOutput;
use crate::context::CoreContext;
use crate::infra::action::error::ActionError;
use crate::volume::VolumeId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDeleteAction {
	pub id: VolumeId,
}

crate::register_action!(VolumeDeleteAction, "volumes.delete");

impl crate::infra::action::CoreAction for VolumeDeleteAction {
	type Output = VolumeDeleteOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output, ActionError> {
		let deleted = context.volumes.delete(self.id).await?;

		Ok(VolumeDeleteOutput {
			success: true,
			deleted,
		})
	}

	fn action_kind(&self) -> &'static str {
		"volumes.delete"
	}
}
