//! Action manager - central router for all actions

use super::error::ActionError;
use crate::context::CoreContext;
use std::sync::Arc;

/// Central manager for all action execution
pub struct ActionManager {
	context: Arc<CoreContext>,
}

impl ActionManager {
	/// Create a new action manager
	pub fn new(context: Arc<CoreContext>) -> Self {
		Self { context }
	}

	/// Dispatch an action: admin gate, validate, execute, log.
	pub async fn dispatch<A: super::CoreAction>(
		&self,
		action: A,
	) -> Result<A::Output, ActionError> {
		if !self.context.session.is_admin {
			return Err(ActionError::Forbidden);
		}

		// Capture action_kind before the action is moved
		let action_kind = action.action_kind();
		tracing::info!("Executing action: {}", action_kind);

		action.validate(self.context.clone()).await?;

		let result = action.execute(self.context.clone()).await;

		match &result {
			Ok(_) => tracing::info!("Action {} completed successfully", action_kind),
			Err(e) => tracing::error!("Action {} failed: {}", action_kind, e),
		}

		result
	}
}
