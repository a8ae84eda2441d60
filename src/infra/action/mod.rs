//! Action system - admin-initiated mutations
//!
//! Actions are the write half of the admin surface. The `ActionManager`
//! gates them behind the admin session, validates, executes and logs.

pub mod error;
pub mod manager;

use crate::context::CoreContext;
use error::ActionError;
use std::sync::Arc;

/// An admin-initiated mutation against core state.
pub trait CoreAction: Send + Sync + 'static {
	/// The output type for this action.
	type Output: Send + Sync + 'static;

	/// Execute this action with the core context.
	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output, ActionError>;

	/// Get the action kind for logging/identification.
	fn action_kind(&self) -> &'static str;

	/// Validate this action before execution (optional).
	async fn validate(&self, _context: Arc<CoreContext>) -> Result<(), ActionError> {
		Ok(())
	}
}
