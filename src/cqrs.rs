//! CQRS (Command Query Responsibility Segregation) for the admin surface
//!
//! Queries read state without mutating it; actions (see `infra::action`)
//! mutate. Both run against an `Arc<CoreContext>`.

use crate::context::CoreContext;
use anyhow::Result;
use std::sync::Arc;

/// A query that retrieves data without mutating state.
pub trait Query {
	/// The data structure returned by the query (owned by the operation module).
	type Output: Send + Sync + 'static;

	/// Execute this query with the given context.
	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output>;

	/// Whether this query may only be run by an administrator.
	fn requires_admin(&self) -> bool {
		true
	}
}

/// QueryManager provides infrastructure for read-only operations.
pub struct QueryManager {
	context: Arc<CoreContext>,
}

impl QueryManager {
	/// Create a new QueryManager
	pub fn new(context: Arc<CoreContext>) -> Self {
		Self { context }
	}

	/// Dispatch a query for execution.
	pub async fn dispatch<Q: Query>(&self, query: Q) -> Result<Q::Output> {
		if query.requires_admin() && !self.context.session.is_admin {
			anyhow::bail!("Administrator privileges are required");
		}
		query.execute(self.context.clone()).await
	}
}
