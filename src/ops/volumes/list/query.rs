//! Volume list query

use super::output::VolumesListOutput;
use crate::context::CoreContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumesListQuery {}

impl crate::cqrs::Query for VolumesListQuery {
	type Output = VolumesListOutput;

	async fn execute(self, context: Arc<CoreContext>) -> Result<Self::Output> {
		let volumes = context.volumes.list().await;

		tracing::debug!(count = volumes.len(), "[volumes.list] Returning volumes");

		Ok(VolumesListOutput { volumes })
	}
}

crate::register_query!(VolumesListQuery, "volumes.list");
