use super::types::VolumeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recoverable validation problem on a volume, attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
	pub field: String,
	pub message: String,
}

impl ValidationIssue {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Error type for volume related errors
#[derive(Error, Debug)]
pub enum VolumeError {
	#[error("Volume not found (id: {0})")]
	NotFound(VolumeId),

	#[error("Volume failed validation ({} issue(s))", .0.len())]
	Validation(Vec<ValidationIssue>),

	#[error("Failed to persist volumes (error: {0})")]
	Store(#[from] std::io::Error),

	#[error("Failed to encode volumes (error: {0})")]
	Encode(#[from] serde_json::Error),
}
