use crate::driver::DriverError;
use crate::volume::{VolumeError, VolumeId};

use thiserror::Error;

pub type ActionResult<T> = Result<T, ActionError>;

/// Error type for admin operations.
///
/// Only `Forbidden` and malformed-payload failures are meant to escape to
/// the caller as fatal; everything else is converted to a recoverable,
/// user-visible result by the operation that raised it.
#[derive(Error, Debug)]
pub enum ActionError {
	#[error("Volume not found (id: {0})")]
	NotFound(VolumeId),

	#[error("Administrator privileges are required")]
	Forbidden,

	#[error("Validation failed on {field}: {message}")]
	Validation { field: String, message: String },

	#[error(transparent)]
	Driver(#[from] DriverError),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<VolumeError> for ActionError {
	fn from(err: VolumeError) -> Self {
		match err {
			VolumeError::NotFound(id) => ActionError::NotFound(id),
			// Validation is intercepted by the save operation before it
			// reaches this conversion; anything left is an internal fault.
			other => ActionError::Internal(other.to_string()),
		}
	}
}
