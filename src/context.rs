//! Shared context threaded through every operation
//!
//! The registry and the volume manager are explicit dependencies here
//! instead of ambient globals, so operations receive everything they touch
//! through one `Arc<CoreContext>`.

use crate::config::AppConfig;
use crate::driver::DriverRegistry;
use crate::infra::event::EventBus;
use crate::volume::VolumeManager;
use std::sync::Arc;

/// Caller identity for one invocation.
///
/// Every admin operation requires `is_admin`; transports are responsible
/// for authenticating the caller before building this.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
	pub is_admin: bool,
}

/// Everything an operation needs to run.
pub struct CoreContext {
	/// Application configuration
	pub config: AppConfig,

	/// Volume records and persistence
	pub volumes: Arc<VolumeManager>,

	/// Driver type registry
	pub drivers: Arc<DriverRegistry>,

	/// Event bus for state changes
	pub events: Arc<EventBus>,

	/// Caller session
	pub session: SessionState,
}
