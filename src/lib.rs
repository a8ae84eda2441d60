#![allow(async_fn_in_trait)]
//! Asset volume administration core
//!
//! Volumes are named storage locations for uploaded assets (a local folder,
//! a remote object-storage bucket, ...). Each volume is governed by a
//! pluggable driver resolved through an explicit registry, and the admin
//! surface (list, edit, save, reorder, delete, driver data) is exposed as
//! queries and actions dispatchable by method string.

pub mod config;
pub mod context;
pub mod cqrs;
pub mod driver;
pub mod infra;
pub mod ops;
pub mod volume;

pub use context::{CoreContext, SessionState};
pub use driver::{DriverError, DriverRegistry, VolumeDriver};
pub use volume::{Volume, VolumeError, VolumeManager};

use crate::config::AppConfig;
use crate::infra::event::EventBus;
use crate::volume::store::VolumeStore;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// The assembled core: configuration, driver registry, volume manager and
/// event bus, wired together behind a shared [`CoreContext`].
pub struct Core {
	context: Arc<CoreContext>,
}

impl Core {
	/// Initialize the core with the default data directory.
	pub fn new() -> Result<Self> {
		let data_dir = config::default_data_dir()?;
		Self::new_with_config(data_dir)
	}

	/// Initialize the core with a custom data directory.
	pub fn new_with_config(data_dir: PathBuf) -> Result<Self> {
		info!("Initializing volume admin core at {:?}", data_dir);

		let config = AppConfig::load_or_create(&data_dir)?;
		config.ensure_directories()?;

		let events = Arc::new(EventBus::default());
		let drivers = Arc::new(DriverRegistry::with_builtin());

		let store = VolumeStore::new(config.volumes_file());
		let volumes = Arc::new(VolumeManager::load(store, drivers.clone(), events.clone())?);

		Ok(Self {
			context: Arc::new(CoreContext {
				config,
				volumes,
				drivers,
				events,
				// A local process embedding the core is the administrator;
				// remote transports must build their own session state.
				session: SessionState { is_admin: true },
			}),
		})
	}

	/// Get the shared context for dispatching operations.
	pub fn context(&self) -> Arc<CoreContext> {
		self.context.clone()
	}
}
