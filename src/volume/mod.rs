//! Volume domain: records, validation, persistence
//!
//! A volume is a named, configured storage location for uploaded assets.
//! Records are owned by the [`VolumeManager`]; how the files themselves are
//! stored is the concern of the volume's driver (see `crate::driver`).

pub mod error;
pub mod manager;
pub mod store;
pub mod types;

pub use error::{ValidationIssue, VolumeError};
pub use manager::VolumeManager;
pub use types::{FieldDefinition, FieldKind, FieldLayout, Volume, VolumeId};
