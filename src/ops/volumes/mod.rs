//! Volume administration operations
//!
//! The full admin surface for asset volumes:
//! - Listing and editing (queries)
//! - Saving, reordering and deleting (actions)
//! - Driver data loads for settings forms (query)

pub mod delete;
pub mod driver_data;
pub mod edit;
pub mod list;
pub mod reorder;
pub mod save;

pub use delete::{action::VolumeDeleteAction, VolumeDeleteOutput};
pub use driver_data::{query::DriverDataQuery, DriverDataOutput};
pub use edit::{query::VolumeEditQuery, VolumeEditOutput};
pub use list::{query::VolumesListQuery, VolumesListOutput};
pub use reorder::{action::VolumeReorderAction, VolumeReorderOutput};
pub use save::{action::VolumeSaveAction, VolumeSaveOutput};
