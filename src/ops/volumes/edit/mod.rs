pub mod output;
pub mod query;

pub use output::{DriverSettingsForm, VolumeEditOutput};
