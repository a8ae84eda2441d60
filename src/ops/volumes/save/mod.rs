pub mod action;
pub mod output;

pub use output::VolumeSaveOutput;
