pub mod output;
pub mod query;

pub use output::DriverDataOutput;
