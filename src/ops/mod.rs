//! Admin operations exposed by method string

pub mod registry;
pub mod volumes;
