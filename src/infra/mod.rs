//! Infrastructure shared by the operation surface

pub mod action;
pub mod event;
