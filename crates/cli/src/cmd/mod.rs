//! CLI command implementations

pub mod activate;
pub mod add;
pub mod config;
pub mod status;
pub mod sync;
pub mod view;
