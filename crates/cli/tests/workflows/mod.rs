//! Workflow integration tests
//!
//! Tests for complete workflows that exercise multiple commands
//! and validate end-to-end behavior.

pub mod config_commands;
pub mod curation;
pub mod fetch_failures;
pub mod sync_lifecycle;
pub mod view_listing;
