//! Persistent term storage
//!
//! This crate provides:
//! - A sled-backed `TermStore` with parent-scoped indexing
//! - Persisted schema markers for the sync gate

pub mod store;

// Re-exports
pub use store::SledTermStore;
