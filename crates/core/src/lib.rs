//! Core of the taxonomy sync
//!
//! This crate provides:
//! - Local term model (kinds, ids, parents, filters)
//! - Remote tree snapshots for units and topics
//! - `TermStore` and `TreeProvider` seams plus an in-memory store
//! - The additive reconciler and its run report
//! - Schema-version markers and trigger handling
//! - A read-only listing renderer

pub mod error;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod render;
pub mod schema;
pub mod store;
pub mod tree;
pub mod trigger;

// Re-exports
pub use error::{FetchError, StoreError};
pub use model::{slugify, CategoryNode, Parent, TaxonomyKind, TermFilter, TermId};
pub use provider::TreeProvider;
pub use reconcile::{InsertFailure, InsertedTerm, ReconcileReport, Reconciler, RunState};
pub use schema::{expected_version, SchemaMarkers, INITIAL_MARKER, TOPICS_SCHEMA_VERSION, UNITS_SCHEMA_VERSION};
pub use store::{MemoryStore, TermStore};
pub use tree::{Domain, RemoteNode, RemoteTree, Subdomain, TopicsTree, UnitBranch, UnitsTree};
pub use trigger::{handle_trigger, SyncOutcome, Trigger};
