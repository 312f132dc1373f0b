//! Remote tree provider
//!
//! This crate provides:
//! - Strict payload validation into typed units/topics trees
//! - HTTP retrieval from the taxonomy service
//! - Snapshot files for offline runs

pub mod file;
pub mod http;
pub mod parse;

// Re-exports
pub use file::FileProvider;
pub use http::{HttpProvider, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use parse::{from_value, parse_tree};

use tx_core::{FetchError, RemoteTree, TaxonomyKind, TreeProvider};

/// Either remote source, chosen at runtime
pub enum Source {
    Http(HttpProvider),
    File(FileProvider),
}

impl Source {
    /// Short description for log and status lines
    pub fn describe(&self) -> String {
        match self {
            Source::Http(http) => http.base_url().to_string(),
            Source::File(file) => file.dir().display().to_string(),
        }
    }
}

impl TreeProvider for Source {
    fn fetch(&self, kind: TaxonomyKind) -> Result<RemoteTree, FetchError> {
        match self {
            Source::Http(http) => http.fetch(kind),
            Source::File(file) => file.fetch(kind),
        }
    }
}
