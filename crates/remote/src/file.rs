//! Snapshot files standing in for the remote service

use crate::parse::parse_tree;
use std::path::{Path, PathBuf};
use tracing::debug;
use tx_core::{FetchError, RemoteTree, TaxonomyKind, TreeProvider};

/// Reads `{dir}/units.json` and `{dir}/topics.json`
pub struct FileProvider {
    dir: PathBuf,
}

impl FileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot path for `kind`
    pub fn path_for(&self, kind: TaxonomyKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.service()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TreeProvider for FileProvider {
    fn fetch(&self, kind: TaxonomyKind) -> Result<RemoteTree, FetchError> {
        let path = self.path_for(kind);
        debug!("Reading {} snapshot from {}", kind, path.display());

        let body = std::fs::read(&path)
            .map_err(|e| FetchError::Transport(format!("cannot read {}: {}", path.display(), e)))?;

        parse_tree(kind, &body)
    }
}
