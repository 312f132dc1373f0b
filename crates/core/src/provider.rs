//! Remote tree retrieval seam

use crate::error::FetchError;
use crate::model::TaxonomyKind;
use crate::tree::RemoteTree;

/// Source of authoritative remote trees
///
/// One call per reconciliation run; no retries are expected of implementors.
pub trait TreeProvider {
    fn fetch(&self, kind: TaxonomyKind) -> Result<RemoteTree, FetchError>;
}

impl<F> TreeProvider for F
where
    F: Fn(TaxonomyKind) -> Result<RemoteTree, FetchError>,
{
    fn fetch(&self, kind: TaxonomyKind) -> Result<RemoteTree, FetchError> {
        self(kind)
    }
}
