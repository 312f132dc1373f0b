//! Local term storage seam and an in-memory implementation

use crate::error::StoreError;
use crate::model::{slugify, CategoryNode, Parent, TaxonomyKind, TermFilter, TermId};
use ahash::AHashSet;
use parking_lot::RwLock;

/// Hierarchical term store the reconciler reads from and inserts into
///
/// Implementations are internally synchronized, so every method takes `&self`.
pub trait TermStore {
    /// List terms of `kind`, optionally scoped to one parent
    fn list_terms(&self, kind: TaxonomyKind, filter: &TermFilter) -> Result<Vec<CategoryNode>, StoreError>;

    /// First term of `kind` with exactly this name, at any depth
    fn find_by_name(&self, kind: TaxonomyKind, name: &str) -> Result<Option<CategoryNode>, StoreError>;

    /// Insert a new term and return its id
    ///
    /// Must reject an empty name and a name already used by a sibling.
    fn insert_term(&self, kind: TaxonomyKind, name: &str, parent: Parent) -> Result<TermId, StoreError>;
}

impl<S: TermStore + ?Sized> TermStore for &S {
    fn list_terms(&self, kind: TaxonomyKind, filter: &TermFilter) -> Result<Vec<CategoryNode>, StoreError> {
        (**self).list_terms(kind, filter)
    }

    fn find_by_name(&self, kind: TaxonomyKind, name: &str) -> Result<Option<CategoryNode>, StoreError> {
        (**self).find_by_name(kind, name)
    }

    fn insert_term(&self, kind: TaxonomyKind, name: &str, parent: Parent) -> Result<TermId, StoreError> {
        (**self).insert_term(kind, name, parent)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    terms: Vec<(TaxonomyKind, CategoryNode)>,
    next_id: u64,
    rejected: AHashSet<String>,
    /// Listing scopes that fail; `None` is the flat listing
    failing_listings: Vec<Option<Parent>>,
    failing_finds: AHashSet<String>,
    inserts: usize,
}

/// In-memory [`TermStore`] for tests and dry runs
///
/// Terms are kept in insertion order. Names registered with
/// [`MemoryStore::reject`] fail to insert, and scopes registered with
/// [`MemoryStore::fail_listing`] or [`MemoryStore::fail_find`] report
/// `LookupFailed`, which exercises the reconciler's failure handling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future insert of `name` fail
    pub fn reject(&self, name: impl Into<String>) {
        self.inner.write().rejected.insert(name.into());
    }

    /// Make listings of `scope` fail (`None` for the flat listing)
    pub fn fail_listing(&self, scope: Option<Parent>) {
        self.inner.write().failing_listings.push(scope);
    }

    /// Make every `find_by_name` lookup of `name` fail
    pub fn fail_find(&self, name: impl Into<String>) {
        self.inner.write().failing_finds.insert(name.into());
    }

    /// Insert with a caller-chosen id (seeding fixtures)
    ///
    /// Ids handed out afterwards continue above the highest seeded id.
    pub fn seed(&self, kind: TaxonomyKind, id: u64, name: &str, parent: Parent) {
        let mut inner = self.inner.write();
        inner.next_id = inner.next_id.max(id);
        inner.terms.push((
            kind,
            CategoryNode {
                id: TermId(id),
                name: name.to_string(),
                slug: slugify(name),
                parent,
            },
        ));
    }

    /// Number of successful `insert_term` calls so far
    pub fn insert_count(&self) -> usize {
        self.inner.read().inserts
    }

    /// Number of terms of `kind`
    pub fn count(&self, kind: TaxonomyKind) -> usize {
        self.inner.read().terms.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Names from the root down to `id`, for lineage assertions
    pub fn lineage(&self, kind: TaxonomyKind, id: TermId) -> Vec<String> {
        let inner = self.inner.read();
        let mut path = Vec::new();
        let mut cursor = Parent::Term(id);

        while let Parent::Term(current) = cursor {
            match inner.terms.iter().find(|(k, n)| *k == kind && n.id == current) {
                Some((_, node)) => {
                    path.push(node.name.clone());
                    cursor = node.parent;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }
}

impl TermStore for MemoryStore {
    fn list_terms(&self, kind: TaxonomyKind, filter: &TermFilter) -> Result<Vec<CategoryNode>, StoreError> {
        let inner = self.inner.read();
        if inner.failing_listings.contains(&filter.parent) {
            let scope = filter.parent.map_or("all".to_string(), |p| p.to_string());
            return Err(StoreError::LookupFailed(format!("listing {} under {} failed", kind, scope)));
        }

        Ok(inner
            .terms
            .iter()
            .filter(|(k, node)| *k == kind && filter.matches(node))
            .map(|(_, node)| node.clone())
            .collect())
    }

    fn find_by_name(&self, kind: TaxonomyKind, name: &str) -> Result<Option<CategoryNode>, StoreError> {
        let inner = self.inner.read();
        if inner.failing_finds.contains(name) {
            return Err(StoreError::LookupFailed(format!("lookup of {} '{}' failed", kind, name)));
        }

        Ok(inner
            .terms
            .iter()
            .find(|(k, node)| *k == kind && node.name == name)
            .map(|(_, node)| node.clone()))
    }

    fn insert_term(&self, kind: TaxonomyKind, name: &str, parent: Parent) -> Result<TermId, StoreError> {
        let mut inner = self.inner.write();

        if name.trim().is_empty() {
            return Err(StoreError::rejected(name, "empty name"));
        }
        if inner.rejected.contains(name) {
            return Err(StoreError::rejected(name, "rejected by store"));
        }
        if let Parent::Term(pid) = parent {
            if !inner.terms.iter().any(|(k, n)| *k == kind && n.id == pid) {
                return Err(StoreError::rejected(name, format!("parent {} does not exist", pid)));
            }
        }
        if inner
            .terms
            .iter()
            .any(|(k, n)| *k == kind && n.parent == parent && n.name == name)
        {
            return Err(StoreError::rejected(name, "a term with this name already exists under the parent"));
        }

        inner.next_id += 1;
        let id = TermId(inner.next_id);
        inner.terms.push((
            kind,
            CategoryNode {
                id,
                name: name.to_string(),
                slug: slugify(name),
                parent,
            },
        ));
        inner.inserts += 1;

        Ok(id)
    }
}
