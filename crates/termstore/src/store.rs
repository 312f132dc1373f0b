//! Durable term store using sled

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sled::transaction::{ConflictableTransactionError, TransactionError, Transactional};
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;
use tx_core::{
    slugify, CategoryNode, Parent, SchemaMarkers, StoreError, TaxonomyKind, TermFilter, TermId, TermStore,
};

/// Stored form of a term
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TermRecord {
    kind: u8,
    name: String,
    slug: String,
    /// 0 for root
    parent: u64,
}

/// Term store backed by an embedded sled database
///
/// Trees:
/// - `terms`: id (u64 BE) -> bincode `TermRecord`
/// - `children`: kind tag + parent id (u64 BE) + name -> id; answers scoped
///   listings by prefix scan and rejects duplicate siblings
/// - `settings`: schema markers
pub struct SledTermStore {
    db: Db,
    terms: Tree,
    children: Tree,
    settings: Tree,
}

impl SledTermStore {
    /// Open or create a store inside `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;
        let db = sled::open(dir.join("terms.db"))
            .with_context(|| format!("Failed to open term store in {}", dir.display()))?;

        Ok(Self {
            terms: db.open_tree("terms")?,
            children: db.open_tree("children")?,
            settings: db.open_tree("settings")?,
            db,
        })
    }

    /// Number of terms of `kind`
    pub fn count(&self, kind: TaxonomyKind) -> Result<usize> {
        Ok(self.list_terms(kind, &TermFilter::all())?.len())
    }

    /// Load both schema markers (absent keys stay `None`)
    pub fn load_markers(&self) -> Result<SchemaMarkers> {
        let mut markers = SchemaMarkers::default();
        for kind in TaxonomyKind::ALL {
            if let Some(raw) = self.settings.get(marker_key(kind))? {
                let value = String::from_utf8(raw.to_vec())
                    .with_context(|| format!("Corrupt schema marker for {}", kind))?;
                markers.record(kind, value);
            }
        }
        Ok(markers)
    }

    /// Persist every present marker
    pub fn save_markers(&self, markers: &SchemaMarkers) -> Result<()> {
        for kind in TaxonomyKind::ALL {
            if let Some(value) = markers.get(kind) {
                self.settings.insert(marker_key(kind), value.as_bytes())?;
            }
        }
        self.db.flush()?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn decode(&self, key: &[u8], value: &[u8]) -> Result<(TaxonomyKind, CategoryNode), StoreError> {
        let id = u64::from_be_bytes(
            key.try_into()
                .map_err(|_| StoreError::LookupFailed(format!("corrupt term key of {} bytes", key.len())))?,
        );
        let record: TermRecord = bincode::deserialize(value)
            .map_err(|e| StoreError::LookupFailed(format!("corrupt term #{}: {}", id, e)))?;
        let kind = kind_from_tag(record.kind)
            .ok_or_else(|| StoreError::LookupFailed(format!("term #{} has unknown kind tag {}", id, record.kind)))?;

        Ok((
            kind,
            CategoryNode {
                id: TermId(id),
                name: record.name,
                slug: record.slug,
                parent: Parent::from_raw(record.parent),
            },
        ))
    }

    /// Every term of `kind` in id (insertion) order
    fn scan_kind(&self, kind: TaxonomyKind) -> Result<Vec<CategoryNode>, StoreError> {
        let mut nodes = Vec::new();
        for item in self.terms.iter() {
            let (key, value) = item.map_err(lookup_failed)?;
            let (term_kind, node) = self.decode(&key, &value)?;
            if term_kind == kind {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn get_term(&self, id: u64) -> Result<Option<(TaxonomyKind, CategoryNode)>, StoreError> {
        let key = id.to_be_bytes();
        match self.terms.get(key).map_err(lookup_failed)? {
            Some(value) => Ok(Some(self.decode(&key, &value)?)),
            None => Ok(None),
        }
    }
}

impl TermStore for SledTermStore {
    fn list_terms(&self, kind: TaxonomyKind, filter: &TermFilter) -> Result<Vec<CategoryNode>, StoreError> {
        let parent = match filter.parent {
            None => return self.scan_kind(kind),
            Some(parent) => parent,
        };

        let mut ids = Vec::new();
        for item in self.children.scan_prefix(scope_prefix(kind, parent)) {
            let (_, value) = item.map_err(lookup_failed)?;
            let raw: [u8; 8] = value
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::LookupFailed("corrupt child index entry".to_string()))?;
            ids.push(u64::from_be_bytes(raw));
        }
        ids.sort_unstable();

        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_term(id)? {
                Some((_, node)) => nodes.push(node),
                None => return Err(StoreError::LookupFailed(format!("child index points at missing term #{}", id))),
            }
        }
        Ok(nodes)
    }

    fn find_by_name(&self, kind: TaxonomyKind, name: &str) -> Result<Option<CategoryNode>, StoreError> {
        Ok(self.scan_kind(kind)?.into_iter().find(|node| node.name == name))
    }

    fn insert_term(&self, kind: TaxonomyKind, name: &str, parent: Parent) -> Result<TermId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::rejected(name, "empty name"));
        }

        let id = self
            .db
            .generate_id()
            .map_err(|e| StoreError::rejected(name, format!("cannot allocate id: {}", e)))?
            + 1;
        let record = TermRecord {
            kind: kind.tag(),
            name: name.to_string(),
            slug: slugify(name),
            parent: parent.raw(),
        };
        let value = bincode::serialize(&record).map_err(|e| StoreError::rejected(name, e.to_string()))?;
        let child_key = child_key(kind, parent, name);
        let id_bytes = id.to_be_bytes();

        let result = (&self.terms, &self.children).transaction(|(terms, children)| {
            if children.get(&child_key)?.is_some() {
                return Err(ConflictableTransactionError::Abort(format!(
                    "a term with this name already exists under {}",
                    parent
                )));
            }
            if let Parent::Term(pid) = parent {
                match terms.get(pid.get().to_be_bytes())? {
                    Some(raw) => {
                        let owner: Option<TermRecord> = bincode::deserialize(&raw).ok();
                        if owner.map(|r| r.kind) != Some(kind.tag()) {
                            return Err(ConflictableTransactionError::Abort(format!(
                                "parent {} is not a {} term",
                                pid, kind
                            )));
                        }
                    }
                    None => {
                        return Err(ConflictableTransactionError::Abort(format!(
                            "parent {} does not exist",
                            pid
                        )))
                    }
                }
            }

            terms.insert(&id_bytes[..], value.clone())?;
            children.insert(child_key.clone(), &id_bytes[..])?;
            Ok(())
        });

        match result {
            Ok(()) => {}
            Err(TransactionError::Abort(reason)) => return Err(StoreError::rejected(name, reason)),
            Err(TransactionError::Storage(e)) => return Err(StoreError::rejected(name, e.to_string())),
        }

        self.db
            .flush()
            .map_err(|e| StoreError::rejected(name, format!("flush failed: {}", e)))?;

        debug!("Stored {} '{}' as #{} under {}", kind, name, id, parent);
        Ok(TermId(id))
    }
}

fn lookup_failed(err: sled::Error) -> StoreError {
    StoreError::LookupFailed(err.to_string())
}

fn kind_from_tag(tag: u8) -> Option<TaxonomyKind> {
    TaxonomyKind::ALL.into_iter().find(|k| k.tag() == tag)
}

fn marker_key(kind: TaxonomyKind) -> String {
    format!("cahnrs_{}_schema_version", kind.service())
}

fn scope_prefix(kind: TaxonomyKind, parent: Parent) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(kind.tag());
    key.extend_from_slice(&parent.raw().to_be_bytes());
    key
}

fn child_key(kind: TaxonomyKind, parent: Parent, name: &str) -> Vec<u8> {
    let mut key = scope_prefix(kind, parent);
    key.extend_from_slice(name.as_bytes());
    key
}
