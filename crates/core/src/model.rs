//! Local category records and the identifiers that tie them together

use std::fmt;
use std::str::FromStr;

/// Which category hierarchy a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaxonomyKind {
    /// Organizational units (unit -> sub-unit)
    Units,
    /// Topical categories (domain -> subdomain -> topic)
    Topics,
}

impl TaxonomyKind {
    /// Every kind, in reconciliation order
    pub const ALL: [TaxonomyKind; 2] = [TaxonomyKind::Units, TaxonomyKind::Topics];

    /// Taxonomy slug, also used as the query var in term links
    pub fn slug(self) -> &'static str {
        match self {
            TaxonomyKind::Units => "cahnrs_unit",
            TaxonomyKind::Topics => "topic",
        }
    }

    /// Value of the `service` query parameter on the remote endpoint
    pub fn service(self) -> &'static str {
        match self {
            TaxonomyKind::Units => "units",
            TaxonomyKind::Topics => "topics",
        }
    }

    /// Human-readable plural label
    pub fn label(self) -> &'static str {
        match self {
            TaxonomyKind::Units => "CAHNRS Units",
            TaxonomyKind::Topics => "Topics",
        }
    }

    /// Deepest level a remote tree of this kind may describe
    pub fn max_depth(self) -> usize {
        match self {
            TaxonomyKind::Units => 2,
            TaxonomyKind::Topics => 3,
        }
    }

    /// Single-byte tag used in store keys
    pub fn tag(self) -> u8 {
        match self {
            TaxonomyKind::Units => b'u',
            TaxonomyKind::Topics => b't',
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service())
    }
}

impl FromStr for TaxonomyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "units" | "unit" | "cahnrs_unit" => Ok(TaxonomyKind::Units),
            "topics" | "topic" => Ok(TaxonomyKind::Topics),
            other => Err(format!("unknown taxonomy '{}' (expected 'units' or 'topics')", other)),
        }
    }
}

/// Identifier assigned by the local store on insertion (never zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub u64);

impl TermId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of a term: either the taxonomy root or another term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Term(TermId),
}

impl Parent {
    /// Raw id with the root encoded as 0
    pub fn raw(self) -> u64 {
        match self {
            Parent::Root => 0,
            Parent::Term(id) => id.0,
        }
    }

    /// Inverse of [`Parent::raw`]
    pub fn from_raw(raw: u64) -> Self {
        if raw == 0 {
            Parent::Root
        } else {
            Parent::Term(TermId(raw))
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, Parent::Root)
    }
}

impl From<TermId> for Parent {
    fn from(id: TermId) -> Self {
        Parent::Term(id)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("root"),
            Parent::Term(id) => write!(f, "#{}", id),
        }
    }
}

/// A term as held by the local store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub id: TermId,
    /// Matching key; exact, case-sensitive comparison
    pub name: String,
    /// URL-safe form of the name, fixed at insertion
    pub slug: String,
    pub parent: Parent,
}

/// Listing filter for [`crate::TermStore::list_terms`]
///
/// Empty terms are always included; no object counts are tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermFilter {
    /// `None` lists every term of the taxonomy regardless of depth
    pub parent: Option<Parent>,
}

impl TermFilter {
    /// Every term, flat
    pub fn all() -> Self {
        Self { parent: None }
    }

    /// Immediate children of `parent`
    pub fn children_of(parent: Parent) -> Self {
        Self {
            parent: Some(parent),
        }
    }

    /// Whether a node passes this filter
    pub fn matches(&self, node: &CategoryNode) -> bool {
        match self.parent {
            None => true,
            Some(parent) => node.parent == parent,
        }
    }
}

/// Derive a term slug: lowercased alphanumerics, everything else
/// collapsed into single hyphens, no leading or trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
