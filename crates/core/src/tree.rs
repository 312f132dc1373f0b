//! Remote taxonomy snapshots
//!
//! A remote tree is rebuilt on every run and dropped afterwards. Units are
//! two levels deep, topics three. Both flatten into a generic
//! [`RemoteNode`] forest for traversal.

use crate::model::TaxonomyKind;

/// One top-level unit with its sub-units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitBranch {
    pub name: String,
    pub children: Vec<String>,
}

/// Remote units: `name -> [child names]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitsTree {
    pub units: Vec<UnitBranch>,
}

/// Second-level topic with its leaf topics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdomain {
    pub name: String,
    pub topics: Vec<String>,
}

/// Top-level topic domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub subdomains: Vec<Subdomain>,
}

/// Remote topics: `name -> (name -> [leaf names])`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicsTree {
    pub domains: Vec<Domain>,
}

/// Generic remote node used by the depth-first walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    pub name: String,
    pub children: Vec<RemoteNode>,
}

impl RemoteNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(RemoteNode::size).sum::<usize>()
    }
}

/// A validated remote snapshot for one taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTree {
    Units(UnitsTree),
    Topics(TopicsTree),
}

impl RemoteTree {
    /// Taxonomy this snapshot describes
    pub fn kind(&self) -> TaxonomyKind {
        match self {
            RemoteTree::Units(_) => TaxonomyKind::Units,
            RemoteTree::Topics(_) => TaxonomyKind::Topics,
        }
    }

    /// Flatten into a forest of top-level nodes, preserving remote order
    pub fn to_forest(&self) -> Vec<RemoteNode> {
        match self {
            RemoteTree::Units(tree) => tree
                .units
                .iter()
                .map(|unit| RemoteNode {
                    name: unit.name.clone(),
                    children: unit.children.iter().map(RemoteNode::leaf).collect(),
                })
                .collect(),
            RemoteTree::Topics(tree) => tree
                .domains
                .iter()
                .map(|domain| RemoteNode {
                    name: domain.name.clone(),
                    children: domain
                        .subdomains
                        .iter()
                        .map(|sub| RemoteNode {
                            name: sub.name.clone(),
                            children: sub.topics.iter().map(RemoteNode::leaf).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Total number of names in the snapshot
    pub fn node_count(&self) -> usize {
        self.to_forest().iter().map(RemoteNode::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RemoteTree::Units(tree) => tree.units.is_empty(),
            RemoteTree::Topics(tree) => tree.domains.is_empty(),
        }
    }
}

impl UnitsTree {
    /// Build from `(unit, children)` pairs
    pub fn from_pairs<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            units: pairs
                .into_iter()
                .map(|(name, children)| UnitBranch {
                    name: name.into(),
                    children: children.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }
}
