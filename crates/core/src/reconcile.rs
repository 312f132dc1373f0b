//! Additive reconciliation of a local taxonomy against a remote snapshot
//!
//! A run fetches the remote tree once, then walks it top-down and inserts
//! only the names the local store is missing. Nothing is ever renamed or
//! removed, so running twice against the same snapshot is a no-op.
//!
//! Units and topics are matched differently:
//! - Units use a single flat name set taken before the walk. A sub-unit whose
//!   name exists anywhere in the taxonomy counts as present, even under an
//!   unrelated parent.
//! - Topics are matched per parent at every level, using an explicit
//!   depth-first work stack that threads each resolved parent id down to
//!   its children.

use crate::error::{FetchError, StoreError};
use crate::model::{Parent, TaxonomyKind, TermFilter, TermId};
use crate::provider::TreeProvider;
use crate::store::TermStore;
use crate::tree::{RemoteNode, RemoteTree, UnitsTree};
use ahash::{AHashMap, AHashSet};
use tracing::{debug, info, warn};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Fetching,
    /// Terminal: the remote tree could not be obtained, nothing was touched
    FetchFailed,
    Walking,
    /// Terminal: the walk finished (possibly with per-node failures)
    Done,
}

/// A term created during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedTerm {
    pub name: String,
    pub id: TermId,
    pub parent: Parent,
    /// 1 for top-level terms
    pub depth: usize,
}

/// An insertion the store refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertFailure {
    pub name: String,
    pub parent: Parent,
    pub error: StoreError,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub kind: TaxonomyKind,
    pub state: RunState,
    pub fetch_error: Option<FetchError>,
    pub inserted: Vec<InsertedTerm>,
    /// Remote names found already present
    pub existing: usize,
    pub failures: Vec<InsertFailure>,
    /// Listing errors; each one skipped the scope it was listing
    pub lookup_failures: Vec<StoreError>,
}

impl ReconcileReport {
    fn new(kind: TaxonomyKind) -> Self {
        Self {
            kind,
            state: RunState::NotStarted,
            fetch_error: None,
            inserted: Vec::new(),
            existing: 0,
            failures: Vec::new(),
            lookup_failures: Vec::new(),
        }
    }

    fn transition(&mut self, next: RunState) {
        debug!("{} reconciliation: {:?} -> {:?}", self.kind, self.state, next);
        self.state = next;
    }

    /// Whether the run got past the fetch
    pub fn fetched(&self) -> bool {
        self.state == RunState::Done
    }

    /// Whether every remote name is now accounted for
    pub fn is_clean(&self) -> bool {
        self.fetched() && self.failures.is_empty() && self.lookup_failures.is_empty()
    }

    pub fn inserted_names(&self) -> Vec<&str> {
        self.inserted.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Parent of a unit's children, resolved lazily when the unit already existed
#[derive(Debug, Clone, Copy)]
enum ParentSlot {
    Known(Parent),
    Deferred,
}

/// One pending scope of the topics walk
struct Frame<'t> {
    parent: Parent,
    depth: usize,
    nodes: &'t [RemoteNode],
}

/// Brings a local store into conformance with a remote provider
pub struct Reconciler<'a, P, S> {
    provider: &'a P,
    store: &'a S,
}

impl<'a, P, S> Reconciler<'a, P, S>
where
    P: TreeProvider,
    S: TermStore,
{
    pub fn new(provider: &'a P, store: &'a S) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Run one full reconciliation for `kind`
    ///
    /// Never fails: fetch errors end the run in [`RunState::FetchFailed`]
    /// and store errors are recorded per node in the report.
    pub fn run(&self, kind: TaxonomyKind) -> ReconcileReport {
        let mut report = ReconcileReport::new(kind);

        report.transition(RunState::Fetching);
        let tree = match self.provider.fetch(kind) {
            Ok(tree) if tree.kind() == kind => tree,
            Ok(tree) => {
                let err = FetchError::MalformedData(format!(
                    "requested {} but provider returned {}",
                    kind,
                    tree.kind()
                ));
                return self.fetch_failed(report, err);
            }
            Err(err) => return self.fetch_failed(report, err),
        };

        report.transition(RunState::Walking);
        match &tree {
            RemoteTree::Units(units) => self.walk_units(units, &mut report),
            RemoteTree::Topics(_) => self.walk_scoped(&tree.to_forest(), &mut report),
        }
        report.transition(RunState::Done);

        info!(
            "{} reconciliation done: {} inserted, {} already present, {} failed",
            kind,
            report.inserted.len(),
            report.existing,
            report.failures.len() + report.lookup_failures.len()
        );

        report
    }

    fn fetch_failed(&self, mut report: ReconcileReport, err: FetchError) -> ReconcileReport {
        warn!("Skipping {} reconciliation, remote fetch failed: {}", report.kind, err);
        report.fetch_error = Some(err);
        report.transition(RunState::FetchFailed);
        report
    }

    /// Two-level walk with one flat existence set for the whole taxonomy
    fn walk_units(&self, tree: &UnitsTree, report: &mut ReconcileReport) {
        let kind = report.kind;

        let present: AHashSet<String> = match self.store.list_terms(kind, &TermFilter::all()) {
            Ok(nodes) => nodes.into_iter().map(|n| n.name).collect(),
            Err(err) => {
                warn!("Cannot list existing {}: {}", kind, err);
                report.lookup_failures.push(err);
                return;
            }
        };

        for unit in &tree.units {
            let mut slot = if present.contains(&unit.name) {
                report.existing += 1;
                ParentSlot::Deferred
            } else {
                match self.insert(report, &unit.name, Parent::Root, 1) {
                    Some(id) => ParentSlot::Known(Parent::Term(id)),
                    None => ParentSlot::Deferred,
                }
            };

            for child in &unit.children {
                if present.contains(child) {
                    debug!("{} '{}' already present, skipping", kind, child);
                    report.existing += 1;
                    continue;
                }

                let parent = match slot {
                    ParentSlot::Known(parent) => parent,
                    ParentSlot::Deferred => {
                        let parent = self.resolve_by_name(kind, &unit.name);
                        slot = ParentSlot::Known(parent);
                        parent
                    }
                };

                self.insert(report, child, parent, 2);
            }
        }
    }

    /// Existing term named `name`, or the root when it cannot be found
    fn resolve_by_name(&self, kind: TaxonomyKind, name: &str) -> Parent {
        match self.store.find_by_name(kind, name) {
            Ok(Some(node)) => Parent::Term(node.id),
            Ok(None) => {
                warn!("{} parent '{}' not found, placing children at root", kind, name);
                Parent::Root
            }
            Err(err) => {
                warn!("{} parent '{}' lookup failed ({}), placing children at root", kind, name, err);
                Parent::Root
            }
        }
    }

    /// Depth-first walk matching names within each parent's own children
    fn walk_scoped(&self, forest: &[RemoteNode], report: &mut ReconcileReport) {
        let kind = report.kind;
        let mut stack = vec![Frame {
            parent: Parent::Root,
            depth: 1,
            nodes: forest,
        }];

        while let Some(frame) = stack.pop() {
            let mut scoped: AHashMap<String, TermId> =
                match self.store.list_terms(kind, &TermFilter::children_of(frame.parent)) {
                    Ok(nodes) => nodes.into_iter().map(|n| (n.name, n.id)).collect(),
                    Err(err) => {
                        warn!(
                            "Cannot list {} under {}, skipping {} remote names: {}",
                            kind,
                            frame.parent,
                            frame.nodes.iter().map(RemoteNode::size).sum::<usize>(),
                            err
                        );
                        report.lookup_failures.push(err);
                        continue;
                    }
                };

            let mut pending = Vec::new();

            for node in frame.nodes {
                let resolved = match scoped.get(&node.name) {
                    Some(&id) => {
                        debug!("{} '{}' already present under {}", kind, node.name, frame.parent);
                        report.existing += 1;
                        Parent::Term(id)
                    }
                    None => match self.insert(report, &node.name, frame.parent, frame.depth) {
                        Some(id) => {
                            scoped.insert(node.name.clone(), id);
                            Parent::Term(id)
                        }
                        // Children of a failed insert land at root rather than being dropped.
                        // They are then matched against existing root terms, so a root term
                        // sharing a child's name absorbs that child's remote subtree.
                        None => Parent::Root,
                    },
                };

                if !node.children.is_empty() {
                    pending.push(Frame {
                        parent: resolved,
                        depth: frame.depth + 1,
                        nodes: &node.children,
                    });
                }
            }

            // Reversed so siblings are visited in remote order
            stack.extend(pending.into_iter().rev());
        }
    }

    fn insert(&self, report: &mut ReconcileReport, name: &str, parent: Parent, depth: usize) -> Option<TermId> {
        match self.store.insert_term(report.kind, name, parent) {
            Ok(id) => {
                info!("Inserted {} '{}' ({}) under {}", report.kind, name, id, parent);
                report.inserted.push(InsertedTerm {
                    name: name.to_string(),
                    id,
                    parent,
                    depth,
                });
                Some(id)
            }
            Err(err) => {
                warn!("Could not insert {} '{}' under {}: {}", report.kind, name, parent, err);
                report.failures.push(InsertFailure {
                    name: name.to_string(),
                    parent,
                    error: err,
                });
                None
            }
        }
    }
}
