//! Entry points that decide whether a reconciliation should run

use crate::model::TaxonomyKind;
use crate::provider::TreeProvider;
use crate::reconcile::{ReconcileReport, Reconciler, RunState};
use crate::schema::{expected_version, SchemaMarkers};
use crate::store::TermStore;
use tracing::{debug, info};

/// Event that may cause reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First setup: seed markers, then sync every stale taxonomy
    Activation,
    /// Operator opened one taxonomy's management view
    ManagementView(TaxonomyKind),
}

/// Result of a gated sync attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub kind: TaxonomyKind,
    /// `None` when the marker was current and no run happened
    pub report: Option<ReconcileReport>,
    /// Version the caller should persist, set only when the walk completed
    pub applied_version: Option<&'static str>,
}

impl SyncOutcome {
    pub fn ran(&self) -> bool {
        self.report.is_some()
    }
}

impl<'a, P, S> Reconciler<'a, P, S>
where
    P: TreeProvider,
    S: TermStore,
{
    /// Reconcile `kind` only if its marker is stale
    pub fn run_if_stale(&self, kind: TaxonomyKind, markers: &SchemaMarkers) -> SyncOutcome {
        if !markers.is_stale(kind) {
            debug!("{} schema marker is current ({}), skipping", kind, expected_version(kind));
            return SyncOutcome {
                kind,
                report: None,
                applied_version: None,
            };
        }

        self.run_forced(kind)
    }

    /// Reconcile `kind` regardless of its marker
    pub fn run_forced(&self, kind: TaxonomyKind) -> SyncOutcome {
        let report = self.run(kind);

        // A failed fetch or a skipped scope leaves the marker stale so the
        // next trigger retries. Rejected inserts do not: they would fail again.
        let applied_version = match report.state {
            RunState::Done if report.lookup_failures.is_empty() => Some(expected_version(kind)),
            _ => None,
        };

        SyncOutcome {
            kind,
            report: Some(report),
            applied_version,
        }
    }
}

/// Apply `trigger`, recording applied versions into `markers`
///
/// Persisting `markers` afterwards is the caller's job.
pub fn handle_trigger<P, S>(
    reconciler: &Reconciler<'_, P, S>,
    trigger: Trigger,
    markers: &mut SchemaMarkers,
) -> Vec<SyncOutcome>
where
    P: TreeProvider,
    S: TermStore,
{
    let kinds: &[TaxonomyKind] = match &trigger {
        Trigger::Activation => {
            if markers.seed() {
                info!("Seeded schema markers on activation");
            }
            &TaxonomyKind::ALL
        }
        Trigger::ManagementView(kind) => std::slice::from_ref(kind),
    };

    let mut outcomes = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let outcome = reconciler.run_if_stale(kind, markers);
        if let Some(version) = outcome.applied_version {
            markers.record(kind, version);
        }
        outcomes.push(outcome);
    }
    outcomes
}
