//! Explicit sync of one or both taxonomies

use crate::system_config::SystemConfig;
use crate::util;
use anyhow::{Context, Result};
use std::path::Path;
use tx_core::{Reconciler, TaxonomyKind};

pub fn run(config: &SystemConfig, kind: Option<TaxonomyKind>, force: bool, from: Option<&Path>) -> Result<()> {
    let store = util::open_store(config)?;
    let source = util::build_source(config, from)?;
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => TaxonomyKind::ALL.to_vec(),
    };

    let mut markers = store.load_markers()?;
    let reconciler = Reconciler::new(&source, &store);

    let mut failed = 0;
    for kind in kinds {
        let outcome = if force {
            reconciler.run_forced(kind)
        } else {
            reconciler.run_if_stale(kind, &markers)
        };
        if let Some(version) = outcome.applied_version {
            markers.record(kind, version);
        }
        if outcome.report.as_ref().is_some_and(|r| !r.fetched()) {
            failed += 1;
        }
        util::print_outcome(&outcome);
    }

    store.save_markers(&markers).context("Failed to save schema markers")?;

    if failed > 0 {
        anyhow::bail!("{} taxonomy fetch(es) failed", failed);
    }
    Ok(())
}
