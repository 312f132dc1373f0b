//! Activation: seed schema markers and sync every stale taxonomy

use crate::system_config::SystemConfig;
use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::info;
use tx_core::{handle_trigger, Reconciler, Trigger};

pub fn run(config: &SystemConfig, from: Option<&Path>) -> Result<()> {
    // 1. Open store and remote source
    let store = util::open_store(config)?;
    let source = util::build_source(config, from)?;
    info!("Activating against {}", source.describe());

    // 2. Seed markers and run every stale taxonomy
    let mut markers = store.load_markers()?;
    let reconciler = Reconciler::new(&source, &store);
    let outcomes = handle_trigger(&reconciler, Trigger::Activation, &mut markers);

    // 3. Persist markers (seeded ones too, even if every fetch failed)
    store.save_markers(&markers).context("Failed to save schema markers")?;

    // 4. Report
    println!("{}", "Activation".bold());
    for outcome in &outcomes {
        util::print_outcome(outcome);
    }

    Ok(())
}
