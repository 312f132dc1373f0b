//! Management view: sync the taxonomy if stale, then list it

use crate::system_config::SystemConfig;
use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use tx_core::{handle_trigger, render, Reconciler, TaxonomyKind, Trigger};

pub fn run(config: &SystemConfig, kind: TaxonomyKind, html: bool, from: Option<&Path>) -> Result<()> {
    let store = util::open_store(config)?;
    let source = util::build_source(config, from)?;

    // 1. Gated sync
    let mut markers = store.load_markers()?;
    let reconciler = Reconciler::new(&source, &store);
    let outcomes = handle_trigger(&reconciler, Trigger::ManagementView(kind), &mut markers);
    store.save_markers(&markers).context("Failed to save schema markers")?;

    // Sync output goes to stderr so --html output stays clean
    for outcome in outcomes.iter().filter(|o| o.ran()) {
        if let Some(report) = &outcome.report {
            if !report.fetched() {
                eprintln!(
                    "{} {} could not be synced; showing local terms",
                    "Warning:".yellow(),
                    kind.label()
                );
            } else if !report.inserted.is_empty() {
                eprintln!("Synced {} new {} terms", report.inserted.len(), kind);
            }
        }
    }

    // 2. Listing
    if html {
        let page = render::render_html(&store, kind).context("Failed to render listing")?;
        println!("{}", page);
        return Ok(());
    }

    let outline = render::load_outline(&store, kind).context("Failed to load listing")?;
    let total = store.count(kind)?;
    println!("{} {}", kind.label().bold(), format!("({} items)", total).dimmed());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if outline.is_empty() {
        println!("  {}", "No terms yet".dimmed());
    } else {
        util::print_outline(&outline);
    }

    Ok(())
}
