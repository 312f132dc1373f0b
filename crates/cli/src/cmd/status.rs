//! Show schema markers and term counts

use crate::system_config::SystemConfig;
use crate::util;
use anyhow::Result;
use owo_colors::OwoColorize;
use tx_core::{expected_version, TaxonomyKind};

pub fn run(config: &SystemConfig) -> Result<()> {
    // 1. Open store
    let store = util::open_store(config)?;
    let markers = store.load_markers()?;

    // 2. Display output
    println!("{}", "Taxonomy Status".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Store:         {}", config.store_dir()?.display().to_string().cyan());
    println!("Remote:        {}", config.remote.base_url.cyan());
    println!();

    let mut stale = 0;
    for kind in TaxonomyKind::ALL {
        let count = store.count(kind)?;
        let marker = markers.get(kind).unwrap_or("unset");

        println!("{}:", kind.label());
        println!("  Terms:       {}", count);
        print!("  Schema:      {} (expected {}) ", marker, expected_version(kind));
        if markers.is_stale(kind) {
            stale += 1;
            println!("{}", "stale".yellow());
        } else {
            println!("{}", "current ✓".green());
        }
        println!();
    }

    if stale > 0 {
        println!("{}", "Tip: Run 'taxsync sync' to fetch stale taxonomies".dimmed());
    }

    Ok(())
}
