//! Shared utilities for CLI commands

use crate::system_config::SystemConfig;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use remote::{FileProvider, HttpProvider, Source};
use std::path::Path;
use termstore::SledTermStore;
use tx_core::render::TermTree;
use tx_core::{RunState, SyncOutcome};

/// Open the term store named by the config
pub fn open_store(config: &SystemConfig) -> Result<SledTermStore> {
    let dir = config.store_dir()?;
    SledTermStore::open(&dir).with_context(|| format!("Failed to open term store at {}", dir.display()))
}

/// Snapshot directory when `--from` was given, the configured service otherwise
pub fn build_source(config: &SystemConfig, from: Option<&Path>) -> Result<Source> {
    match from {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("Snapshot directory not found: {}", dir.display());
            }
            Ok(Source::File(FileProvider::new(dir)))
        }
        None => {
            let http = HttpProvider::new(config.remote.base_url.clone(), config.timeout())
                .context("Failed to set up HTTP client")?;
            Ok(Source::Http(http))
        }
    }
}

/// One summary line per sync attempt, plus per-term detail
pub fn print_outcome(outcome: &SyncOutcome) {
    let label = outcome.kind.label();

    let report = match &outcome.report {
        Some(report) => report,
        None => {
            println!("{} {}", label.bold(), "up to date".dimmed());
            return;
        }
    };

    if report.state == RunState::FetchFailed {
        let reason = report
            .fetch_error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default();
        println!("{} {} {}", label.bold(), "fetch failed:".red(), reason);
        println!("  {}", "Nothing was changed; the next trigger will retry".dimmed());
        return;
    }

    let added = report.inserted.len();
    let status = if report.is_clean() {
        "✓".green().to_string()
    } else {
        "!".yellow().to_string()
    };
    println!(
        "{} {} {} added, {} already present",
        status,
        label.bold(),
        added.to_string().cyan(),
        report.existing
    );

    for term in &report.inserted {
        println!("  {} {}{}", "+".green(), "  ".repeat(term.depth - 1), term.name);
    }
    for failure in &report.failures {
        println!("  {} {} ({})", "✗".red(), failure.name, failure.error);
    }
    for error in &report.lookup_failures {
        println!("  {} {}", "✗".red(), error);
    }

    if let Some(version) = outcome.applied_version {
        println!("  {}", format!("schema marker set to {}", version).dimmed());
    }
}

/// Indented outline of a loaded taxonomy
pub fn print_outline(trees: &[TermTree]) {
    for tree in trees {
        print_tree(tree, 0);
    }
}

fn print_tree(tree: &TermTree, depth: usize) {
    let indent = "  ".repeat(depth);
    match depth {
        0 => println!("{}{}", indent, tree.node.name.bold()),
        1 => println!("{}{}", indent, tree.node.name.cyan()),
        _ => println!("{}{}", indent, tree.node.name),
    }
    for child in &tree.children {
        print_tree(child, depth + 1);
    }
}
