//! Manual curation of local terms

use crate::system_config::SystemConfig;
use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tx_core::{Parent, TaxonomyKind, TermStore};

pub fn run(config: &SystemConfig, kind: TaxonomyKind, name: &str, parent: Option<&str>) -> Result<()> {
    let store = util::open_store(config)?;

    let parent = match parent {
        None => Parent::Root,
        Some(parent_name) => {
            let node = store
                .find_by_name(kind, parent_name)?
                .with_context(|| format!("No {} term named '{}'", kind, parent_name))?;
            Parent::Term(node.id)
        }
    };

    let id = store.insert_term(kind, name, parent)?;
    store.flush()?;

    println!("{} Added {} term {} ({}, parent {})", "✓".green(), kind, name.bold(), id, parent);
    Ok(())
}
