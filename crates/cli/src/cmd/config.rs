//! Configuration management command
//!
//! Provides CLI interface to view and edit system configuration.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

const KEYS: &[&str] = &["remote.base_url", "remote.timeout_secs", "store.dir", "log.level"];

/// List all configuration values
pub fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "System Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[remote]".yellow());
    println!("  {} = {}", "base_url".cyan(), config.remote.base_url);
    println!(
        "  {} = {} {}",
        "timeout_secs".cyan(),
        config.remote.timeout_secs,
        format!("({}s)", config.remote.timeout_secs).dimmed()
    );

    println!("\n{}", "[store]".yellow());
    match &config.store.dir {
        Some(dir) => println!("  {} = {}", "dir".cyan(), dir.display()),
        None => println!(
            "  {} = {} {}",
            "dir".cyan(),
            config.store_dir()?.display(),
            "(default)".dimmed()
        ),
    }

    println!("\n{}", "[log]".yellow());
    println!("  {} = {}", "level".cyan(), config.log.level);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  timeout_secs: 1-600");
    println!("  base_url: http:// or https:// URL");
    println!("  level: error, warn, info, debug, trace");

    Ok(())
}

/// Get a single configuration value
pub fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;
    set_value(&mut config, key, value)?;

    // Validate before saving
    config.validate()
        .context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", system_config::example_config());
    Ok(())
}

fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    Ok(match key {
        "remote.base_url" => config.remote.base_url.clone(),
        "remote.timeout_secs" => config.remote.timeout_secs.to_string(),
        "store.dir" => config.store_dir()?.display().to_string(),
        "log.level" => config.log.level.clone(),
        _ => return Err(unknown_key(key)),
    })
}

fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "remote.base_url" => config.remote.base_url = value.to_string(),
        "remote.timeout_secs" => {
            config.remote.timeout_secs = value.parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "store.dir" => config.store.dir = Some(PathBuf::from(value)),
        "log.level" => config.log.level = value.to_lowercase(),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {}. Known keys: {}. Use 'taxsync config list' to see values.",
        key,
        KEYS.join(", ")
    )
}
