//! System configuration file
//!
//! Read from `$TAXSYNC_CONFIG`, or `<config dir>/taxsync/config.toml`.
//! A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TAXSYNC_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub remote: RemoteConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// Taxonomy service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Service URL; `?service=units|topics` is appended
    pub base_url: String,
    /// Transport timeout for a single fetch
    pub timeout_secs: u64,
}

/// Local store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store directory (default: `<data dir>/taxsync`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of error, warn, info, debug, trace
    pub level: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            store: StoreConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: remote::DEFAULT_BASE_URL.to_string(),
            timeout_secs: remote::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=600).contains(&self.remote.timeout_secs) {
            anyhow::bail!(
                "remote.timeout_secs must be between 1 and 600 (got {})",
                self.remote.timeout_secs
            );
        }

        let url = self.remote.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) || url.len() <= "https://".len() {
            anyhow::bail!("remote.base_url must be an http(s) URL (got '{}')", self.remote.base_url);
        }

        self.log_level()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("log.level must be one of error, warn, info, debug, trace (got '{}')", self.log.level))
    }

    /// Resolved store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.store.dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("taxsync"))
                .context("Could not determine data directory; set store.dir"),
        }
    }
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("taxsync").join("config.toml"))
}

/// Load the config, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    let path = match config_file_path() {
        Some(path) if path.exists() => path,
        _ => return Ok(SystemConfig::default()),
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Write the config file, creating its directory if needed
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, raw).with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

/// Write a default config file if none exists
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(path)
}

/// Annotated example config
pub fn example_config() -> String {
    format!(
        r#"# taxsync configuration

[remote]
# Taxonomy service; ?service=units and ?service=topics are appended
base_url = "{}"
# Seconds before a fetch is abandoned (1-600)
timeout_secs = {}

[store]
# Directory holding the term database (default: platform data dir)
# dir = "/var/lib/taxsync"

[log]
# error, warn, info, debug or trace
level = "warn"
"#,
        remote::DEFAULT_BASE_URL,
        remote::DEFAULT_TIMEOUT.as_secs()
    )
}
