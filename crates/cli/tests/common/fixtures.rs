//! Isolated config, store and snapshot directories for one test

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Units payload used across workflows
pub const UNITS_JSON: &str = r#"{
    "Extension": ["4-H Youth Development", "Master Gardener"],
    "Research": ["Agricultural Research Center"]
}"#;

/// Topics payload used across workflows
pub const TOPICS_JSON: &str = r#"{
    "Health": {"Nutrition": ["Diet", "Food Safety"], "Wellness": []},
    "Agriculture": {"Crops": ["Wheat"]}
}"#;

/// A scratch workspace: `config.toml`, `store/` and `snapshots/`
pub struct TestEnv {
    _temp: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Fresh environment with a config pointing at the scratch store
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let root = temp.path().to_path_buf();

        std::fs::create_dir_all(root.join("snapshots"))?;
        let config = format!(
            "[store]\ndir = \"{}\"\n\n[log]\nlevel = \"warn\"\n",
            root.join("store").display()
        );
        std::fs::write(root.join("config.toml"), config)?;

        Ok(Self { _temp: temp, root })
    }

    /// Fresh environment with the standard snapshots in place
    pub fn with_snapshots() -> Result<Self> {
        let env = Self::new()?;
        env.write_snapshot("units", UNITS_JSON)?;
        env.write_snapshot("topics", TOPICS_JSON)?;
        Ok(env)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn config_arg(&self) -> String {
        self.config_path().display().to_string()
    }

    pub fn snapshots_arg(&self) -> String {
        self.root.join("snapshots").display().to_string()
    }

    /// Replace `snapshots/{service}.json`
    pub fn write_snapshot(&self, service: &str, body: &str) -> Result<()> {
        let path = self.root.join("snapshots").join(format!("{}.json", service));
        std::fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Remove `snapshots/{service}.json` so fetching it fails
    pub fn remove_snapshot(&self, service: &str) -> Result<()> {
        std::fs::remove_file(self.root.join("snapshots").join(format!("{}.json", service)))?;
        Ok(())
    }
}
