//! `taxsync config` subcommands

use crate::common::TestEnv;
use crate::taxsync;
use anyhow::Result;

#[test]
fn test_config_path_and_get() -> Result<()> {
    let env = TestEnv::new()?;

    let path = taxsync!(env, "config", "path").assert_success()?;
    assert_eq!(path.stdout.trim(), env.config_arg());

    let level = taxsync!(env, "config", "get", "log.level").assert_success()?;
    assert_eq!(level.stdout.trim(), "warn");

    let url = taxsync!(env, "config", "get", "remote.base_url").assert_success()?;
    assert_eq!(url.stdout.trim(), "http://api.wpdev.cahnrs.wsu.edu/");

    Ok(())
}

#[test]
fn test_config_set_validates_before_saving() -> Result<()> {
    let env = TestEnv::new()?;

    taxsync!(env, "config", "set", "remote.timeout_secs", "90").assert_success()?;
    let timeout = taxsync!(env, "config", "get", "remote.timeout_secs").assert_success()?;
    assert_eq!(timeout.stdout.trim(), "90");

    let bad = taxsync!(env, "config", "set", "remote.timeout_secs", "0").assert_failure()?;
    assert!(bad.contains_stderr("Invalid configuration value"));
    let timeout = taxsync!(env, "config", "get", "remote.timeout_secs").assert_success()?;
    assert_eq!(timeout.stdout.trim(), "90");

    taxsync!(env, "config", "set", "remote.base_url", "gopher://old").assert_failure()?;
    taxsync!(env, "config", "set", "colour", "on").assert_failure()?;

    Ok(())
}

#[test]
fn test_invalid_config_file_is_reported() -> Result<()> {
    let env = TestEnv::new()?;
    std::fs::write(env.config_path(), "[remote]\ntimeout_secs = 9000\n")?;

    let result = taxsync!(env, "status").assert_failure()?;

    assert!(result.contains_stderr("Invalid config file"));

    Ok(())
}

#[test]
fn test_config_example_is_printed() -> Result<()> {
    let env = TestEnv::new()?;

    let result = taxsync!(env, "config", "example").assert_success()?;

    assert!(result.contains_stdout("[remote]"));
    assert!(result.contains_stdout("timeout_secs = 30"));

    Ok(())
}
