//! Unreachable or malformed remote data

use crate::common::TestEnv;
use crate::taxsync;
use anyhow::Result;

#[test]
fn test_failed_fetch_leaves_marker_stale() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();
    env.remove_snapshot("units")?;

    let result = taxsync!(env, "activate", "--from", &from).assert_success()?;
    assert!(result.contains_stdout("CAHNRS Units fetch failed:"));
    assert!(result.contains_stdout("Topics 8 added"));

    let status = taxsync!(env, "status").assert_success()?;
    assert!(status.contains_stdout("Schema:      0 (expected 0.1.0) stale"));
    assert!(status.contains_stdout("Terms:       0"));

    // Snapshot restored: the stale marker lets the next trigger retry
    env.write_snapshot("units", crate::common::fixtures::UNITS_JSON)?;
    let retry = taxsync!(env, "activate", "--from", &from).assert_success()?;
    assert!(retry.contains_stdout("CAHNRS Units 5 added"));
    assert!(retry.contains_stdout("Topics up to date"));

    Ok(())
}

#[test]
fn test_malformed_payload_is_rejected_whole() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();
    env.write_snapshot("topics", r#"{"Health": ["Diet"]}"#)?;

    let result = taxsync!(env, "sync", "topics", "--from", &from).assert_failure()?;

    assert!(result.contains_stdout("fetch failed"));
    assert!(result.contains_stdout("expected an object at 'Health'"));
    assert!(result.contains_stderr("1 taxonomy fetch(es) failed"));

    Ok(())
}

#[test]
fn test_missing_snapshot_directory() -> Result<()> {
    let env = TestEnv::new()?;
    let missing = env.root().join("nowhere").display().to_string();

    let result = taxsync!(env, "sync", "--from", &missing).assert_failure()?;

    assert!(result.contains_stderr("Snapshot directory not found"));

    Ok(())
}
