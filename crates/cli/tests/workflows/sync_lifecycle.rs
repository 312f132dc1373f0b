//! Activation, gated re-runs and forced syncs against snapshot files

use crate::common::TestEnv;
use crate::taxsync;
use anyhow::Result;

#[test]
fn test_activation_syncs_both_taxonomies() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    let result = taxsync!(env, "activate", "--from", &from).assert_success()?;

    assert!(result.contains_stdout("CAHNRS Units 5 added, 0 already present"));
    assert!(result.contains_stdout("Topics 8 added, 0 already present"));
    assert!(result.contains_stdout("schema marker set to 0.1.0"));

    let status = taxsync!(env, "status").assert_success()?;
    assert!(status.contains_stdout("Terms:       5"));
    assert!(status.contains_stdout("Terms:       8"));
    assert!(!status.contains_stdout("stale"));

    Ok(())
}

#[test]
fn test_second_activation_is_a_no_op() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    taxsync!(env, "activate", "--from", &from).assert_success()?;
    let result = taxsync!(env, "activate", "--from", &from).assert_success()?;

    assert!(result.contains_stdout("CAHNRS Units up to date"));
    assert!(result.contains_stdout("Topics up to date"));
    assert!(!result.contains_stdout("added"));

    Ok(())
}

#[test]
fn test_forced_sync_adds_only_new_remote_names() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();
    taxsync!(env, "sync", "--from", &from).assert_success()?;

    // Current markers skip the run entirely
    let gated = taxsync!(env, "sync", "units", "--from", &from).assert_success()?;
    assert!(gated.contains_stdout("CAHNRS Units up to date"));

    env.write_snapshot(
        "units",
        r#"{"Extension": ["4-H Youth Development", "Master Gardener", "Online Learning"],
            "Research": ["Agricultural Research Center"]}"#,
    )?;
    let forced = taxsync!(env, "sync", "units", "--force", "--from", &from).assert_success()?;

    assert!(forced.contains_stdout("CAHNRS Units 1 added, 5 already present"));
    assert!(forced.contains_stdout("+   Online Learning"));

    let view = taxsync!(env, "view", "units", "--from", &from).assert_success()?;
    assert!(view.contains_stdout("CAHNRS Units (6 items)"));

    Ok(())
}

#[test]
fn test_remote_removals_never_delete_local_terms() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();
    taxsync!(env, "sync", "topics", "--from", &from).assert_success()?;

    env.write_snapshot("topics", r#"{"Health": {"Nutrition": ["Diet"]}}"#)?;
    let result = taxsync!(env, "sync", "topics", "--force", "--from", &from).assert_success()?;

    assert!(result.contains_stdout("Topics 0 added, 3 already present"));
    let view = taxsync!(env, "view", "topics", "--from", &from).assert_success()?;
    assert!(view.contains_stdout("Wheat"));
    assert!(view.contains_stdout("Topics (8 items)"));

    Ok(())
}
