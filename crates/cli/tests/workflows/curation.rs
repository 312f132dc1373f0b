//! Hand-added terms alongside remote ones

use crate::common::TestEnv;
use crate::taxsync;
use anyhow::Result;

#[test]
fn test_curated_terms_survive_sync() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    taxsync!(env, "add", "units", "County Offices").assert_success()?;
    taxsync!(env, "add", "units", "Spokane County", "--parent", "County Offices").assert_success()?;
    taxsync!(env, "sync", "--from", &from).assert_success()?;

    let view = taxsync!(env, "view", "units", "--from", &from).assert_success()?;
    assert!(view.contains_stdout("County Offices\n  Spokane County"));
    assert!(view.contains_stdout("CAHNRS Units (7 items)"));

    Ok(())
}

#[test]
fn test_unit_names_match_anywhere_in_the_taxonomy() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    // A top-level local unit hides the remote sub-unit of the same name
    taxsync!(env, "add", "units", "Master Gardener").assert_success()?;
    let result = taxsync!(env, "sync", "units", "--from", &from).assert_success()?;

    assert!(result.contains_stdout("CAHNRS Units 4 added, 1 already present"));

    Ok(())
}

#[test]
fn test_topic_names_match_per_parent() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    // Same name at the top level does not count for Health/Nutrition/Diet
    taxsync!(env, "add", "topics", "Diet").assert_success()?;
    let result = taxsync!(env, "sync", "topics", "--from", &from).assert_success()?;

    assert!(result.contains_stdout("Topics 8 added, 0 already present"));

    Ok(())
}

#[test]
fn test_add_rejects_duplicates_and_unknown_parents() -> Result<()> {
    let env = TestEnv::new()?;

    taxsync!(env, "add", "topics", "Health").assert_success()?;
    let dup = taxsync!(env, "add", "topics", "Health").assert_failure()?;
    assert!(dup.contains_stderr("already exists"));

    let orphan = taxsync!(env, "add", "topics", "Diet", "--parent", "Nutrition").assert_failure()?;
    assert!(orphan.contains_stderr("No topics term named 'Nutrition'"));

    Ok(())
}
