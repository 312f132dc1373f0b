//! Management view output, outline and HTML

use crate::common::TestEnv;
use crate::taxsync;
use anyhow::Result;

#[test]
fn test_view_syncs_stale_taxonomy_first() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    let result = taxsync!(env, "view", "topics", "--from", &from).assert_success()?;

    assert!(result.contains_stderr("Synced 8 new topics terms"));
    assert!(result.contains_stdout("Topics (8 items)"));
    assert!(result.contains_stdout("Health\n  Nutrition\n    Diet\n    Food Safety\n  Wellness\nAgriculture"));

    // Only the viewed taxonomy was touched
    let status = taxsync!(env, "status").assert_success()?;
    assert!(status.contains_stdout("Terms:       0"));

    Ok(())
}

#[test]
fn test_view_html_listing() -> Result<()> {
    let env = TestEnv::with_snapshots()?;
    let from = env.snapshots_arg();

    let result = taxsync!(env, "view", "units", "--html", "--from", &from).assert_success()?;
    let html = result.stdout.trim();

    assert!(html.starts_with("<div class=\"wrap nosubsub\"><h2>CAHNRS Units</h2><p><em>5 items</em></p>"));
    assert!(html.contains("<h3>Extension</h3><ul>"));
    assert!(html.contains(
        "<li><h4><a href=\"?cahnrs_unit=4-h-youth-development\">4-H Youth Development</a></h4></li>"
    ));
    assert!(html.ends_with("</div>"));

    Ok(())
}

#[test]
fn test_empty_view_when_fetch_fails() -> Result<()> {
    let env = TestEnv::new()?;
    let from = env.snapshots_arg();

    let result = taxsync!(env, "view", "units", "--from", &from).assert_success()?;

    assert!(result.contains_stderr("could not be synced"));
    assert!(result.contains_stdout("No terms yet"));

    Ok(())
}
