//! Junction creation tests

use super::{assert_absent, assert_junction_to, assert_present, scratch_env, shell_env};
use scratch_fixtures::{ScratchError, ScratchHelper};
use std::collections::{BTreeMap, HashMap};

fn link_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(link, target)| (link.to_string(), target.to_string()))
        .collect()
}

/// A single link to an existing directory
#[test]
fn test_single_junction_native() -> anyhow::Result<()> {
    let env = scratch_env();
    env.scratch_dir("target1")?;

    env.create_junctions(&link_map(&[("link1", "target1")]))?;

    assert_present(env.path().join("link1"));
    assert_junction_to(&env, "link1", "target1")?;
    Ok(())
}

/// Files written through the target are visible through the link
#[test]
fn test_junction_shares_content() -> anyhow::Result<()> {
    let env = scratch_env();
    env.scratch_file("data/inner/file.txt", ["shared"])?;

    env.create_junctions(&link_map(&[("alias", "data")]))?;

    let through_link = std::fs::read_to_string(env.path().join("alias/inner/file.txt"))?;
    assert_eq!(through_link, "shared\n");
    Ok(())
}

/// Links can point at other links and into nested directories
#[test]
fn test_many_junctions_native() -> anyhow::Result<()> {
    let env = scratch_env();
    env.scratch_dir("a/b/c")?;

    let mut links = HashMap::new();
    links.insert("to_c", "a/b/c");
    links.insert("nested/to_b", "a/b");
    env.create_junctions(&links)?;
    env.create_junctions(&link_map(&[("to_to_c", "to_c")]))?;

    assert_junction_to(&env, "to_c", "a/b/c")?;
    assert_junction_to(&env, "nested/to_b", "a/b")?;
    assert_present(env.path().join("to_to_c"));
    Ok(())
}

/// A dangling link still counts as created
#[test]
fn test_dangling_junction_native() -> anyhow::Result<()> {
    let env = scratch_env();

    env.create_junctions(&link_map(&[("dangling", "missing_target")]))?;

    assert_present(env.path().join("dangling"));
    assert!(!env.path().join("dangling").exists());
    Ok(())
}

/// The whole batch runs in one interpreter invocation
#[test]
fn test_junctions_through_shell() -> anyhow::Result<()> {
    let env = shell_env();
    env.scratch_dir("target1")?;
    env.scratch_dir("target2")?;

    env.create_junctions(&link_map(&[("link1", "target1"), ("link2", "target2")]))?;

    assert_junction_to(&env, "link1", "target1")?;
    assert_junction_to(&env, "link2", "target2")?;
    Ok(())
}

/// Native creation reports the failing pair
#[test]
fn test_existing_link_path_fails_with_pair() -> anyhow::Result<()> {
    let env = scratch_env();
    env.scratch_dir("target")?;
    env.scratch_file("occupied", ["not a link"])?;

    let err = env
        .create_junctions(&link_map(&[("occupied", "target")]))
        .unwrap_err();

    match &err {
        ScratchError::LinkFailed { link, target, .. } => {
            assert_eq!(link, "occupied");
            assert_eq!(target, "target");
        }
        other => panic!("Expected LinkFailed error, got {other:?}"),
    }
    assert!(err.to_string().contains("'occupied' -> 'target'"));
    Ok(())
}

/// A failing shell batch surfaces the command line
#[test]
fn test_failing_shell_batch_reports_command() -> anyhow::Result<()> {
    let env = shell_env();
    env.scratch_dir("target")?;
    env.scratch_file("blocker", ["file in the way of a parent directory"])?;

    let err = env
        .create_junctions(&link_map(&[("blocker/link", "target")]))
        .unwrap_err();

    match err {
        ScratchError::Command(command_err) => {
            assert!(command_err.to_string().contains("blocker/link"));
        }
        other => panic!("Expected Command error, got {other:?}"),
    }
    Ok(())
}

/// Deleting a link removes the link only
#[test]
fn test_delete_junction_keeps_target() -> anyhow::Result<()> {
    for env in [scratch_env(), shell_env()] {
        env.scratch_file("target/keep.txt", ["keep"])?;
        env.create_junctions(&link_map(&[("link", "target")]))?;

        env.delete_all_under("link")?;

        assert_absent(env.path().join("link"));
        assert!(env.path().join("target/keep.txt").exists());
    }
    Ok(())
}

/// Deleting the whole root with links inside does not touch outside targets
#[test]
fn test_delete_root_with_junction_to_outside() -> anyhow::Result<()> {
    let outside = scratch_env();
    outside.scratch_file("precious.txt", ["do not delete"])?;

    let holder = scratch_env();
    let root = holder.path().join("root");
    let helper = ScratchHelper::new(&root);
    helper.scratch_dir("")?;
    scratch_fixtures::scratch::platform::create_junction(outside.path(), &root.join("out"))?;

    helper.delete_all_under("")?;

    assert_absent(&root);
    assert!(outside.path().join("precious.txt").exists());
    Ok(())
}

/// A link path that is already a directory is an error, not a nested link
#[test]
fn test_existing_directory_at_link_fails() -> anyhow::Result<()> {
    for env in [scratch_env(), shell_env()] {
        env.scratch_dir("target")?;
        env.scratch_dir("link")?;

        assert!(env.create_junctions(&link_map(&[("link", "target")])).is_err());

        assert!(!env.is_junction("link")?);
        assert_absent(env.path().join("link/target"));
    }
    Ok(())
}

/// A link that never materialized is reported with its pair
#[test]
fn test_missing_junction_names_pair() -> anyhow::Result<()> {
    let env = scratch_env();
    env.scratch_dir("target1")?;
    env.create_junctions(&link_map(&[("link1", "target1")]))?;

    let err = env
        .verify_junctions(&link_map(&[("link1", "target1"), ("link2", "target2")]))
        .unwrap_err();

    match &err {
        ScratchError::JunctionMissing { link, target } => {
            assert_eq!(link, "link2");
            assert_eq!(target, "target2");
        }
        other => panic!("Expected JunctionMissing error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Could not create junction 'link2' -> 'target2'");
    Ok(())
}
