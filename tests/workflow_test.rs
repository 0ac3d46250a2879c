//! Integration tests: the setup workflow against the real git executable.
//!
//! A bare repository in a temp dir stands in for the hosted remote, so these
//! run offline. They are skipped when git is not on PATH.

use std::path::Path;
use std::process::Command;

use gitseed::core::config::{CONFIG_FILE, Overrides, SeedConfig};
use gitseed::core::error::SetupError;
use gitseed::core::files::discover_files;
use gitseed::core::report::StepPolicy;
use gitseed::core::runner::GitRunner;
use gitseed::core::workflow::Workflow;

// ---------- Helpers ----------

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A working folder with a few files, pre-initialized on `branch` with a
/// local identity so the commit step does not depend on global git config.
fn prepare_project(dir: &Path, branch: &str) {
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::create_dir_all(dir.join(".Xil")).unwrap();
    std::fs::write(dir.join("top.vhd"), "entity top is end;\n").unwrap();
    std::fs::write(dir.join("src/adc.vhd"), "entity adc is end;\n").unwrap();
    std::fs::write(dir.join(".Xil/session.log"), "noise\n").unwrap();

    git(dir, &["init"]);
    git(dir, &["symbolic-ref", "HEAD", &format!("refs/heads/{}", branch)]);
    git(dir, &["config", "user.name", "gitseed tests"]);
    git(dir, &["config", "user.email", "gitseed@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn bare_remote(dir: &Path) {
    git(dir, &["init", "--bare"]);
}

fn config_for(local: &Path, remote: &Path) -> SeedConfig {
    let mut config = SeedConfig::default();
    config
        .apply(Overrides {
            path: Some(local.to_path_buf()),
            remote: Some(remote.display().to_string()),
            message: Some("Initial commit: project setup".to_string()),
            branches: Vec::new(),
        })
        .unwrap();
    config
}

/// Narration printed between the listing heading and the staging heading
fn listing_section(out: &str) -> &str {
    let start = out.find("(4/10)").expect("listing heading");
    let end = out.find("(5/10)").expect("staging heading");
    &out[start..end]
}

// ---------- Tests ----------

#[tokio::test]
async fn test_setup_pushes_to_bare_remote() {
    if !git_available() {
        eprintln!("skipping: git not on PATH");
        return;
    }

    let local = tempfile::tempdir().unwrap();
    let remote = tempfile::tempdir().unwrap();
    prepare_project(local.path(), "main");
    bare_remote(remote.path());

    let config = config_for(local.path(), remote.path());
    let runner = GitRunner::new();
    let mut workflow = Workflow::new(&config, &runner, local.path(), Vec::<u8>::new()).unwrap();
    let result = workflow.run().await;
    let (report, out) = workflow.finish();
    let out = String::from_utf8(out).unwrap();

    assert!(result.is_ok(), "setup failed: {:?}\n{}", result, out);
    assert!(report.success);
    assert_eq!(report.pushed_branch.as_deref(), Some("main"));

    // Only the listing step honours the exclude list; git itself stages .Xil/
    let listing = listing_section(&out);
    assert!(listing.contains("Files found: 2"), "{}", out);
    assert!(listing.contains("top.vhd"));
    assert!(!listing.contains("session.log"));

    // The commit landed on the remote with the configured message
    let log = git(remote.path(), &["log", "--format=%s", "main"]);
    assert_eq!(log.trim(), "Initial commit: project setup");

    // push -u left main tracking the remote
    let upstream = git(local.path(), &["rev-parse", "--abbrev-ref", "main@{upstream}"]);
    assert_eq!(upstream.trim(), "origin/main");

    let push = report.steps.iter().filter(|s| s.step == "push").count();
    assert_eq!(push, 1);
}

#[tokio::test]
async fn test_setup_falls_back_to_master() {
    if !git_available() {
        eprintln!("skipping: git not on PATH");
        return;
    }

    let local = tempfile::tempdir().unwrap();
    let remote = tempfile::tempdir().unwrap();
    prepare_project(local.path(), "master");
    bare_remote(remote.path());

    let config = config_for(local.path(), remote.path());
    let runner = GitRunner::new();
    let mut workflow = Workflow::new(&config, &runner, local.path(), Vec::<u8>::new()).unwrap();
    let result = workflow.run().await;
    let (report, _out) = workflow.finish();

    assert!(result.is_ok(), "setup failed: {:?}", result);
    assert_eq!(report.pushed_branch.as_deref(), Some("master"));

    let pushes: Vec<_> = report
        .steps
        .iter()
        .filter(|s| s.step == "push")
        .map(|s| (s.command.clone().unwrap(), s.success))
        .collect();
    assert_eq!(
        pushes,
        vec![
            ("git push -u origin main".to_string(), false),
            ("git push -u origin master".to_string(), true),
        ]
    );
    let commit = report.steps.iter().find(|s| s.step == "commit").unwrap();
    assert!(commit.success);
    assert_eq!(commit.policy, StepPolicy::BestEffort);
}

#[tokio::test]
async fn test_second_run_fails_on_existing_remote() {
    if !git_available() {
        eprintln!("skipping: git not on PATH");
        return;
    }

    let local = tempfile::tempdir().unwrap();
    let remote = tempfile::tempdir().unwrap();
    prepare_project(local.path(), "main");
    bare_remote(remote.path());
    git(local.path(), &["remote", "add", "origin", "https://example.com/elsewhere.git"]);

    let config = config_for(local.path(), remote.path());
    let runner = GitRunner::new();
    let mut workflow = Workflow::new(&config, &runner, local.path(), Vec::<u8>::new()).unwrap();
    let result = workflow.run().await;
    let (report, _out) = workflow.finish();

    match result {
        Err(SetupError::RequiredStep { step, .. }) => assert_eq!(step, "add-remote"),
        other => panic!("expected add-remote failure, got {:?}", other),
    }
    let expected = format!("git remote add origin {}", remote.path().display());
    assert_eq!(report.commands().last(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_missing_folder_never_spawns_git() {
    let parent = tempfile::tempdir().unwrap();
    let missing = parent.path().join("nope");

    let config = config_for(&missing, parent.path());
    let runner = GitRunner::new();
    let mut workflow = Workflow::new(&config, &runner, parent.path(), Vec::<u8>::new()).unwrap();
    let result = workflow.run().await;
    let (report, _out) = workflow.finish();

    assert!(matches!(result, Err(SetupError::MissingLocalPath(p)) if p == missing));
    assert_eq!(report.commands().count(), 0);
}

#[test]
fn test_config_file_drives_listing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        r#"
[repository]
path = "project"
remote = "https://example.com/project.git"

[listing]
exclude = [".git", "build"]
sample = 3
"#,
    )
    .unwrap();
    let project = dir.path().join("project");
    std::fs::create_dir_all(project.join("build")).unwrap();
    std::fs::write(project.join("a.txt"), "a").unwrap();
    std::fs::write(project.join("build/out.bin"), "b").unwrap();

    let nested = dir.path().join("project");
    let (config, source) = SeedConfig::resolve(None, &nested).unwrap();
    assert_eq!(source, Some(dir.path().join(CONFIG_FILE)));

    let root = config.local_path(&nested);
    assert_eq!(root, project);

    let listing = discover_files(&root, &config.listing.exclude).unwrap();
    assert_eq!(listing.total(), 1);
    assert_eq!(listing.sample(config.listing.sample).len(), 1);
}
