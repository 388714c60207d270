use gsw::scan::{BranchStatus, CHECKOUT_FAILED, GitInspector, Inspector, STATUS_FAILED};

use crate::common::{TestRepo, TestWorkspace};

#[test]
fn test_clean_repo_reports_nothing_by_default() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("tidy");

    let status = GitInspector::new().inspect(repo.path());

    assert_eq!(status.error, None);
    assert_eq!(status.current_branch, "main");
    assert!(status.branches.is_empty());
}

#[test]
fn test_clean_repo_with_show_clean() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("tidy");

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.branches, vec![BranchStatus::clean("main", true)]);
    assert_eq!(status.branches[0].status, "Clean");
}

#[test]
fn test_dirty_working_tree_is_summarized() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("busy");
    repo.write("README.md", "changed\n");
    repo.write("notes.txt", "new\n");
    repo.write("todo.txt", "new\n");

    let status = GitInspector::new().inspect(repo.path());

    assert_eq!(status.branches.len(), 1);
    let main = &status.branches[0];
    assert_eq!(main.name, "main");
    assert!(main.current);
    assert!(main.is_dirty);
    assert_eq!(main.status, "1 modified, 2 untracked");
}

#[test]
fn test_staged_changes_are_counted() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("staged");
    repo.write("added.txt", "a\n");
    repo.git(&["add", "added.txt"]);
    repo.git(&["rm", "-q", "README.md"]);

    let status = GitInspector::new().inspect(repo.path());

    assert_eq!(status.branches[0].status, "1 added, 1 deleted");
}

#[test]
fn test_upstream_distance() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("diverged").with_diverged_feature();

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    let names: Vec<_> = status.branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["feature", "main"]);

    let feature = &status.branches[0];
    assert!(!feature.is_dirty);
    assert!(!feature.current);
    assert_eq!((feature.ahead, feature.behind), (3, 1));

    // No upstream configured
    let main = &status.branches[1];
    assert_eq!((main.ahead, main.behind), (0, 0));
}

#[test]
fn test_original_branch_is_restored() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("restore").with_diverged_feature();
    repo.git(&["checkout", "-q", "feature"]);

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.current_branch, "feature");
    assert_eq!(repo.head_ref(), "feature");
    let current: Vec<_> = status
        .branches
        .iter()
        .filter(|b| b.current)
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(current, ["feature"]);
}

#[test]
fn test_detached_head_is_restored() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("detached").with_diverged_feature();
    repo.git(&["checkout", "-q", "--detach", "feature~1"]);
    let sha = repo.head_sha();

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.error, None);
    assert_eq!(status.current_branch, "HEAD");
    assert!(status.branches.iter().all(|b| !b.current));
    assert_eq!(repo.head_ref(), "HEAD");
    assert_eq!(repo.head_sha(), sha);
}

#[test]
fn test_inspection_is_idempotent() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("again").with_diverged_feature();
    repo.write("scratch.txt", "x\n");

    let inspector = GitInspector::new().include_clean(true);
    let first = inspector.inspect(repo.path());
    let second = inspector.inspect(repo.path());

    assert_eq!(first, second);
}

#[test]
fn test_repository_without_commits_is_an_error_record() {
    let ws = TestWorkspace::new();
    let path = ws.root().join("unborn");
    std::fs::create_dir(&path).unwrap();
    crate::common::git(&path, &["init", "-q", "-b", "main"]);

    let status = GitInspector::new().inspect(&path);

    let error = status.error.as_deref().unwrap();
    assert!(
        error.starts_with("Error getting current branch: "),
        "unexpected error: {error}"
    );
    assert!(status.branches.is_empty());
}

#[test]
fn test_missing_directory_is_an_error_record() {
    let ws = TestWorkspace::new();
    let path = ws.root().join("gone");

    let status = GitInspector::new().inspect(&path);

    assert!(status.error.is_some());
    assert_eq!(status.path, path);
}

#[test]
fn test_timeout_setting_does_not_affect_fast_commands() {
    let ws = TestWorkspace::new();
    let repo: TestRepo = ws.repo("quick");

    let status = GitInspector::new()
        .command_timeout(Some(std::time::Duration::from_secs(30)))
        .include_clean(true)
        .inspect(repo.path());

    assert_eq!(status.error, None);
    assert_eq!(status.branches.len(), 1);
}

#[test]
fn test_tags_named_like_branches_do_not_shadow_them() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("tagged").with_diverged_feature();
    // Tags point at main, so resolving either name as a tag would skew the counts
    repo.git(&["tag", "feature", "main"]);
    repo.git(&["tag", "main", "main"]);

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.error, None);
    assert_eq!(status.current_branch, "main");
    let feature = &status.branches[0];
    assert_eq!(feature.name, "feature");
    assert_eq!(feature.status, "Clean");
    assert_eq!((feature.ahead, feature.behind), (3, 1));
    assert!(status.branches[1].current);
    // Still on the branch, not detached at the tag
    assert_eq!(repo.git(&["symbolic-ref", "HEAD"]).trim(), "refs/heads/main");
}

#[test]
fn test_checkout_failure_is_recorded_per_branch() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("busy-branch").with_diverged_feature();
    repo.git(&["branch", "zeta"]);
    // A branch checked out in another worktree can't be checked out here
    let linked = ws.root().join("linked");
    repo.git(&["worktree", "add", "-q", linked.to_str().unwrap(), "feature"]);

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.error, None);
    let names: Vec<_> = status.branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["feature", "main", "zeta"]);

    let feature = &status.branches[0];
    assert_eq!(feature.status, CHECKOUT_FAILED);
    assert!(!feature.is_dirty);
    assert_eq!((feature.ahead, feature.behind), (0, 0));

    // Later branches are still inspected
    assert_eq!(status.branches[1], BranchStatus::clean("main", true));
    assert_eq!(status.branches[2], BranchStatus::clean("zeta", false));
    assert_eq!(repo.head_ref(), "main");
}

#[test]
fn test_checkout_failure_hidden_without_show_clean() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("busy-branch").with_diverged_feature();
    let linked = ws.root().join("linked");
    repo.git(&["worktree", "add", "-q", linked.to_str().unwrap(), "feature"]);

    let status = GitInspector::new().inspect(repo.path());

    assert_eq!(status.error, None);
    assert!(status.branches.is_empty());
}

#[test]
fn test_status_failure_is_recorded_per_branch() {
    let ws = TestWorkspace::new();
    let repo = ws.repo("corrupt");
    std::fs::write(repo.path().join(".git/index"), b"not an index").unwrap();

    let status = GitInspector::new().include_clean(true).inspect(repo.path());

    assert_eq!(status.error, None);
    assert_eq!(status.current_branch, "main");
    assert_eq!(status.branches.len(), 1);
    let main = &status.branches[0];
    assert_eq!(main.status, STATUS_FAILED);
    assert!(!main.is_dirty);
    assert!(main.current);
}
