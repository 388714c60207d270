use rstest::rstest;
use serde_json::Value;

use crate::common::TestWorkspace;

fn scanned_paths(ws: &TestWorkspace, output: std::process::Output) -> Vec<String> {
    assert!(
        output.status.success(),
        "gsw failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let records: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    records
        .iter()
        .map(|r| ws.redact(r["path"].as_str().unwrap()))
        .collect()
}

/// Repositories at depths 1, 2 and 3, plus one under `node_modules`.
fn layered_workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.repo("top");
    ws.repo("group/middle");
    ws.repo("group/sub/deep");
    ws.repo("web/node_modules/dep");
    ws
}

#[rstest]
#[case("1", &["[ROOT]/top"])]
#[case("2", &["[ROOT]/group/middle", "[ROOT]/top"])]
#[case("3", &["[ROOT]/group/middle", "[ROOT]/group/sub/deep", "[ROOT]/top"])]
fn test_max_depth_flag(#[case] depth: &str, #[case] expected: &[&str]) {
    let ws = layered_workspace();

    let output = ws
        .scan()
        .args(["--json", "--max-depth", depth])
        .output()
        .unwrap();

    assert_eq!(scanned_paths(&ws, output), expected);
}

#[test]
fn test_exclude_flag() {
    let ws = layered_workspace();

    let output = ws
        .scan()
        .args(["--json", "--exclude", "group"])
        .output()
        .unwrap();

    assert_eq!(scanned_paths(&ws, output), ["[ROOT]/top"]);
}

#[test]
fn test_config_file_settings() {
    let ws = layered_workspace();
    let config_dir = ws.config_home().join("gsw");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "max_depth = 2\nexclude = [\"group\"]\nshow_clean = true\n",
    )
    .unwrap();

    let output = ws.scan().arg("--json").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    assert_eq!(scanned_paths(&ws, output), ["[ROOT]/top"]);
    // show_clean from the file: the clean main branch is listed
    assert!(stdout.contains("\"status\": \"Clean\""), "{stdout}");
}

#[test]
fn test_flags_override_config_file() {
    let ws = layered_workspace();
    let config = ws.config_home().join("custom.toml");
    std::fs::write(&config, "max_depth = 1\n").unwrap();

    let output = ws
        .scan()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .args(["--max-depth", "2"])
        .output()
        .unwrap();

    assert_eq!(
        scanned_paths(&ws, output),
        ["[ROOT]/group/middle", "[ROOT]/top"]
    );
}

#[test]
fn test_environment_settings() {
    let ws = layered_workspace();

    let output = ws
        .scan()
        .arg("--json")
        .env("GSW_MAX_DEPTH", "3")
        .env("GSW_EXCLUDE", "sub,web")
        .output()
        .unwrap();

    assert_eq!(
        scanned_paths(&ws, output),
        ["[ROOT]/group/middle", "[ROOT]/top"]
    );
}

#[test]
fn test_missing_explicit_config_fails() {
    let ws = TestWorkspace::new();

    let output = ws
        .scan()
        .arg("--config")
        .arg(ws.config_home().join("absent.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}

#[test]
fn test_invalid_config_fails() {
    let ws = TestWorkspace::new();
    let config = ws.config_home().join("bad.toml");
    std::fs::write(&config, "jobs = 0\n").unwrap();

    let output = ws.scan().arg("--config").arg(&config).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("jobs must be at least 1"));
}

#[test]
fn test_no_show_clean_overrides_config_file() {
    let ws = TestWorkspace::new();
    ws.repo("tidy");
    let config = ws.config_home().join("custom.toml");
    std::fs::write(&config, "show_clean = true\n").unwrap();

    let listed = ws
        .scan()
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&listed.stdout).contains("main * - Clean"));

    let output = ws
        .scan()
        .arg("--config")
        .arg(&config)
        .arg("--no-show-clean")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("   ✓ All branches clean\n"), "{stdout}");
    assert!(!stdout.contains("- Clean"), "{stdout}");
}
