//! Binary-level tests for the config store commands.
//!
//! These never touch tmux: `XDG_CONFIG_HOME` points at a temp dir and only
//! store commands are exercised.

use assert_cmd::Command;
use tempfile::TempDir;

fn muxsmith(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("muxsmith").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("EDITOR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_prints_sorted_config_names() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("muxsmith");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("web.toml"), "").unwrap();
    std::fs::write(dir.join("api.toml"), "").unwrap();

    muxsmith(&home)
        .arg("ls")
        .assert()
        .success()
        .stdout("api\nweb\n");
}

#[test]
fn new_writes_template_then_needs_editor() {
    let home = TempDir::new().unwrap();

    let out = muxsmith(&home).args(["new", "proj"]).assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).into_owned();
    assert!(stderr.contains("EDITOR variable not defined"), "{stderr}");

    let written = std::fs::read_to_string(home.path().join("muxsmith/proj.toml")).unwrap();
    assert!(written.contains("name = \"proj\""));

    let out = muxsmith(&home).args(["new", "proj"]).assert().failure();
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).into_owned();
    assert!(stderr.contains("Config already exists: proj"), "{stderr}");
}

#[test]
fn delete_missing_config_fails() {
    let home = TempDir::new().unwrap();

    let out = muxsmith(&home).args(["delete", "ghost"]).assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&out.get_output().stderr).into_owned();
    assert!(stderr.contains("Config not found: ghost"), "{stderr}");
}

#[test]
fn remove_alias_deletes_config() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("muxsmith");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("old.toml"), "").unwrap();

    muxsmith(&home).args(["remove", "old"]).assert().success();

    assert!(!dir.join("old.toml").exists());
}
