//! Tests for `blueprint cache clean`

use super::common::*;
use predicates::prelude::*;
use std::fs;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_clean_removes_lookups() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.command(&["generate"]).assert().success();
    let cache_file = site.cache_dir().join("transients.json");
    assert!(cache_file.exists());

    blueprint_command()
        .args(["cache", "clean", "--config"])
        .arg(site.config())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 4 cached lookup(s)"));
    assert!(!cache_file.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_clean_when_empty() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);
    fs::create_dir_all(site.cache_dir()).unwrap();

    blueprint_command()
        .args(["cache", "clean", "--config"])
        .arg(site.config())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_cache_clean_without_config_uses_user_config() {
    let home = tempfile::TempDir::new().unwrap();

    blueprint_command()
        .args(["cache", "clean"])
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to clean"));
    assert!(home.path().join("config/blueprint/config.yaml").exists());
}
