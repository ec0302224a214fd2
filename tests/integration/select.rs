//! Tests for `blueprint select`

use super::common::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use wiremock::MockServer;

fn stored(site: &TestSite) -> Value {
    serde_json::from_str(&fs::read_to_string(site.selection()).unwrap()).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_persists_choices() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);

    let args = [
        "select",
        "--page",
        "7",
        "--ignore-theme",
        "--exclude-plugin",
        "b",
    ];
    site.with_selection(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selection saved"));

    let store = stored(&site);
    assert_eq!(store["blueprint_extractor_pages"], serde_json::json!(["7"]));
    assert_eq!(store["blueprint_extractor_ignore_theme"], true);
    assert_eq!(
        store["blueprint_extractor_ignore_plugins"],
        serde_json::json!(["b"])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_accumulates_across_runs() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);

    site.with_selection(&["select", "--page", "2"]).assert().success();
    site.with_selection(&["select", "--page", "7"]).assert().success();
    site.with_selection(&["select", "--deselect", "2"]).assert().success();

    assert_eq!(
        stored(&site)["blueprint_extractor_pages"],
        serde_json::json!(["7"])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_reset_keeps_foreign_keys() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);
    fs::write(
        site.selection(),
        r#"{"theme_preference": "dark", "blueprint_extractor_pages": ["2"]}"#,
    )
    .unwrap();

    site.with_selection(&["select", "--reset"]).assert().success();

    let store = stored(&site);
    assert_eq!(store["theme_preference"], "dark");
    assert!(store.get("blueprint_extractor_pages").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_select_rejects_malformed_constant() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);

    site.with_selection(&["select", "--constant", "WP_DEBUG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
    assert!(!site.selection().exists());
}
