//! Tests for `blueprint export`

use super::common::*;
use predicates::prelude::*;
use std::fs;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn test_export_without_selection() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    let blueprint = stdout_json(&site.with_selection(&["export"]).output().unwrap());

    assert_eq!(
        step_kinds(&blueprint),
        vec![
            "installPlugin",
            "installPlugin",
            "installTheme",
            "setSiteOptions",
            "runPHP",
            "installPlugin",
            "setSiteOptions"
        ]
    );
    let first = &blueprint["steps"][0];
    assert!(first.get("name").is_none());
    assert!(first.get("slug").is_none());
    assert!(first.get("info").is_none());

    let extractor = &blueprint["steps"][5]["pluginData"];
    assert_eq!(
        extractor["url"],
        "https://github-proxy.com/proxy/?repo=akirk/blueprint-extractor&branch=main"
    );
    let seed = &blueprint["steps"][6]["options"];
    assert_eq!(seed["blueprint_extractor_default_checked"], true);
    assert_eq!(seed["blueprint_extractor_name"], "Example Shop V2");
    assert_eq!(seed["blueprint_extractor_initial_landing_page"], "/");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_applies_saved_selection() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.with_selection(&[
        "select",
        "--exclude-plugin",
        "a",
        "--page",
        "2",
        "--template-part",
        "20",
        "--user",
        "jane:s3cret",
        "--constant",
        "WP_DEBUG=true",
        "--option",
        "shop_currency=EUR",
        "--zip-url",
        "https://example.com/uploads.zip",
        "--no-extractor",
    ])
    .assert()
    .success();

    let blueprint = stdout_json(&site.with_selection(&["export"]).output().unwrap());

    assert_eq!(plugin_slugs(&blueprint), vec!["b"]);
    assert_eq!(
        step_kinds(&blueprint),
        vec![
            "installPlugin",
            "installTheme",
            "setSiteOptions",
            "runPHP",
            "unzip",
            "runPHP",
            "defineWpConfigConsts",
            "runPHP",
            "runPHP"
        ]
    );

    let steps = blueprint["steps"].as_array().unwrap();
    assert_eq!(steps[2]["options"]["shop_currency"], "EUR");
    assert_eq!(steps[2]["options"]["blogname"], "Example Shop");
    assert_eq!(
        steps[4]["zipFile"]["url"],
        "https://playground.wordpress.net/cors-proxy.php?https://example.com/uploads.zip"
    );
    assert_eq!(steps[4]["extractToPath"], "/wordpress/wp-content/uploads");
    assert!(steps[5]["code"].as_str().unwrap().contains("'user_login' => 'jane'"));
    assert_eq!(steps[6]["consts"]["WP_DEBUG"], "true");
    assert!(steps[7]["code"].as_str().unwrap().contains("'post_name' => 'about'"));

    let part = steps[8]["code"].as_str().unwrap();
    assert!(part.contains(r#"{"ref":REFERENCE_0}"#));
    assert!(part.contains("get_page_by_path( 'contact', OBJECT, 'page' )"));
    assert!(part.contains("$nav_items['NAV_ITEM_7']"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_is_repeatable() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.with_selection(&["select", "--page", "2", "--page", "7"])
        .assert()
        .success();

    let first = site.with_selection(&["export"]).output().unwrap();
    let second = site.with_selection(&["export"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_link() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.with_selection(&["export", "--link"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://playground.wordpress.net/?blueprint-url=data:application/json;base64,",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_rejects_corrupt_selection() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);
    fs::write(site.selection(), "not json").unwrap();

    site.with_selection(&["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Selection error"));
}
