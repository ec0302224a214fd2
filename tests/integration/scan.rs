//! Tests for `blueprint scan`

use super::common::*;
use predicates::prelude::*;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_constants_skips_connection_settings() {
    let server = MockServer::start().await;
    let site = TestSite::new(&server);

    site.command(&["scan", "constants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WP_DEBUG = true"))
        .stdout(predicate::str::contains("DB_NAME").not())
        .stdout(predicate::str::contains("DB_PASSWORD").not())
        .stdout(predicate::str::contains("DISABLED").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_options_lists_plugin_settings() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.command(&["scan", "options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a\n  shop_currency = \"EUR\""))
        .stdout(predicate::str::contains("blogname").not());

    site.command(&["scan", "options", "--ignore", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugin options found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_options_skips_uninstallable_plugins() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.command(&["scan", "options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop_currency"))
        .stdout(predicate::str::contains("private").not())
        .stdout(predicate::str::contains("secret-value").not());
}
