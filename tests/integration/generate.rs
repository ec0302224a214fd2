//! Tests for `blueprint generate`

use super::common::*;
use predicates::prelude::*;
use std::fs;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_prioritizes_prerequisites() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    let output = site.command(&["generate"]).output().unwrap();
    let blueprint = stdout_json(&output);

    assert_eq!(plugin_slugs(&blueprint), vec!["a", "b"]);
    assert_eq!(
        blueprint["steps"][0]["info"],
        "(prioritized because of Plugin B)"
    );
    assert_eq!(blueprint["steps"][0]["name"], "Plugin A");
    assert_eq!(blueprint["steps"][1]["info"], "");
    assert_eq!(
        step_kinds(&blueprint),
        vec![
            "installPlugin",
            "installPlugin",
            "installTheme",
            "setSiteOptions",
            "runPHP",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_document_metadata() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    let blueprint = stdout_json(&site.command(&["generate"]).output().unwrap());

    assert_eq!(blueprint["landingPage"], "/");
    assert_eq!(blueprint["preferredVersions"]["php"], "8.2");
    assert_eq!(blueprint["preferredVersions"]["wp"], "6.5.2");
    assert_eq!(
        blueprint["phpExtensionBundles"],
        serde_json::json!(["kitchen-sink"])
    );
    assert_eq!(blueprint["features"]["networking"], true);
    assert_eq!(blueprint["login"], true);
    assert_eq!(
        blueprint["steps"][2]["themeZipFile"],
        serde_json::json!({"resource": "wordpress.org/themes", "slug": "twentytwentyfour"})
    );
    assert_eq!(blueprint["steps"][3]["options"]["blogname"], "Example Shop");
    assert_eq!(
        blueprint["steps"][3]["options"]["permalink_structure"],
        "/%postname%/"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_leaves_out_unpublished_plugins() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    site.command(&["generate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("private"))
        .stdout(predicate::str::contains("\"private\"").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_ignore_flags() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    let site = TestSite::new(&server);

    let output = site
        .command(&["generate", "--ignore", "a,twentytwentyfour"])
        .output()
        .unwrap();
    let blueprint = stdout_json(&output);
    assert_eq!(plugin_slugs(&blueprint), vec!["b"]);
    assert!(!step_kinds(&blueprint).contains(&"installTheme".to_string()));

    let output = site
        .command(&["generate", "--ignore-all-plugins", "--ignore-theme"])
        .output()
        .unwrap();
    let blueprint = stdout_json(&output);
    assert_eq!(step_kinds(&blueprint), vec!["setSiteOptions", "runPHP"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_reuses_cached_lookups() {
    let server = MockServer::start().await;
    for slug in ["a", "b"] {
        Mock::given(method("GET"))
            .and(path(PLUGINS_PATH))
            .and(query_param("request[slug]", slug))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": slug,
                "download_link": format!("https://downloads.wordpress.org/plugin/{}.zip", slug)
            })))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(PLUGINS_PATH))
        .and(query_param("request[slug]", "private"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(THEMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "slug": "twentytwentyfour"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let site = TestSite::new(&server);
    let first = stdout_json(&site.command(&["generate"]).output().unwrap());
    let second = stdout_json(&site.command(&["generate"]).output().unwrap());

    assert_eq!(first, second);
    let path = site.cache_dir().join("transients.json");
    assert!(path.exists());
    let transients = fs::read_to_string(&path).unwrap();
    let cached: serde_json::Value = serde_json::from_str(&transients).unwrap();
    assert_eq!(
        cached["blueprint_extractor_plugin_zip"]["value"]["private"],
        serde_json::json!(false)
    );
}

#[test]
fn test_generate_missing_snapshot() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "cache_dir: /tmp\n").unwrap();

    blueprint_command()
        .arg("generate")
        .arg("--config")
        .arg(temp.path().join("config.yaml"))
        .arg("--snapshot")
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snapshot error"));
}
