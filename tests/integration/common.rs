//! Common utilities for integration tests

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PLUGINS_PATH: &str = "/plugins/info/1.2/";
pub const THEMES_PATH: &str = "/themes/info/1.2/";

pub const SNAPSHOT: &str = r#"
site_url: https://example.com
versions:
  php: 8.2.12
  wp: 6.5.2
options:
  blogname: Example Shop
  blogdescription: Just another site
  permalink_structure: /%postname%/
  shop_currency: EUR
  private_key: secret-value
plugins:
  - file: b/b.php
    name: Plugin B
    requires_plugins: a
  - file: a/a.php
    name: Plugin A
  - file: private/private.php
    name: Private Plugin
theme:
  slug: twentytwentyfour
  stylesheet: twentytwentyfour
  name: Twenty Twenty-Four
posts:
  - id: 2
    post_type: page
    title: About
    name: about
    content: "<p>See https://example.com/contact</p>"
  - id: 7
    post_type: page
    title: Contact
    name: contact
    content: "<p>Write us</p>"
  - id: 10
    post_type: wp_template
    title: Home
    name: home
    content: "<!-- wp:template-part {\"slug\":\"header\"} /-->"
    theme: twentytwentyfour
  - id: 20
    post_type: wp_template_part
    title: Header
    name: header
    content: "<!-- wp:navigation {\"ref\":42} /-->"
    theme: twentytwentyfour
  - id: 42
    post_type: wp_navigation
    title: Main
    name: main
    content: "<!-- wp:navigation-link {\"id\":7} /-->"
users:
  - login: admin
    display_name: Admin
    roles: [administrator]
  - login: jane
    display_name: Jane Doe
    roles: [editor]
"#;

pub const WP_CONFIG: &str = r#"<?php
define( 'DB_NAME', 'shop' );
define( 'DB_PASSWORD', 'secret' );
define( 'WP_DEBUG', 'true' );
// define( 'DISABLED', 'x' );
$table_prefix = 'wp_';
"#;

pub fn blueprint_command() -> Command {
    Command::cargo_bin("blueprint").unwrap()
}

/// A site on disk with its own config, cache and selection files
pub struct TestSite {
    pub temp: TempDir,
}

impl TestSite {
    /// Site whose config points every remote endpoint at `server`
    pub fn new(server: &MockServer) -> Self {
        let temp = TempDir::new().unwrap();
        let site = Self { temp };

        fs::write(site.snapshot(), SNAPSHOT).unwrap();

        let root = site.root();
        fs::create_dir_all(root.join("wp-content/plugins/a")).unwrap();
        fs::create_dir_all(root.join("wp-content/plugins/private")).unwrap();
        fs::write(root.join("wp-config.php"), WP_CONFIG).unwrap();
        fs::write(
            root.join("wp-content/plugins/a/a.php"),
            "<?php $currency = get_option( 'shop_currency' ); $name = get_option('blogname');",
        )
        .unwrap();
        fs::write(
            root.join("wp-content/plugins/private/private.php"),
            "<?php $key = get_option( 'private_key' );",
        )
        .unwrap();

        let config = format!(
            "plugins_api_url: {uri}{PLUGINS_PATH}\n\
             themes_api_url: {uri}{THEMES_PATH}\n\
             github_proxy_url: https://github-proxy.com/proxy/\n\
             cors_proxy_url: https://playground.wordpress.net/cors-proxy.php\n\
             playground_url: https://playground.wordpress.net/\n\
             cache_dir: {cache}\n",
            uri = server.uri(),
            cache = site.cache_dir().display()
        );
        fs::write(site.config(), config).unwrap();

        site
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn snapshot(&self) -> PathBuf {
        self.path().join("snapshot.yaml")
    }

    pub fn root(&self) -> PathBuf {
        self.path().join("wordpress")
    }

    pub fn config(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path().join("cache")
    }

    pub fn selection(&self) -> PathBuf {
        self.path().join("selection.json")
    }

    /// Command for `subcommand` with config and site arguments filled in
    pub fn command(&self, subcommand: &[&str]) -> Command {
        let mut cmd = blueprint_command();
        cmd.args(subcommand)
            .arg("--config")
            .arg(self.config())
            .arg("--snapshot")
            .arg(self.snapshot())
            .arg("--root")
            .arg(self.root());
        cmd
    }

    /// Like [`TestSite::command`], also pointing at the site's selection file
    pub fn with_selection(&self, subcommand: &[&str]) -> Command {
        let mut cmd = self.command(subcommand);
        cmd.arg("--selection").arg(self.selection());
        cmd
    }
}

/// Answer plugin lookups for `a` and `b`; everything else is unknown
pub async fn mount_directory(server: &MockServer) {
    for slug in ["a", "b"] {
        Mock::given(method("GET"))
            .and(path(PLUGINS_PATH))
            .and(query_param("request[slug]", slug))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": slug,
                "name": format!("Plugin {}", slug.to_uppercase()),
                "download_link": format!("https://downloads.wordpress.org/plugin/{}.zip", slug)
            })))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(PLUGINS_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Plugin not found."})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(THEMES_PATH))
        .and(query_param("request[slug]", "twentytwentyfour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "slug": "twentytwentyfour",
            "name": "Twenty Twenty-Four"
        })))
        .mount(server)
        .await;
}

pub fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// `step` names of a blueprint, in order
pub fn step_kinds(blueprint: &Value) -> Vec<String> {
    blueprint["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step"].as_str().unwrap().to_string())
        .collect()
}

/// Slugs of `installPlugin` steps that install from the plugin directory
pub fn plugin_slugs(blueprint: &Value) -> Vec<String> {
    blueprint["steps"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["step"] == "installPlugin")
        .filter_map(|s| s["pluginData"]["slug"].as_str())
        .map(str::to_string)
        .collect()
}
