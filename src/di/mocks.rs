//! Mock implementations of service traits for testing

use super::traits::{Clock, ConfigProvider, Installation, MetadataSource};
use crate::core::{BlueprintError, BlueprintResult};
use crate::snapshot::types::{ActivePlugin, PlatformVersions, Post, ThemeInfo, UserAccount};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use blueprint::di::mocks::MockConfigProvider;
/// use blueprint::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.landing_page = "/shop".to_string();
///
/// assert_eq!(config.landing_page(), "/shop");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub plugins_api_url: String,
    pub themes_api_url: String,
    pub github_proxy_url: String,
    pub cors_proxy_url: String,
    pub playground_url: String,
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub landing_page: String,
    pub php_extension_bundles: Vec<String>,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            plugins_api_url: "https://api.wordpress.org/plugins/info/1.2/".to_string(),
            themes_api_url: "https://api.wordpress.org/themes/info/1.2/".to_string(),
            github_proxy_url: "https://github-proxy.com/proxy/".to_string(),
            cors_proxy_url: "https://playground.wordpress.net/cors-proxy.php".to_string(),
            playground_url: "https://playground.wordpress.net/".to_string(),
            cache_dir: PathBuf::from("/tmp/blueprint-test-cache"),
            cache_ttl: Duration::hours(24),
            landing_page: "/".to_string(),
            php_extension_bundles: vec!["kitchen-sink".to_string()],
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn plugins_api_url(&self) -> &str {
        &self.plugins_api_url
    }

    fn themes_api_url(&self) -> &str {
        &self.themes_api_url
    }

    fn github_proxy_url(&self) -> &str {
        &self.github_proxy_url
    }

    fn cors_proxy_url(&self) -> &str {
        &self.cors_proxy_url
    }

    fn playground_url(&self) -> &str {
        &self.playground_url
    }

    fn cache_dir(&self) -> BlueprintResult<PathBuf> {
        Ok(self.cache_dir.clone())
    }

    fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    fn landing_page(&self) -> &str {
        &self.landing_page
    }

    fn php_extension_bundles(&self) -> &[String] {
        &self.php_extension_bundles
    }
}

/// Mock plugin/theme directory
///
/// Counts lookups so tests can assert that cached slugs are not queried again.
///
/// # Example
///
/// ```
/// use blueprint::di::mocks::MockMetadataSource;
///
/// let metadata = MockMetadataSource::new();
/// metadata.add_plugin("akismet", "https://downloads.wordpress.org/plugin/akismet.zip");
/// metadata.add_theme("twentytwentyfour");
///
/// assert_eq!(metadata.lookup_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockMetadataSource {
    plugins: Arc<Mutex<HashMap<String, String>>>,
    themes: Arc<Mutex<HashSet<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a plugin with the given download link
    pub fn add_plugin(&self, slug: &str, download_link: &str) {
        self.plugins
            .lock()
            .unwrap()
            .insert(slug.to_string(), download_link.to_string());
    }

    /// Publish a theme
    pub fn add_theme(&self, slug: &str) {
        self.themes.lock().unwrap().insert(slug.to_string());
    }

    /// Make every lookup of `slug` fail with a transport error
    pub fn fail_on(&self, slug: &str) {
        self.failing.lock().unwrap().insert(slug.to_string());
    }

    /// Total number of lookups, plugin and theme
    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    /// Slugs looked up, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn record(&self, slug: &str) -> BlueprintResult<()> {
        self.lookups.lock().unwrap().push(slug.to_string());
        if self.failing.lock().unwrap().contains(slug) {
            return Err(BlueprintError::Resolution(format!(
                "Mock lookup failure for {}",
                slug
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn plugin_download_link(&self, slug: &str) -> BlueprintResult<Option<String>> {
        self.record(slug)?;
        Ok(self.plugins.lock().unwrap().get(slug).cloned())
    }

    async fn theme_exists(&self, slug: &str) -> BlueprintResult<bool> {
        self.record(slug)?;
        Ok(self.themes.lock().unwrap().contains(slug))
    }
}

/// Settable clock
#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl Default for MockClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::at(start)
    }
}

impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// In-memory WordPress installation
///
/// Fields are public; tests build the site state they need directly.
#[derive(Clone, Default)]
pub struct MockInstallation {
    pub site_url: String,
    pub versions: PlatformVersions,
    pub options: Map<String, Value>,
    pub plugins: Vec<ActivePlugin>,
    pub theme: Option<ThemeInfo>,
    pub posts: Vec<Post>,
    pub users: Vec<UserAccount>,
    pub wp_config: Option<String>,
    /// Plugin file -> source directory
    pub plugin_dirs: HashMap<String, PathBuf>,
}

impl MockInstallation {
    pub fn new() -> Self {
        Self {
            site_url: "https://example.com".to_string(),
            versions: PlatformVersions {
                php: "8.2.12".to_string(),
                wp: "6.5.2".to_string(),
            },
            ..Default::default()
        }
    }

    pub fn with_plugin(mut self, plugin: ActivePlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_theme(mut self, slug: &str, name: &str) -> Self {
        self.theme = Some(ThemeInfo {
            slug: slug.to_string(),
            stylesheet: slug.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_option(mut self, name: &str, value: Value) -> Self {
        self.options.insert(name.to_string(), value);
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_user(mut self, login: &str, display_name: &str, role: &str) -> Self {
        self.users.push(UserAccount {
            login: login.to_string(),
            display_name: display_name.to_string(),
            roles: vec![role.to_string()],
        });
        self
    }
}

impl Installation for MockInstallation {
    fn active_plugins(&self) -> Vec<ActivePlugin> {
        self.plugins.clone()
    }

    fn active_theme(&self) -> Option<ThemeInfo> {
        self.theme.clone()
    }

    fn option(&self, name: &str) -> Option<Value> {
        self.options.get(name).cloned()
    }

    fn posts_of_type(&self, post_type: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.post_type == post_type)
            .cloned()
            .collect()
    }

    fn post(&self, id: u64) -> Option<Post> {
        self.posts.iter().find(|p| p.id == id).cloned()
    }

    fn users(&self) -> Vec<UserAccount> {
        self.users.clone()
    }

    fn config_source(&self) -> Option<String> {
        self.wp_config.clone()
    }

    fn plugin_dir(&self, plugin_file: &str) -> Option<PathBuf> {
        self.plugin_dirs.get(plugin_file).cloned()
    }

    fn site_url(&self) -> String {
        self.site_url.clone()
    }

    fn platform_versions(&self) -> PlatformVersions {
        self.versions.clone()
    }
}
