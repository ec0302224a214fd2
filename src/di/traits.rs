//! Trait definitions for dependency injection

use crate::core::BlueprintResult;
use crate::snapshot::types::{ActivePlugin, PlatformVersions, Post, ThemeInfo, UserAccount};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::path::PathBuf;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Get the wordpress.org plugin information endpoint
    fn plugins_api_url(&self) -> &str;

    /// Get the wordpress.org theme information endpoint
    fn themes_api_url(&self) -> &str;

    /// Get the proxy serving GitHub archives to Playground
    fn github_proxy_url(&self) -> &str;

    /// Get the CORS proxy used for the media archive
    fn cors_proxy_url(&self) -> &str;

    /// Get the Playground base URL used for deep links
    fn playground_url(&self) -> &str;

    /// Get the cache directory path
    fn cache_dir(&self) -> BlueprintResult<PathBuf>;

    /// How long resolved locators stay fresh
    fn cache_ttl(&self) -> Duration;

    /// Landing page used when the installation has none persisted
    fn landing_page(&self) -> &str;

    /// PHP extension bundles requested by every blueprint
    fn php_extension_bundles(&self) -> &[String];
}

/// Trait for the remote plugin/theme directory
///
/// Lookups may fail; callers treat any error as "not resolvable".
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Download link published for a plugin, `None` if the plugin is unknown
    async fn plugin_download_link(&self, slug: &str) -> BlueprintResult<Option<String>>;

    /// Whether the theme directory knows this theme
    async fn theme_exists(&self, slug: &str) -> BlueprintResult<bool>;
}

/// Source of the current time, injected so cache freshness can be tested
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Read-only view of a WordPress installation
///
/// Every query answers from live state; none of them fail; missing data is
/// reported as empty.
pub trait Installation: Send + Sync {
    /// Active plugins in activation order
    fn active_plugins(&self) -> Vec<ActivePlugin>;

    /// The active theme, if any
    fn active_theme(&self) -> Option<ThemeInfo>;

    /// A persisted site option
    fn option(&self, name: &str) -> Option<Value>;

    /// All posts of one post type, in site order
    fn posts_of_type(&self, post_type: &str) -> Vec<Post>;

    /// A single post by id
    fn post(&self, id: u64) -> Option<Post>;

    /// Registered users
    fn users(&self) -> Vec<UserAccount>;

    /// Text of `wp-config.php`
    fn config_source(&self) -> Option<String>;

    /// Source directory of a plugin given its plugin file (`dir/main.php`)
    fn plugin_dir(&self, plugin_file: &str) -> Option<PathBuf>;

    /// Public URL of the site
    fn site_url(&self) -> String;

    /// PHP and WordPress versions currently running
    fn platform_versions(&self) -> PlatformVersions;
}
