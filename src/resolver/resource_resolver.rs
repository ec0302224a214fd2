//! Slug -> download location resolution

use crate::blueprint::types::ResourceLocator;
use crate::cache::LocatorCache;
use crate::di::MetadataSource;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Cache namespace for plugin locators
pub const PLUGIN_CACHE: &str = "blueprint_extractor_plugin_zip";

/// Cache namespace for theme directory membership
pub const THEME_CACHE: &str = "expose_blueprints_theme_exists";

/// Canonical slug of the extractor plugin itself
pub const SELF_SLUG: &str = "blueprint-extractor";

const PLUGIN_DOWNLOADS: &str = "https://downloads.wordpress.org/plugin/";

static GITHUB_ARCHIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([^/]+/[^/]+)/archive/refs/(heads|tags)/([^/]+)\.zip")
        .expect("Invalid GitHub archive regex")
});

/// Every install of the extractor, whatever its folder suffix, is the
/// same directory entry
pub fn normalize_slug(slug: &str) -> &str {
    if slug.starts_with(SELF_SLUG) {
        SELF_SLUG
    } else {
        slug
    }
}

/// Classify a published download link
pub fn classify_download_link(
    slug: &str,
    download_link: &str,
    github_proxy_url: &str,
) -> Option<ResourceLocator> {
    if download_link.starts_with(PLUGIN_DOWNLOADS) {
        return Some(ResourceLocator::plugin(slug));
    }
    let caps = GITHUB_ARCHIVE.captures(download_link)?;
    Some(ResourceLocator::url(format!(
        "{}?repo={}&release={}",
        github_proxy_url, &caps[1], &caps[3]
    )))
}

/// Resolves plugin and theme slugs, remembering every answer
///
/// Nothing here fails: lookups that error out are logged and recorded as
/// unresolvable until the cache entry expires.
pub struct ResourceResolver<'a> {
    metadata: &'a dyn MetadataSource,
    cache: &'a mut LocatorCache,
    github_proxy_url: String,
}

impl<'a> ResourceResolver<'a> {
    pub fn new(
        metadata: &'a dyn MetadataSource,
        cache: &'a mut LocatorCache,
        github_proxy_url: &str,
    ) -> Self {
        Self {
            metadata,
            cache,
            github_proxy_url: github_proxy_url.to_string(),
        }
    }

    /// Where to install a plugin from, `None` when it cannot be installed
    pub async fn resolve(&mut self, slug: &str) -> Option<ResourceLocator> {
        let slug = normalize_slug(slug);

        if let Some(cached) = self.cache.get(PLUGIN_CACHE, slug) {
            tracing::debug!("Locator cache hit for {}", slug);
            return serde_json::from_value(cached.clone()).ok();
        }

        let locator = match self.metadata.plugin_download_link(slug).await {
            Ok(Some(link)) => {
                let locator = classify_download_link(slug, &link, &self.github_proxy_url);
                if locator.is_none() {
                    tracing::info!(
                        "{} is downloaded from an unsupported location: {}",
                        slug,
                        link
                    );
                }
                locator
            }
            Ok(None) => {
                tracing::info!("{} is not published in the plugin directory", slug);
                None
            }
            Err(e) => {
                tracing::warn!("Plugin lookup for {} failed: {}", slug, e);
                None
            }
        };

        let cached = match locator {
            Some(ref locator) => serde_json::to_value(locator).unwrap_or(Value::Bool(false)),
            None => Value::Bool(false),
        };
        self.cache.set(PLUGIN_CACHE, slug, cached);
        locator
    }

    /// Whether a theme can be installed from the theme directory
    pub async fn theme_exists(&mut self, slug: &str) -> bool {
        if let Some(cached) = self.cache.get(THEME_CACHE, slug) {
            tracing::debug!("Theme cache hit for {}", slug);
            return cached.as_bool().unwrap_or(false);
        }

        let exists = match self.metadata.theme_exists(slug).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Theme lookup for {} failed: {}", slug, e);
                false
            }
        };
        if !exists {
            tracing::info!("Theme {} is not in the theme directory", slug);
        }

        self.cache.set(THEME_CACHE, slug, Value::Bool(exists));
        exists
    }
}
