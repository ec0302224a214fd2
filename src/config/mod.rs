use crate::core::path::{config_file, ensure_dir};
use crate::core::{BlueprintError, BlueprintResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// wordpress.org plugin information endpoint
    #[serde(default = "default_plugins_api_url")]
    pub plugins_api_url: String,

    /// wordpress.org theme information endpoint
    #[serde(default = "default_themes_api_url")]
    pub themes_api_url: String,

    /// Proxy that serves GitHub branch/tag archives to Playground
    #[serde(default = "default_github_proxy_url")]
    pub github_proxy_url: String,

    /// CORS proxy prefixed to the media archive URL
    #[serde(default = "default_cors_proxy_url")]
    pub cors_proxy_url: String,

    /// Playground instance used for deep links
    #[serde(default = "default_playground_url")]
    pub playground_url: String,

    /// Cache directory (defaults to platform-specific cache directory)
    ///
    /// Default locations:
    /// - Windows: %LOCALAPPDATA%\blueprint\cache
    /// - Linux: ~/.cache/blueprint
    /// - macOS: ~/Library/Caches/blueprint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// Seconds a resolved plugin/theme lookup stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Landing page when the installation does not carry one
    #[serde(default = "default_landing_page")]
    pub landing_page: String,

    /// PHP extension bundles requested from Playground
    #[serde(default = "default_php_extension_bundles")]
    pub php_extension_bundles: Vec<String>,
}

fn default_plugins_api_url() -> String {
    "https://api.wordpress.org/plugins/info/1.2/".to_string()
}

fn default_themes_api_url() -> String {
    "https://api.wordpress.org/themes/info/1.2/".to_string()
}

fn default_github_proxy_url() -> String {
    "https://github-proxy.com/proxy/".to_string()
}

fn default_cors_proxy_url() -> String {
    "https://playground.wordpress.net/cors-proxy.php".to_string()
}

fn default_playground_url() -> String {
    "https://playground.wordpress.net/".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_landing_page() -> String {
    "/".to_string()
}

fn default_php_extension_bundles() -> Vec<String> {
    vec!["kitchen-sink".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugins_api_url: default_plugins_api_url(),
            themes_api_url: default_themes_api_url(),
            github_proxy_url: default_github_proxy_url(),
            cors_proxy_url: default_cors_proxy_url(),
            playground_url: default_playground_url(),
            cache_dir: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            landing_page: default_landing_page(),
            php_extension_bundles: default_php_extension_bundles(),
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\blueprint\config.yaml
    /// - Linux: ~/.config/blueprint/config.yaml
    /// - macOS: ~/Library/Application Support/blueprint/config.yaml
    pub fn load() -> BlueprintResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file, which must exist
    pub fn load_from(path: &Path) -> BlueprintResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BlueprintError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BlueprintError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to an explicit file
    pub fn save_to(&self, path: &Path) -> BlueprintResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| BlueprintError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| BlueprintError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the cache directory path
    pub fn get_cache_dir(&self) -> BlueprintResult<std::path::PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            Ok(std::path::PathBuf::from(dir))
        } else {
            crate::core::path::cache_dir()
        }
    }
}

impl ConfigProvider for Config {
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

    fn cache_dir(&self) -> BlueprintResult<std::path::PathBuf> {
        self.get_cache_dir()
    }

    fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_ttl_secs.min(i64::MAX as u64) as i64)
    }

    fn landing_page(&self) -> &str {
        &self.landing_page
    }

    fn php_extension_bundles(&self) -> &[String] {
        &self.php_extension_bundles
    }
}
