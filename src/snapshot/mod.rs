//! Installation snapshots
//!
//! A snapshot is an export of a WordPress site's live state (options, active
//! plugins, theme, posts, users) written as YAML or JSON. Paired with the
//! site's root directory it answers every [`Installation`] query, including
//! reading `wp-config.php` and plugin sources for the scanners.

pub mod types;

use crate::core::path::{plugins_dir, wp_config_file};
use crate::core::{BlueprintError, BlueprintResult};
use crate::di::Installation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};
use types::{ActivePlugin, PlatformVersions, Post, ThemeInfo, UserAccount};

/// On-disk snapshot format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub site_url: String,

    #[serde(default)]
    pub versions: PlatformVersions,

    /// Persisted site options by name
    #[serde(default)]
    pub options: Map<String, Value>,

    /// Active plugins in activation order
    #[serde(default)]
    pub plugins: Vec<ActivePlugin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeInfo>,

    #[serde(default)]
    pub posts: Vec<Post>,

    #[serde(default)]
    pub users: Vec<UserAccount>,

    /// Inline `wp-config.php`, used when no WordPress root is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wp_config: Option<String>,
}

/// A loaded snapshot, optionally backed by the site's files
#[derive(Debug, Clone)]
pub struct Snapshot {
    data: SnapshotData,
    wp_root: Option<PathBuf>,
}

impl Snapshot {
    pub fn new(data: SnapshotData, wp_root: Option<PathBuf>) -> Self {
        Self { data, wp_root }
    }

    /// Load a snapshot file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path, wp_root: Option<PathBuf>) -> BlueprintResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BlueprintError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let data: SnapshotData = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                BlueprintError::Snapshot(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                BlueprintError::Snapshot(format!("Failed to parse {}: {}", path.display(), e))
            })?
        };

        if let Some(ref root) = wp_root {
            if !root.is_dir() {
                return Err(BlueprintError::Path(format!(
                    "WordPress root is not a directory: {}",
                    root.display()
                )));
            }
        }

        tracing::debug!(
            plugins = data.plugins.len(),
            posts = data.posts.len(),
            users = data.users.len(),
            "Loaded snapshot {}",
            path.display()
        );

        Ok(Self::new(data, wp_root))
    }

    pub fn data(&self) -> &SnapshotData {
        &self.data
    }
}

impl Installation for Snapshot {
    fn active_plugins(&self) -> Vec<ActivePlugin> {
        self.data.plugins.clone()
    }

    fn active_theme(&self) -> Option<ThemeInfo> {
        self.data.theme.clone()
    }

    fn option(&self, name: &str) -> Option<Value> {
        self.data.options.get(name).cloned()
    }

    fn posts_of_type(&self, post_type: &str) -> Vec<Post> {
        self.data
            .posts
            .iter()
            .filter(|p| p.post_type == post_type)
            .cloned()
            .collect()
    }

    fn post(&self, id: u64) -> Option<Post> {
        self.data.posts.iter().find(|p| p.id == id).cloned()
    }

    fn users(&self) -> Vec<UserAccount> {
        self.data.users.clone()
    }

    fn config_source(&self) -> Option<String> {
        if let Some(ref root) = self.wp_root {
            let path = wp_config_file(root);
            match fs::read_to_string(&path) {
                Ok(source) => return Some(source),
                Err(e) => tracing::warn!("Cannot read {}: {}", path.display(), e),
            }
        }
        self.data.wp_config.clone()
    }

    fn plugin_dir(&self, plugin_file: &str) -> Option<PathBuf> {
        let root = self.wp_root.as_ref()?;
        // Folder plugins are scanned whole, single-file plugins on their own
        let entry = match plugin_file.split_once('/') {
            Some((dir, _)) => dir,
            None => plugin_file,
        };
        let relative = Path::new(entry);
        if entry.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            tracing::warn!(
                "Ignoring plugin outside the plugins directory: {}",
                plugin_file
            );
            return None;
        }
        Some(plugins_dir(root).join(relative))
    }

    fn site_url(&self) -> String {
        self.data.site_url.clone()
    }

    fn platform_versions(&self) -> PlatformVersions {
        self.data.versions.clone()
    }
}
