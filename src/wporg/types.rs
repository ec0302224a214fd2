//! wordpress.org info API payloads

use serde::{Deserialize, Serialize};

/// Response of `action=plugin_information`
///
/// Only the fields the resolver reads are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInformation {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Package location; a plugin may publish a directory entry that
    /// points outside wordpress.org (e.g. a GitHub archive)
    #[serde(default)]
    pub download_link: Option<String>,
    /// Set instead of the fields above when the slug is unknown
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `action=theme_information`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeInformation {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ThemeInformation {
    pub fn is_published(&self) -> bool {
        self.error.is_none() && !self.slug.is_empty()
    }
}
