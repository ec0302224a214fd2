//! Blueprint document types
//!
//! These serialize to the JSON Playground consumes, field for field.

use crate::content::ContentIntent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where an installable package is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource")]
pub enum ResourceLocator {
    #[serde(rename = "wordpress.org/plugins")]
    PluginDirectory { slug: String },
    #[serde(rename = "wordpress.org/themes")]
    ThemeDirectory { slug: String },
    #[serde(rename = "url")]
    Url { url: String },
}

impl ResourceLocator {
    pub fn plugin(slug: &str) -> Self {
        Self::PluginDirectory {
            slug: slug.to_string(),
        }
    }

    pub fn theme(slug: &str) -> Self {
        Self::ThemeDirectory {
            slug: slug.to_string(),
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }
}

/// One provisioning action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step")]
pub enum Step {
    #[serde(rename = "installPlugin", rename_all = "camelCase")]
    InstallPlugin {
        plugin_data: ResourceLocator,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        info: Option<String>,
    },
    #[serde(rename = "installTheme", rename_all = "camelCase")]
    InstallTheme { theme_zip_file: ResourceLocator },
    #[serde(rename = "setSiteOptions")]
    SetSiteOptions { options: Map<String, Value> },
    #[serde(rename = "defineWpConfigConsts")]
    DefineWpConfigConsts { consts: Map<String, Value> },
    #[serde(rename = "unzip", rename_all = "camelCase")]
    Unzip {
        zip_file: ResourceLocator,
        extract_to_path: String,
    },
    #[serde(rename = "runPHP")]
    RunPhp { code: ContentIntent },
}

impl Step {
    /// Slug carried by an `installPlugin` step before export strips it
    pub fn plugin_slug(&self) -> Option<&str> {
        match self {
            Step::InstallPlugin { slug, .. } => slug.as_deref(),
            _ => None,
        }
    }

    /// Drop the editor-only annotations of an `installPlugin` step
    pub fn stripped(self) -> Self {
        match self {
            Step::InstallPlugin { plugin_data, .. } => Step::InstallPlugin {
                plugin_data,
                name: None,
                slug: None,
                info: None,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferredVersions {
    pub php: String,
    pub wp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Features {
    pub networking: bool,
}

/// The exported document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub landing_page: String,
    pub preferred_versions: PreferredVersions,
    pub php_extension_bundles: Vec<String>,
    pub features: Features,
    pub login: bool,
    pub steps: Vec<Step>,
}
